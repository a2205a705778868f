//! POSIX adapter: translates FUSE callbacks into core operations. No state
//! of its own beyond the inode table and the shared [`rvfs_core::Context`].

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fuser::{
    FileAttr, FileType, Filesystem, ReplyAttr, ReplyCreate, ReplyData, ReplyDirectory, ReplyEmpty,
    ReplyEntry, ReplyOpen, ReplyStatfs, ReplyWrite, ReplyXattr, Request, TimeOrNow,
};
use log::debug;
use rvfs_core::{Context, RvfsError, Version, VersionQuery};

use crate::inode::InodeTable;

const TTL: Duration = Duration::from_secs(1);

pub struct Adapter {
    ctx: Context,
    inodes: InodeTable,
}

impl Adapter {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            inodes: InodeTable::new(),
        }
    }

    fn child_vpath(&self, parent: u64, name: &OsStr) -> Option<String> {
        let parent_path = self.inodes.path_of(parent)?;
        let name = name.to_string_lossy();
        if parent_path == "/" {
            Some(format!("/{}", name))
        } else {
            Some(format!("{}/{}", parent_path, name))
        }
    }

    fn attr_for(&self, ino: u64, version: &Version) -> FileAttr {
        let (kind, perm, size) = match std::fs::symlink_metadata(&version.rfile) {
            Ok(meta) => {
                let kind = if meta.is_dir() {
                    FileType::Directory
                } else if meta.file_type().is_symlink() {
                    FileType::Symlink
                } else {
                    FileType::RegularFile
                };
                (kind, version.mode as u16, meta.len())
            }
            Err(_) => (FileType::RegularFile, version.mode as u16, 0),
        };
        FileAttr {
            ino,
            size,
            blocks: (size + 511) / 512,
            atime: UNIX_EPOCH,
            mtime: UNIX_EPOCH,
            ctime: UNIX_EPOCH,
            crtime: UNIX_EPOCH,
            kind,
            perm,
            nlink: 1,
            uid: version.uid,
            gid: version.gid,
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }

    fn resolve_attr(&self, vpath: &str) -> Result<Version, RvfsError> {
        let record = rvfs_core::resolver::translate_to_metadata(&self.ctx, vpath)?;
        let version = rvfs_core::selector::select(&record, VersionQuery::Latest, false)
            .ok_or(RvfsError::NoSuchEntry)?
            .clone();
        Ok(version)
    }
}

impl Filesystem for Adapter {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => {
                drop(_guard);
                let ino = self.inodes.lookup(&vpath);
                let attr = self.attr_for(ino, &version);
                reply.entry(&TTL, &attr, 0);
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn forget(&mut self, _req: &Request<'_>, ino: u64, nlookup: u64) {
        self.inodes.forget(ino, nlookup);
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => reply.attr(&TTL, &self.attr_for(ino, &version)),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn setattr(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        mode: Option<u32>,
        uid: Option<u32>,
        gid: Option<u32>,
        size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };

        let result = (|| -> Result<Version, RvfsError> {
            if mode.is_some() || uid.is_some() || gid.is_some() {
                let current = self.resolve_attr(&vpath)?;
                let new_mode = mode.unwrap_or(current.mode);
                let new_uid = uid.unwrap_or(current.uid);
                let new_gid = gid.unwrap_or(current.gid);
                rvfs_core::creation::new_subversion(&self.ctx, &vpath, new_uid, new_gid, new_mode)?;
            }
            if let Some(len) = size {
                let current = self.resolve_attr(&vpath)?;
                rvfs_core::creation::new_version(
                    &self.ctx,
                    &vpath,
                    current.uid,
                    current.gid,
                    current.mode,
                    true,
                )?;
                let new_version = self.resolve_attr(&vpath)?;
                let f = std::fs::OpenOptions::new().write(true).open(&new_version.rfile)?;
                f.set_len(len)?;
            }
            self.resolve_attr(&vpath)
        })();

        match result {
            Ok(version) => reply.attr(&TTL, &self.attr_for(ino, &version)),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn readlink(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyData) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => match std::fs::read_link(&version.rfile) {
                Ok(target) => reply.data(target.as_os_str().as_bytes()),
                Err(e) => reply.error(e.raw_os_error().unwrap_or(libc::EIO)),
            },
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn mknod(
        &mut self,
        req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        mode: u32,
        _umask: u32,
        _rdev: u32,
        reply: ReplyEntry,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match rvfs_core::creation::new_file(&self.ctx, &vpath, req.uid(), req.gid(), mode) {
            Ok(record) => {
                drop(_guard);
                let ino = self.inodes.lookup(&vpath);
                let version = record.head().unwrap().clone();
                reply.entry(&TTL, &self.attr_for(ino, &version), 0);
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn mkdir(
        &mut self,
        req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        mode: u32,
        _umask: u32,
        reply: ReplyEntry,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match rvfs_core::creation::new_directory(&self.ctx, &vpath, req.uid(), req.gid(), mode) {
            Ok(record) => {
                drop(_guard);
                let ino = self.inodes.lookup(&vpath);
                let version = record.head().unwrap().clone();
                reply.entry(&TTL, &self.attr_for(ino, &version), 0);
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn symlink(
        &mut self,
        req: &Request<'_>,
        parent: u64,
        link_name: &OsStr,
        target: &Path,
        reply: ReplyEntry,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, link_name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match rvfs_core::creation::new_symlink(
            &self.ctx,
            &vpath,
            req.uid(),
            req.gid(),
            target.to_path_buf(),
        ) {
            Ok(record) => {
                drop(_guard);
                let ino = self.inodes.lookup(&vpath);
                let version = record.head().unwrap().clone();
                reply.entry(&TTL, &self.attr_for(ino, &version), 0);
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn unlink(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match mark_deleted(&self.ctx, &vpath) {
            Ok(()) => reply.ok(),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn rmdir(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => match std::fs::read_dir(&version.rfile) {
                Ok(entries) => {
                    let has_live_child = entries
                        .filter_map(|e| e.ok())
                        .filter_map(|e| {
                            e.file_name()
                                .to_str()
                                .and_then(|n| n.strip_prefix("metadata."))
                                .map(|s| s.to_string())
                        })
                        .any(|name| {
                            let child_vpath = if vpath == "/" {
                                format!("/{}", name)
                            } else {
                                format!("{}/{}", vpath, name)
                            };
                            self.resolve_attr(&child_vpath).is_ok()
                        });
                    if has_live_child {
                        reply.error(libc::ENOTEMPTY);
                        return;
                    }
                    match mark_deleted(&self.ctx, &vpath) {
                        Ok(()) => reply.ok(),
                        Err(e) => reply.error(e.to_errno()),
                    }
                }
                Err(e) => reply.error(e.raw_os_error().unwrap_or(libc::EIO)),
            },
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn rename(
        &mut self,
        _req: &Request<'_>,
        _parent: u64,
        _name: &OsStr,
        _newparent: u64,
        _newname: &OsStr,
        _flags: u32,
        reply: ReplyEmpty,
    ) {
        reply.error(libc::EXDEV);
    }

    fn link(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _newparent: u64,
        _newname: &OsStr,
        reply: ReplyEntry,
    ) {
        reply.error(libc::EPERM);
    }

    fn create(
        &mut self,
        req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        mode: u32,
        _umask: u32,
        _flags: i32,
        reply: ReplyCreate,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.child_vpath(parent, name) else {
            reply.error(libc::ENOENT);
            return;
        };
        match rvfs_core::creation::new_file(&self.ctx, &vpath, req.uid(), req.gid(), mode) {
            Ok(record) => {
                drop(_guard);
                let ino = self.inodes.lookup(&vpath);
                let version = record.head().unwrap().clone();
                reply.created(&TTL, &self.attr_for(ino, &version), 0, 0, 0);
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, flags: i32, reply: ReplyOpen) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let wants_write = (flags & libc::O_ACCMODE) != libc::O_RDONLY;
        if wants_write {
            let current = match self.resolve_attr(&vpath) {
                Ok(v) => v,
                Err(e) => {
                    reply.error(e.to_errno());
                    return;
                }
            };
            if let Err(e) = rvfs_core::creation::new_version(
                &self.ctx,
                &vpath,
                current.uid,
                current.gid,
                current.mode,
                true,
            ) {
                reply.error(e.to_errno());
                return;
            }
        }
        reply.opened(0, 0);
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => {
                use std::io::{Read, Seek, SeekFrom};
                match std::fs::File::open(&version.rfile).and_then(|mut f| {
                    f.seek(SeekFrom::Start(offset as u64))?;
                    let mut buf = vec![0u8; size as usize];
                    let n = f.read(&mut buf)?;
                    buf.truncate(n);
                    Ok(buf)
                }) {
                    Ok(buf) => reply.data(&buf),
                    Err(e) => reply.error(e.raw_os_error().unwrap_or(libc::EIO)),
                }
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn write(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        match self.resolve_attr(&vpath) {
            Ok(version) => {
                use std::io::{Seek, SeekFrom, Write as _};
                match std::fs::OpenOptions::new()
                    .write(true)
                    .open(&version.rfile)
                    .and_then(|mut f| {
                        f.seek(SeekFrom::Start(offset as u64))?;
                        f.write_all(data)?;
                        Ok(())
                    }) {
                    Ok(()) => reply.written(data.len() as u32),
                    Err(e) => reply.error(e.raw_os_error().unwrap_or(libc::EIO)),
                }
            }
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn release(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _flags: i32,
        _lock_owner: Option<u64>,
        _flush: bool,
        reply: ReplyEmpty,
    ) {
        reply.ok();
    }

    fn fsync(&mut self, _req: &Request<'_>, _ino: u64, _fh: u64, _datasync: bool, reply: ReplyEmpty) {
        reply.ok();
    }

    fn opendir(&mut self, _req: &Request<'_>, _ino: u64, _flags: i32, reply: ReplyOpen) {
        reply.opened(0, 0);
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let dir_real = match self.resolve_attr(&vpath) {
            Ok(v) => v.rfile,
            Err(e) => {
                reply.error(e.to_errno());
                return;
            }
        };
        let mut names = vec![(".".to_string(), FileType::Directory, ino), ("..".to_string(), FileType::Directory, ino)];
        if let Ok(entries) = std::fs::read_dir(&dir_real) {
            for entry in entries.filter_map(|e| e.ok()) {
                let Some(basename) = entry
                    .file_name()
                    .to_str()
                    .and_then(|n| n.strip_prefix("metadata."))
                    .map(|s| s.to_string())
                else {
                    continue;
                };
                if basename.is_empty() {
                    continue;
                }
                let child_vpath = if vpath == "/" {
                    format!("/{}", basename)
                } else {
                    format!("{}/{}", vpath, basename)
                };
                let Ok(version) = self.resolve_attr(&child_vpath) else {
                    continue;
                };
                let kind = match std::fs::symlink_metadata(&version.rfile) {
                    Ok(m) if m.is_dir() => FileType::Directory,
                    Ok(m) if m.file_type().is_symlink() => FileType::Symlink,
                    _ => FileType::RegularFile,
                };
                let child_ino = self.inodes.lookup(&child_vpath);
                names.push((basename, kind, child_ino));
            }
        }
        for (i, (name, kind, ino)) in names.into_iter().enumerate().skip(offset as usize) {
            if reply.add(ino, (i + 1) as i64, kind, &name) {
                break;
            }
        }
        reply.ok();
    }

    fn releasedir(&mut self, _req: &Request<'_>, _ino: u64, _fh: u64, _flags: i32, reply: ReplyEmpty) {
        reply.ok();
    }

    fn statfs(&mut self, _req: &Request<'_>, _ino: u64, reply: ReplyStatfs) {
        match nix_statvfs(&self.ctx.root) {
            Ok((blocks, bfree, bavail, files, ffree)) => {
                reply.statfs(blocks, bfree, bavail, files, ffree, 512, 255, 512)
            }
            Err(e) => reply.error(e),
        }
    }

    fn setxattr(
        &mut self,
        req: &Request<'_>,
        ino: u64,
        name: &OsStr,
        value: &[u8],
        _flags: i32,
        _position: u32,
        reply: ReplyEmpty,
    ) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let name = name.to_string_lossy();
        let value = String::from_utf8_lossy(value).trim_end_matches('\0').to_string();
        let result = match name.as_ref() {
            rvfs_core::xattr::LOCKED_VERSION => {
                rvfs_core::xattr::set_locked_version(&self.ctx, &vpath, &value, req.uid())
            }
            rvfs_core::xattr::METADATA_DUMP => Err(RvfsError::PermissionDenied),
            rvfs_core::xattr::PURGE => rvfs_core::xattr::purge(&self.ctx, &vpath, &value),
            _ => match self.resolve_attr(&vpath) {
                Ok(version) => passthrough_setxattr(&version.rfile, &name, value.as_bytes()),
                Err(e) => Err(e),
            },
        };
        match result {
            Ok(()) => reply.ok(),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn getxattr(&mut self, _req: &Request<'_>, ino: u64, name: &OsStr, size: u32, reply: ReplyXattr) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let name = name.to_string_lossy();
        let result: Result<String, RvfsError> = match name.as_ref() {
            rvfs_core::xattr::LOCKED_VERSION => rvfs_core::xattr::get_locked_version(&self.ctx, &vpath),
            rvfs_core::xattr::METADATA_DUMP => rvfs_core::xattr::metadata_dump(&self.ctx, &vpath),
            _ => {
                reply.error(libc::ENODATA);
                return;
            }
        };
        match result {
            Ok(value) => reply_xattr_bytes(reply, value.as_bytes(), size),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn listxattr(&mut self, _req: &Request<'_>, ino: u64, size: u32, reply: ReplyXattr) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let mut joined = Vec::new();
        for name in rvfs_core::xattr::LISTED_ATTRIBUTES {
            joined.extend_from_slice(name.as_bytes());
            joined.push(0);
        }
        if let Ok(version) = self.resolve_attr(&vpath) {
            if let Ok(extra) = xattr_list_real(&version.rfile) {
                joined.extend(extra);
            }
        }
        reply_xattr_bytes(reply, &joined, size);
    }

    fn removexattr(&mut self, _req: &Request<'_>, ino: u64, name: &OsStr, reply: ReplyEmpty) {
        let _guard = self.ctx.lock_request();
        let Some(vpath) = self.inodes.path_of(ino).map(str::to_string) else {
            reply.error(libc::ENOENT);
            return;
        };
        let name = name.to_string_lossy();
        match name.as_ref() {
            rvfs_core::xattr::LOCKED_VERSION | rvfs_core::xattr::METADATA_DUMP => {
                reply.error(libc::EPERM);
            }
            _ => match self.resolve_attr(&vpath) {
                Ok(version) => match passthrough_removexattr(&version.rfile, &name) {
                    Ok(()) => reply.ok(),
                    Err(e) => reply.error(e.to_errno()),
                },
                Err(e) => reply.error(e.to_errno()),
            },
        }
    }
}

fn mark_deleted(ctx: &Context, vpath: &str) -> Result<(), RvfsError> {
    let mut record = rvfs_core::resolver::translate_to_metadata(ctx, vpath)?;
    if record.deleted {
        return Err(RvfsError::NoSuchEntry);
    }
    record.deleted = true;
    let (dir_vpath, basename) = rvfs_core::path::split_dir_base(vpath);
    let dir = rvfs_core::resolver::resolve(ctx, &dir_vpath)?;
    rvfs_core::codec::write_metadata(
        &dir.join(format!("metadata.{}", basename)),
        &record.versions,
        true,
    )?;
    ctx.cache.add(record);
    debug!("marked {} deleted", vpath);
    Ok(())
}

fn reply_xattr_bytes(reply: ReplyXattr, data: &[u8], size: u32) {
    if size == 0 {
        reply.size(data.len() as u32);
    } else if (data.len() as u32) > size {
        reply.error(libc::ERANGE);
    } else {
        reply.data(data);
    }
}

fn passthrough_setxattr(path: &Path, name: &str, value: &[u8]) -> Result<(), RvfsError> {
    use std::ffi::CString;
    let cpath = CString::new(path.as_os_str().as_bytes()).map_err(|_| RvfsError::InvalidArgument)?;
    let cname = CString::new(name).map_err(|_| RvfsError::InvalidArgument)?;
    let rc = unsafe {
        libc::lsetxattr(
            cpath.as_ptr(),
            cname.as_ptr(),
            value.as_ptr() as *const libc::c_void,
            value.len(),
            0,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    Ok(())
}

fn passthrough_removexattr(path: &Path, name: &str) -> Result<(), RvfsError> {
    use std::ffi::CString;
    let cpath = CString::new(path.as_os_str().as_bytes()).map_err(|_| RvfsError::InvalidArgument)?;
    let cname = CString::new(name).map_err(|_| RvfsError::InvalidArgument)?;
    let rc = unsafe { libc::lremovexattr(cpath.as_ptr(), cname.as_ptr()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    Ok(())
}

fn xattr_list_real(path: &Path) -> std::io::Result<Vec<u8>> {
    use std::ffi::CString;
    let cpath = CString::new(path.as_os_str().as_bytes())?;
    let needed = unsafe { libc::llistxattr(cpath.as_ptr(), std::ptr::null_mut(), 0) };
    if needed <= 0 {
        return Ok(Vec::new());
    }
    let mut buf = vec![0u8; needed as usize];
    let n = unsafe { libc::llistxattr(cpath.as_ptr(), buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if n < 0 {
        return Err(std::io::Error::last_os_error());
    }
    buf.truncate(n as usize);
    Ok(buf)
}

fn nix_statvfs(path: &Path) -> Result<(u64, u64, u64, u64, u64), i32> {
    use std::ffi::CString;
    let cpath = CString::new(path.as_os_str().as_bytes()).map_err(|_| libc::EINVAL)?;
    unsafe {
        let mut stat: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(cpath.as_ptr(), &mut stat) != 0 {
            return Err(std::io::Error::last_os_error().raw_os_error().unwrap_or(libc::EIO));
        }
        Ok((stat.f_blocks, stat.f_bfree, stat.f_bavail, stat.f_files, stat.f_ffree))
    }
}
