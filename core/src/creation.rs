//! New-version / new-subversion / new-file / new-directory / new-symlink /
//! copy. Mirrors `create_new_version_generic` and friends from the
//! original C source, including the debounce window and the
//! rollback-on-persist-failure epilogue.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::codec;
use crate::context::Context;
use crate::err::{Result, RvfsError};
use crate::model::{Metadata, Version, VersionQuery};
use crate::path;
use crate::resolver;
use crate::selector;

/// Debounce window: a new-version push within this interval of the last one
/// on the same file is coalesced into a no-op (`TIME_LIMIT` in the original
/// C source).
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

fn metadata_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("metadata.{}", basename))
}

fn pin_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("dfl-meta.{}", basename))
}

fn version_name(vid: u32, basename: &str) -> String {
    format!("{:08X}.{}", vid, basename)
}

fn debounced(record: &Metadata, now: SystemTime) -> bool {
    match now.duration_since(record.timestamp) {
        Ok(elapsed) => elapsed < DEBOUNCE_WINDOW,
        Err(_) => true,
    }
}

/// Persist `record`'s metadata (and, if its pin changed, its pin file) under
/// `dir`. On failure, callers must discard `record` and keep whatever was
/// cached before, so the on-disk and in-memory states never diverge.
fn persist(dir: &Path, basename: &str, record: &Metadata) -> Result<()> {
    codec::write_metadata(&metadata_path(dir, basename), &record.versions, record.deleted)?;
    codec::write_pin(&pin_path(dir, basename), record.pin)?;
    Ok(())
}

/// Push a new version (vid bump), optionally copying the current content.
/// No-ops inside the debounce window. Resurrects a deleted file and clears
/// any pin, per the original's `create_new_version_generic`.
pub fn new_version(
    ctx: &Context,
    vpath: &str,
    uid: u32,
    gid: u32,
    mode: u32,
    copy: bool,
) -> Result<Metadata> {
    let (dir_vpath, basename) = path::split_dir_base(vpath);
    let dir = resolver::resolve(ctx, &dir_vpath)?;
    let mut record = resolver::translate_to_metadata(ctx, vpath)?;

    let now = SystemTime::now();
    if !record.versions.is_empty() && debounced(&record, now) {
        return Ok(record);
    }

    let current = selector::select(&record, VersionQuery::Latest, true).cloned();
    let new_vid = current.as_ref().map(|v| v.vid).unwrap_or(0) + 1;
    let new_mode = current.as_ref().map(|v| v.mode).unwrap_or(mode & 0o7777);
    let (new_uid, new_gid) = match &current {
        Some(v) if copy => (v.uid, v.gid),
        _ => (uid, gid),
    };

    let new_rfile = dir.join(version_name(new_vid, &basename));
    if copy {
        if let Some(cur) = &current {
            copy_file(&cur.rfile, &new_rfile)?;
        }
    }

    let new_v = Version {
        vid: new_vid,
        svid: 0,
        mode: new_mode,
        uid: new_uid,
        gid: new_gid,
        rfile: new_rfile,
    };

    let mut candidate = record.clone();
    candidate.push_version(new_v);
    candidate.deleted = false;
    candidate.pin = None;
    candidate.timestamp = now;

    persist(&dir, &basename, &candidate)?;
    ctx.cache.add(candidate.clone());
    record = candidate;
    Ok(record)
}

/// Push a new subversion (metadata-only bump: chmod/chown). Fails if the
/// file is deleted or has no versions.
pub fn new_subversion(ctx: &Context, vpath: &str, uid: u32, gid: u32, mode: u32) -> Result<Metadata> {
    let (dir_vpath, basename) = path::split_dir_base(vpath);
    let dir = resolver::resolve(ctx, &dir_vpath)?;
    let record = resolver::translate_to_metadata(ctx, vpath)?;

    if record.deleted || record.versions.is_empty() {
        return Err(RvfsError::NoSuchEntry);
    }

    let now = SystemTime::now();
    if debounced(&record, now) {
        return Ok(record);
    }

    let effective = selector::select(&record, VersionQuery::Latest, false)
        .ok_or(RvfsError::NoSuchEntry)?
        .clone();
    let head = record.head().expect("checked non-empty above");

    let (new_vid, new_svid) = if head.vid != effective.vid {
        (head.vid + 1, 0)
    } else {
        (effective.vid, effective.svid + 1)
    };

    let new_v = Version {
        vid: new_vid,
        svid: new_svid,
        mode: mode & 0o7777,
        uid,
        gid,
        rfile: effective.rfile.clone(),
    };

    let mut candidate = record.clone();
    candidate.push_version(new_v);
    candidate.deleted = false;
    candidate.pin = None;
    candidate.timestamp = now;

    persist(&dir, &basename, &candidate)?;
    ctx.cache.add(candidate.clone());
    Ok(candidate)
}

enum NewKind {
    File,
    Directory,
    Symlink { target: PathBuf },
}

fn materialize(kind: &NewKind, path: &Path, mode: u32) -> io::Result<()> {
    match kind {
        NewKind::File => {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .mode(mode & 0o7777)
                .open(path)?;
            Ok(())
        }
        NewKind::Directory => fs::create_dir(path).and_then(|_| {
            fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        }),
        NewKind::Symlink { target } => std::os::unix::fs::symlink(target, path),
    }
}

fn new_entry(
    ctx: &Context,
    vpath: &str,
    uid: u32,
    gid: u32,
    mode: u32,
    kind: NewKind,
) -> Result<Metadata> {
    let (dir_vpath, basename) = path::split_dir_base(vpath);
    let dir = resolver::resolve(ctx, &dir_vpath)?;

    let existing = match resolver::translate_to_metadata(ctx, vpath) {
        Ok(r) => Some(r),
        Err(RvfsError::NoSuchEntry) => None,
        Err(e) => return Err(e),
    };
    if let Some(rec) = &existing {
        if selector::select(rec, VersionQuery::Latest, false).is_some() {
            return Err(RvfsError::AlreadyExists);
        }
    }

    let prior_vid = existing
        .as_ref()
        .and_then(|r| r.head())
        .map(|v| v.vid)
        .unwrap_or(0);
    let new_vid = prior_vid + 1;
    let new_rfile = dir.join(version_name(new_vid, &basename));

    let conservative_mode = match kind {
        NewKind::File => 0o600,
        NewKind::Directory => 0o700,
        NewKind::Symlink { .. } => mode & 0o7777,
    };
    materialize(&kind, &new_rfile, conservative_mode)?;

    let new_v = Version {
        vid: new_vid,
        svid: 0,
        mode: mode & 0o7777,
        uid,
        gid,
        rfile: new_rfile.clone(),
    };

    let mut record = existing.unwrap_or_else(|| Metadata::new_empty(vpath));
    record.push_version(new_v);
    record.deleted = false;
    record.pin = None;
    record.timestamp = SystemTime::now();

    if let Err(e) = persist(&dir, &basename, &record) {
        let _ = fs::remove_file(&new_rfile).or_else(|_| fs::remove_dir(&new_rfile));
        return Err(e);
    }
    ctx.cache.add(record.clone());
    Ok(record)
}

pub fn new_file(ctx: &Context, vpath: &str, uid: u32, gid: u32, mode: u32) -> Result<Metadata> {
    new_entry(ctx, vpath, uid, gid, mode, NewKind::File)
}

pub fn new_directory(ctx: &Context, vpath: &str, uid: u32, gid: u32, mode: u32) -> Result<Metadata> {
    new_entry(ctx, vpath, uid, gid, mode, NewKind::Directory)
}

pub fn new_symlink(
    ctx: &Context,
    vpath: &str,
    uid: u32,
    gid: u32,
    target: PathBuf,
) -> Result<Metadata> {
    new_entry(ctx, vpath, uid, gid, 0o777, NewKind::Symlink { target })
}

/// Copy `src` to `dst`: symlinks are recreated as symlinks, regular files
/// are streamed; other file types are unsupported.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src)?;
    if meta.file_type().is_symlink() {
        let target = fs::read_link(src)?;
        std::os::unix::fs::symlink(target, dst)?;
        return Ok(());
    }
    if !meta.file_type().is_file() {
        return Err(RvfsError::InvalidArgument);
    }
    loop {
        match fs::copy(src, dst) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    fn ctx_for(dir: &Path) -> Context {
        fs::write(dir.join("metadata."), "1:0:0755:0:0:\n").unwrap();
        Context::new(Config::from_path(dir.to_path_buf()).unwrap())
    }

    #[test]
    fn new_file_creates_version_one() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        let record = new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        assert_eq!(record.head().unwrap().vid, 1);
        assert!(dir.path().join("00000001.a").exists());
    }

    #[test]
    fn new_file_twice_fails_already_exists() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        assert!(matches!(
            new_file(&ctx, "/a", 1000, 1000, 0o644),
            Err(RvfsError::AlreadyExists)
        ));
    }

    #[test]
    fn subversion_bumps_metadata_only() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        std::thread::sleep(DEBOUNCE_WINDOW + Duration::from_millis(50));
        let record = new_subversion(&ctx, "/a", 1000, 1000, 0o600).unwrap();
        let head = record.head().unwrap();
        assert_eq!(head.key(), (1, 1));
        assert_eq!(head.mode, 0o600);
    }

    #[test]
    fn debounced_new_version_is_noop() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        let record = new_version(&ctx, "/a", 1000, 1000, 0o644, true).unwrap();
        assert_eq!(record.head().unwrap().vid, 1);
    }
}
