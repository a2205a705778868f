//! `rcs.locked_version`, `rcs.metadata_dump` and `rcs.purge` extended
//! attribute semantics. Mirrors `callback_setxattr` / `callback_getxattr`
//! from the original C source.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::time::UNIX_EPOCH;

use crate::codec;
use crate::context::Context;
use crate::err::{Result, RvfsError};
use crate::model::{Metadata, Pin, SvidQuery, Version, VersionQuery};
use crate::path;
use crate::resolver;
use crate::selector;

pub const LOCKED_VERSION: &str = "rcs.locked_version";
pub const METADATA_DUMP: &str = "rcs.metadata_dump";
pub const PURGE: &str = "rcs.purge";

/// Attribute names advertised by `listxattr` (purge is intentionally hidden).
pub const LISTED_ATTRIBUTES: &[&str] = &[LOCKED_VERSION, METADATA_DUMP];

fn metadata_path(dir: &std::path::Path, basename: &str) -> std::path::PathBuf {
    dir.join(format!("metadata.{}", basename))
}

fn pin_path(dir: &std::path::Path, basename: &str) -> std::path::PathBuf {
    dir.join(format!("dfl-meta.{}", basename))
}

/// Direct membership scan over `record.versions` for `vid`/`svid` (`svid < 0`
/// is the "latest subversion of this vid" wildcard). Unlike `selector::select`,
/// this never falls back to the head on a miss: a pin target must name a
/// version that actually exists.
fn find_exact(record: &Metadata, vid: u32, svid: i64) -> Option<&Version> {
    record.versions.iter().find(|v| {
        v.vid == vid && (svid < 0 || v.svid == svid as u32)
    })
}

/// `getxattr("rcs.locked_version")`: `"<vid>.<svid>"` of the active pin, or
/// of the head version when unpinned.
pub fn get_locked_version(ctx: &Context, vpath: &str) -> Result<String> {
    let record = resolver::translate_to_metadata(ctx, vpath)?;
    let v = selector::select(&record, VersionQuery::Latest, false)
        .ok_or(RvfsError::NoSuchEntry)?;
    Ok(format!("{}.{}", v.vid, v.svid))
}

/// `setxattr("rcs.locked_version", "<vid>.<svid>")`. `(-1, -1)` clears the
/// pin. Requires the caller's uid to match the target version's uid, or 0.
pub fn set_locked_version(
    ctx: &Context,
    vpath: &str,
    value: &str,
    caller_uid: u32,
) -> Result<()> {
    let (vid_s, svid_s) = value.split_once('.').ok_or(RvfsError::InvalidArgument)?;
    let vid: i64 = vid_s.parse().map_err(|_| RvfsError::InvalidArgument)?;
    let svid: i64 = svid_s.parse().map_err(|_| RvfsError::InvalidArgument)?;

    let (dir_vpath, basename) = path::split_dir_base(vpath);
    let dir = resolver::resolve(ctx, &dir_vpath)?;
    let mut record = resolver::translate_to_metadata(ctx, vpath)?;

    let new_pin = if vid < 0 {
        None
    } else {
        let target = find_exact(&record, vid as u32, svid).ok_or(RvfsError::InvalidArgument)?;
        if caller_uid != 0 && caller_uid != target.uid {
            return Err(RvfsError::PermissionDenied);
        }
        Some(Pin {
            vid: vid as u32,
            svid: if svid < 0 {
                SvidQuery::Latest
            } else {
                SvidQuery::Exact(svid as u32)
            },
        })
    };

    record.pin = new_pin;
    codec::write_pin(&pin_path(&dir, &basename), record.pin)?;
    ctx.cache.add(record);
    Ok(())
}

fn stat_fields(v: &Version) -> (u32, i64, i64) {
    match fs::symlink_metadata(&v.rfile) {
        Ok(meta) => {
            let type_bits = meta.mode() & libc::S_IFMT;
            (
                type_bits | v.mode,
                meta.len() as i64,
                meta.mtime(),
            )
        }
        Err(_) => (libc::S_IFREG | v.mode, 0, UNIX_EPOCH.elapsed().map(|d| d.as_secs() as i64).unwrap_or(0)),
    }
}

/// `getxattr("rcs.metadata_dump")`: `|`-joined per-version records,
/// `<vid>:<svid>:<mode>:<uid>:<gid>:<size>:<mtime>`, newest first.
pub fn metadata_dump(ctx: &Context, vpath: &str) -> Result<String> {
    let record = resolver::translate_to_metadata(ctx, vpath)?;
    render_dump(&record)
}

fn render_dump(record: &Metadata) -> Result<String> {
    const MAX_DUMP_BYTES: usize = 1 << 20;
    let mut out = String::new();
    for (i, v) in record.versions.iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        let (mode, size, mtime) = stat_fields(v);
        out.push_str(&format!(
            "{}:{}:{}:{}:{}:{}:{}",
            v.vid, v.svid, mode, v.uid, v.gid, size, mtime
        ));
        if out.len() > MAX_DUMP_BYTES {
            return Err(RvfsError::OutOfMemory);
        }
    }
    Ok(out)
}

/// `setxattr("rcs.purge", ...)`. `"A"` purges every version (and removes the
/// file entirely); a decimal `n` keeps the newest `V - n` versions. See
/// DESIGN.md for the inclusive cut-point decision.
pub fn purge(ctx: &Context, vpath: &str, value: &str) -> Result<()> {
    let (dir_vpath, basename) = path::split_dir_base(vpath);
    let dir = resolver::resolve(ctx, &dir_vpath)?;
    let mut record = resolver::translate_to_metadata(ctx, vpath)?;

    let total = record.versions.len();
    let keep = if value.trim() == "A" {
        0
    } else {
        let n: usize = value.trim().parse().map_err(|_| RvfsError::InvalidArgument)?;
        total.saturating_sub(n)
    };

    let (kept, purged) = record.versions.split_at(keep.min(total));
    let kept = kept.to_vec();
    let purged = purged.to_vec();

    if kept.is_empty() {
        for v in &purged {
            let _ = fs::remove_file(&v.rfile);
        }
        let _ = fs::remove_file(metadata_path(&dir, &basename));
        let _ = fs::remove_file(pin_path(&dir, &basename));
        ctx.cache.drop_entry(vpath);
        return Ok(());
    }

    for v in &purged {
        let _ = fs::remove_file(&v.rfile);
    }
    record.versions = kept;
    if let Some(pin) = record.pin {
        if !record.versions.iter().any(|v| v.vid == pin.vid) {
            record.pin = None;
        }
    }
    codec::write_metadata(&metadata_path(&dir, &basename), &record.versions, record.deleted)?;
    codec::write_pin(&pin_path(&dir, &basename), record.pin)?;
    ctx.cache.add(record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::creation;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn ctx_for(dir: &std::path::Path) -> Context {
        fs::write(dir.join("metadata."), "1:0:0755:0:0:\n").unwrap();
        Context::new(Config::from_path(dir.to_path_buf()).unwrap())
    }

    #[test]
    fn locked_version_roundtrip() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        creation::new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        std::thread::sleep(Duration::from_millis(1100));
        creation::new_version(&ctx, "/a", 1000, 1000, 0o644, true).unwrap();

        set_locked_version(&ctx, "/a", "1.0", 1000).unwrap();
        assert_eq!(get_locked_version(&ctx, "/a").unwrap(), "1.0");

        set_locked_version(&ctx, "/a", "-1.-1", 1000).unwrap();
        assert_eq!(get_locked_version(&ctx, "/a").unwrap(), "2.0");
    }

    #[test]
    fn locked_version_rejects_other_uid() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        creation::new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        assert!(matches!(
            set_locked_version(&ctx, "/a", "1.0", 2000),
            Err(RvfsError::PermissionDenied)
        ));
    }

    #[test]
    fn purge_keeps_newest_n() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        creation::new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        for _ in 0..4 {
            std::thread::sleep(Duration::from_millis(1100));
            creation::new_version(&ctx, "/a", 1000, 1000, 0o644, true).unwrap();
        }
        purge(&ctx, "/a", "3").unwrap();
        let record = resolver::translate_to_metadata(&ctx, "/a").unwrap();
        assert_eq!(record.versions.len(), 2);
        assert_eq!(record.versions[0].vid, 5);
    }

    #[test]
    fn purge_all_removes_file() {
        let dir = tempdir().unwrap();
        let ctx = ctx_for(dir.path());
        creation::new_file(&ctx, "/a", 1000, 1000, 0o644).unwrap();
        purge(&ctx, "/a", "A").unwrap();
        assert!(matches!(
            resolver::translate_to_metadata(&ctx, "/a"),
            Err(RvfsError::NoSuchEntry)
        ));
    }
}
