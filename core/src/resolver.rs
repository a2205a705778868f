//! Virtual-path to real-path translation, populating the metadata cache as
//! it walks. Mirrors `rcs_translate_path` / `rcs_translate_to_metadata` from
//! the original C source.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::codec;
use crate::context::Context;
use crate::err::{Result, RvfsError};
use crate::model::{Metadata, Version, VersionQuery};
use crate::path;
use crate::selector;

fn metadata_file_name(base: &Path, basename: &str) -> PathBuf {
    base.join(format!("metadata.{}", basename))
}

fn pin_file_name(base: &Path, basename: &str) -> PathBuf {
    base.join(format!("dfl-meta.{}", basename))
}

/// Load the root record, either from cache or by bootstrapping it from
/// `<root>/metadata.` and `<root>/dfl-meta.`.
fn load_root(ctx: &Context) -> Result<Metadata> {
    if let Some(record) = ctx.cache.get("/") {
        return Ok(record);
    }
    let parsed = codec::read_metadata(&metadata_file_name(&ctx.root, ""))?
        .ok_or(RvfsError::NoSuchEntry)?;
    let pin = codec::read_pin(&pin_file_name(&ctx.root, ""))?;
    let versions = parsed
        .versions
        .into_iter()
        .map(|v| Version {
            rfile: ctx.root.clone(),
            ..v
        })
        .collect();
    let record = Metadata {
        vpath: "/".to_string(),
        versions,
        deleted: parsed.deleted,
        pin,
        timestamp: SystemTime::now(),
    };
    ctx.cache.add(record.clone());
    Ok(record)
}

/// Load one level of the walk: the child named `basename` inside the real
/// directory `base`, for the virtual path `vpath`.
fn load_level(base: &Path, basename: &str, vpath: &str) -> Result<Option<Metadata>> {
    let Some(parsed) = codec::read_metadata(&metadata_file_name(base, basename))? else {
        return Ok(None);
    };
    let pin = codec::read_pin(&pin_file_name(base, basename))?;
    let versions = parsed
        .versions
        .into_iter()
        .map(|v| {
            let name = v
                .rfile
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Version {
                rfile: base.join(name),
                ..v
            }
        })
        .collect();
    Ok(Some(Metadata {
        vpath: vpath.to_string(),
        versions,
        deleted: parsed.deleted,
        pin,
        timestamp: SystemTime::now(),
    }))
}

/// Walk `components` starting from the longest cached prefix, returning the
/// fully resolved metadata record for the full path.
pub fn translate_to_metadata(ctx: &Context, vpath: &str) -> Result<Metadata> {
    if vpath == "/" {
        return load_root(ctx);
    }
    let components = path::split(vpath, '/');
    let (matched, prefix_record) = ctx.cache.find_maximal_match(&components);

    let prefix = if matched == 0 {
        load_root(ctx)?
    } else {
        prefix_record.expect("matched > 0 implies a cached record")
    };
    let mut base = selector::select(&prefix, VersionQuery::Latest, false)
        .map(|v| v.rfile.clone())
        .ok_or(RvfsError::NoSuchEntry)?;

    let mut last = prefix;
    let last_idx = components.len() - 1;
    for (idx, component) in components.iter().enumerate().skip(matched) {
        let child_vpath = path::join_components(&components[..=idx]);
        let record =
            load_level(&base, component, &child_vpath)?.ok_or(RvfsError::NoSuchEntry)?;
        ctx.cache.add(record.clone());
        if idx < last_idx {
            // Need a real directory to descend into; a deleted or dangling
            // intermediate component makes the rest of the path unreachable.
            let selected = selector::select(&record, VersionQuery::Latest, false)
                .ok_or(RvfsError::NoSuchEntry)?
                .clone();
            base = selected.rfile;
        }
        last = record;
    }
    Ok(last)
}

/// Translate a virtual path to the real path of its effective version.
pub fn resolve(ctx: &Context, vpath: &str) -> Result<PathBuf> {
    let record = translate_to_metadata(ctx, vpath)?;
    selector::select(&record, VersionQuery::Latest, false)
        .map(|v| v.rfile.clone())
        .ok_or(RvfsError::NoSuchEntry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    fn make_store() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("metadata."), "1:0:0755:0:0:\n").unwrap();
        fs::write(
            dir.path().join("metadata.a"),
            "1:0:0755:1000:1000:00000001.a\n",
        )
        .unwrap();
        let real_a = dir.path().join("00000001.a");
        fs::create_dir_all(&real_a).unwrap();
        fs::write(real_a.join("metadata.c"), "1:0:0644:1000:1000:00000001.c\n").unwrap();
        fs::write(real_a.join("00000001.c"), b"hello").unwrap();
        dir
    }

    #[test]
    fn resolves_nested_path() {
        let dir = make_store();
        let ctx = Context::new(Config::from_path(dir.path().to_path_buf()).unwrap());
        let real = resolve(&ctx, "/a/c").unwrap();
        assert_eq!(fs::read_to_string(&real).unwrap(), "hello");
    }

    #[test]
    fn missing_component_is_no_such_entry() {
        let dir = make_store();
        let ctx = Context::new(Config::from_path(dir.path().to_path_buf()).unwrap());
        assert!(matches!(resolve(&ctx, "/a/zzz"), Err(RvfsError::NoSuchEntry)));
    }
}
