//! Metadata and pin file wire formats.
//!
//! Metadata file, one line per version, oldest first:
//!   `<vid>:<svid>:<mode-octal-4digits>:<uid>:<gid>:<basename>\n`
//! A trailing `0:0:0000:0:0:\n` marks the file deleted.
//!
//! Pin (default-version) file: a single `<vid>.<svid>\n` line; absence means
//! no pin.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::err::Result;
use crate::model::{Pin, SvidQuery, Version};

struct ParsedLine {
    vid: u32,
    svid: u32,
    mode: u32,
    uid: u32,
    gid: u32,
    basename: String,
}

fn parse_version_line(line: &str) -> Option<ParsedLine> {
    let mut parts = line.splitn(6, ':');
    let vid = parts.next()?.parse().ok()?;
    let svid = parts.next()?.parse().ok()?;
    let mode = u32::from_str_radix(parts.next()?, 8).ok()?;
    let uid = parts.next()?.parse().ok()?;
    let gid = parts.next()?.parse().ok()?;
    let basename = parts.next()?.to_string();
    Some(ParsedLine {
        vid,
        svid,
        mode,
        uid,
        gid,
        basename,
    })
}

/// Parsed contents of a metadata file, before `rfile` paths are rewritten
/// against a real base directory.
pub struct ParsedMetadata {
    pub versions: Vec<Version>,
    pub deleted: bool,
}

/// Parse a metadata file's raw text. Malformed lines are skipped, matching
/// the original's best-effort recovery policy.
pub fn parse_metadata(contents: &str) -> ParsedMetadata {
    let mut versions = Vec::new();
    let mut deleted = false;
    for line in contents.lines() {
        let Some(p) = parse_version_line(line) else {
            continue;
        };
        if p.vid == 0 {
            deleted = true;
            continue;
        }
        versions.insert(
            0,
            Version {
                vid: p.vid,
                svid: p.svid,
                mode: p.mode & 0o7777,
                uid: p.uid,
                gid: p.gid,
                rfile: PathBuf::from(p.basename),
            },
        );
    }
    ParsedMetadata { versions, deleted }
}

/// Read and parse a metadata file; absence is reported as `Ok(None)`.
pub fn read_metadata(path: &Path) -> Result<Option<ParsedMetadata>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_metadata(&contents))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Render a metadata file's contents, oldest version first, appending the
/// deletion sentinel when `deleted` is set. `versions` is expected newest
/// first (the in-memory order) and is written in reverse.
pub fn render_metadata(versions: &[Version], deleted: bool) -> String {
    let mut out = String::new();
    for v in versions.iter().rev() {
        let basename = v
            .rfile
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        out.push_str(&format!(
            "{}:{}:{:04o}:{}:{}:{}\n",
            v.vid, v.svid, v.mode, v.uid, v.gid, basename
        ));
    }
    if deleted {
        out.push_str("0:0:0000:0:0:\n");
    }
    out
}

/// Write a metadata file, replacing any existing contents.
pub fn write_metadata(path: &Path, versions: &[Version], deleted: bool) -> Result<()> {
    let rendered = render_metadata(versions, deleted);
    let mut f = fs::File::create(path)?;
    f.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Parse a pin file's raw text; a malformed line is treated as absence,
/// matching the original C source.
pub fn parse_pin(contents: &str) -> Option<Pin> {
    let line = contents.lines().next()?;
    let (vid_s, svid_s) = line.split_once('.')?;
    let vid: i64 = vid_s.parse().ok()?;
    let svid: i64 = svid_s.parse().ok()?;
    if vid < 0 {
        return None;
    }
    let svid = if svid < 0 {
        SvidQuery::Latest
    } else {
        SvidQuery::Exact(svid as u32)
    };
    Some(Pin {
        vid: vid as u32,
        svid,
    })
}

/// Read and parse a pin file; absence or malformed contents are both `None`.
pub fn read_pin(path: &Path) -> Result<Option<Pin>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_pin(&contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write the pin file, or remove it entirely when `pin` is `None`.
pub fn write_pin(path: &Path, pin: Option<Pin>) -> Result<()> {
    match pin {
        None => match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        },
        Some(p) => {
            let svid = match p.svid {
                SvidQuery::Latest => -1i64,
                SvidQuery::Exact(s) => s as i64,
            };
            let mut f = fs::File::create(path)?;
            writeln!(f, "{}.{}", p.vid, svid)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_roundtrip() {
        let versions = vec![
            Version {
                vid: 2,
                svid: 0,
                mode: 0o644,
                uid: 1000,
                gid: 1000,
                rfile: PathBuf::from("00000002.c"),
            },
            Version {
                vid: 1,
                svid: 1,
                mode: 0o600,
                uid: 1000,
                gid: 1000,
                rfile: PathBuf::from("00000001.c"),
            },
        ];
        let rendered = render_metadata(&versions, false);
        let parsed = parse_metadata(&rendered);
        assert_eq!(parsed.versions.len(), 2);
        assert_eq!(parsed.versions[0].vid, 2);
        assert_eq!(parsed.versions[1].svid, 1);
        assert!(!parsed.deleted);
    }

    #[test]
    fn deleted_sentinel_roundtrips() {
        let rendered = render_metadata(&[], true);
        assert_eq!(rendered, "0:0:0000:0:0:\n");
        let parsed = parse_metadata(&rendered);
        assert!(parsed.deleted);
        assert!(parsed.versions.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let parsed = parse_metadata("not-a-line\n1:0:0644:1000:1000:x\n");
        assert_eq!(parsed.versions.len(), 1);
    }

    #[test]
    fn pin_roundtrip() {
        let pin = Pin {
            vid: 3,
            svid: SvidQuery::Exact(1),
        };
        let text = {
            let svid = 1i64;
            format!("{}.{}\n", pin.vid, svid)
        };
        let parsed = parse_pin(&text).unwrap();
        assert_eq!(parsed.vid, 3);
        assert_eq!(parsed.svid, SvidQuery::Exact(1));
    }

    #[test]
    fn pin_latest_sub_parses() {
        let parsed = parse_pin("5.-1\n").unwrap();
        assert_eq!(parsed.vid, 5);
        assert_eq!(parsed.svid, SvidQuery::Latest);
    }

    #[test]
    fn pin_absent_or_malformed_is_none() {
        assert!(parse_pin("garbage").is_none());
        assert!(parse_pin("-1.-1\n").is_none());
    }
}
