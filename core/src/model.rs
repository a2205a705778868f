use std::path::PathBuf;
use std::time::SystemTime;

/// One revision of one virtual file.
#[derive(Debug, Clone)]
pub struct Version {
    pub vid: u32,
    pub svid: u32,
    /// Permission bits only (`mode & 0o7777`); type bits are never stored here.
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub rfile: PathBuf,
}

impl Version {
    pub fn key(&self) -> (u32, u32) {
        (self.vid, self.svid)
    }
}

/// Which subversion of a vid to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvidQuery {
    Latest,
    Exact(u32),
}

/// A pinned selector: either the most recent version, or a specific vid
/// (optionally a specific svid within it). Replaces the original's
/// `LATEST = -1` sentinel compared against unsigned fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionQuery {
    Latest,
    At { vid: u32, svid: SvidQuery },
}

/// A persisted pin (the contents of a `dfl-meta.*` file). `None` means no pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub vid: u32,
    pub svid: SvidQuery,
}

impl Pin {
    pub fn as_query(&self) -> VersionQuery {
        VersionQuery::At {
            vid: self.vid,
            svid: self.svid,
        }
    }
}

/// The record describing one virtual file or directory.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Full virtual path, e.g. `/a/b/c`; the root is `/`.
    pub vpath: String,
    /// Versions sorted strictly decreasing by `(vid, svid)`; head is newest.
    pub versions: Vec<Version>,
    pub deleted: bool,
    pub pin: Option<Pin>,
    pub timestamp: SystemTime,
}

impl Metadata {
    pub fn new_empty(vpath: impl Into<String>) -> Self {
        Self {
            vpath: vpath.into(),
            versions: Vec::new(),
            deleted: false,
            pin: None,
            timestamp: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn head(&self) -> Option<&Version> {
        self.versions.first()
    }

    pub fn head_vid(&self) -> u32 {
        self.head().map(|v| v.vid).unwrap_or(0)
    }

    /// Insert `v` at the head of the version list, keeping the decreasing
    /// order invariant (callers are expected to only ever push a version
    /// newer than the current head).
    pub fn push_version(&mut self, v: Version) {
        self.versions.insert(0, v);
    }

    pub fn basename(&self) -> &str {
        match self.vpath.rfind('/') {
            Some(idx) => &self.vpath[idx + 1..],
            None => &self.vpath,
        }
    }
}
