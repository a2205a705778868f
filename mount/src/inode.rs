//! Maps FUSE inode numbers onto virtual paths. The core crate has no notion
//! of inodes (it works in terms of virtual paths throughout); this table is
//! purely adapter-side bookkeeping.

use std::collections::HashMap;

pub const ROOT_INODE: u64 = 1;

struct Entry {
    vpath: String,
    lookups: u64,
}

pub struct InodeTable {
    by_ino: HashMap<u64, Entry>,
    by_path: HashMap<String, u64>,
    next: u64,
}

impl InodeTable {
    pub fn new() -> Self {
        let mut by_ino = HashMap::new();
        by_ino.insert(
            ROOT_INODE,
            Entry {
                vpath: "/".to_string(),
                lookups: 1,
            },
        );
        let mut by_path = HashMap::new();
        by_path.insert("/".to_string(), ROOT_INODE);
        Self {
            by_ino,
            by_path,
            next: ROOT_INODE + 1,
        }
    }

    pub fn path_of(&self, ino: u64) -> Option<&str> {
        self.by_ino.get(&ino).map(|e| e.vpath.as_str())
    }

    /// Look up (or assign) the inode for `vpath`, bumping its lookup count.
    pub fn lookup(&mut self, vpath: &str) -> u64 {
        if let Some(&ino) = self.by_path.get(vpath) {
            self.by_ino.get_mut(&ino).unwrap().lookups += 1;
            return ino;
        }
        let ino = self.next;
        self.next += 1;
        self.by_ino.insert(
            ino,
            Entry {
                vpath: vpath.to_string(),
                lookups: 1,
            },
        );
        self.by_path.insert(vpath.to_string(), ino);
        ino
    }

    /// Decrement the lookup count by `n`; drop the mapping once it reaches
    /// zero (mirrors the kernel's reference-counted inode lifecycle).
    pub fn forget(&mut self, ino: u64, n: u64) {
        if ino == ROOT_INODE {
            return;
        }
        let Some(entry) = self.by_ino.get_mut(&ino) else {
            return;
        };
        entry.lookups = entry.lookups.saturating_sub(n);
        if entry.lookups == 0 {
            let vpath = entry.vpath.clone();
            self.by_ino.remove(&ino);
            self.by_path.remove(&vpath);
        }
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}
