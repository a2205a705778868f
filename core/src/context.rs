//! The explicit, non-global value threaded through every public entry point,
//! replacing the original's process-global `version_store_root` and
//! `rcs_ignore_deleted`.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::cache::MetadataCache;
use crate::config::Config;

pub struct Context {
    pub root: PathBuf,
    pub cache: MetadataCache,
    request_lock: Mutex<()>,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            root: config.version_store_root,
            cache: MetadataCache::new(),
            request_lock: Mutex::new(()),
        }
    }

    /// Held for the duration of one POSIX callback, per the single-threaded
    /// cooperative servicing model.
    pub fn lock_request(&self) -> MutexGuard<'_, ()> {
        self.request_lock.lock().unwrap()
    }
}
