//! Bucketed metadata cache. Each bucket is an independent `lru::LruCache`
//! keyed by full virtual path.

use std::sync::Mutex;

use lru::LruCache;

use crate::model::Metadata;
use crate::path;

const BUCKETS: usize = 128;
const SOFT_LIMIT: usize = 256;

struct Bucket {
    lru: Mutex<LruCache<String, Metadata>>,
}

impl Bucket {
    fn new() -> Self {
        Self {
            lru: Mutex::new(LruCache::unbounded()),
        }
    }
}

pub struct MetadataCache {
    buckets: Vec<Bucket>,
}

impl MetadataCache {
    pub fn new() -> Self {
        let mut buckets = Vec::with_capacity(BUCKETS);
        for _ in 0..BUCKETS {
            buckets.push(Bucket::new());
        }
        Self { buckets }
    }

    fn bucket_for(&self, vpath: &str) -> &Bucket {
        let idx = (path::hash(vpath) as usize) % BUCKETS;
        &self.buckets[idx]
    }

    /// Look up by full virtual path, promoting to bucket-MRU on hit.
    pub fn get(&self, vpath: &str) -> Option<Metadata> {
        let bucket = self.bucket_for(vpath);
        let mut lru = bucket.lru.lock().unwrap();
        lru.get(vpath).cloned()
    }

    /// Insert at the bucket head. Callers must avoid double-insertion;
    /// `put` silently replaces an existing entry for the same path.
    pub fn add(&self, record: Metadata) {
        let bucket = self.bucket_for(&record.vpath);
        let mut lru = bucket.lru.lock().unwrap();
        lru.put(record.vpath.clone(), record);
        drop(lru);
        self.cleanup_if_needed();
    }

    pub fn drop_entry(&self, vpath: &str) {
        let bucket = self.bucket_for(vpath);
        let mut lru = bucket.lru.lock().unwrap();
        lru.pop(vpath);
    }

    fn total_len(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.lru.lock().unwrap().len())
            .sum()
    }

    /// When the global item count reaches the soft limit, halve every
    /// bucket's contents, evicting least-recently-used first (see DESIGN.md).
    fn cleanup_if_needed(&self) {
        if self.total_len() < SOFT_LIMIT {
            return;
        }
        for bucket in &self.buckets {
            let mut lru = bucket.lru.lock().unwrap();
            let target = lru.len() / 2;
            while lru.len() > target {
                if lru.pop_lru().is_none() {
                    break;
                }
            }
        }
    }

    /// Given an ordered sequence of path components, return the largest `k`
    /// such that the record for the join of the first `k` components is
    /// cached, together with that record. The root (`k = 0`) is always a
    /// candidate.
    pub fn find_maximal_match(&self, components: &[String]) -> (usize, Option<Metadata>) {
        for k in (0..=components.len()).rev() {
            let vpath = path::join_components(&components[..k]);
            if let Some(record) = self.get(&vpath) {
                return (k, Some(record));
            }
        }
        (0, None)
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metadata;

    fn record(vpath: &str) -> Metadata {
        Metadata::new_empty(vpath)
    }

    #[test]
    fn get_after_add_promotes_to_head() {
        let cache = MetadataCache::new();
        cache.add(record("/a/b"));
        assert!(cache.get("/a/b").is_some());
        assert!(cache.get("/nope").is_none());
    }

    #[test]
    fn find_maximal_match_picks_longest_cached_prefix() {
        let cache = MetadataCache::new();
        cache.add(record("/"));
        cache.add(record("/a"));
        let comps = path::split("/a/b/c", '/');
        let (k, rec) = cache.find_maximal_match(&comps);
        assert_eq!(k, 1);
        assert_eq!(rec.unwrap().vpath, "/a");
    }

    #[test]
    fn drop_removes_entry() {
        let cache = MetadataCache::new();
        cache.add(record("/x"));
        cache.drop_entry("/x");
        assert!(cache.get("/x").is_none());
    }

    #[test]
    fn cleanup_halves_each_bucket_at_soft_limit() {
        let cache = MetadataCache::new();
        for i in 0..SOFT_LIMIT {
            cache.add(record(&format!("/f{}", i)));
        }
        assert!(cache.total_len() < SOFT_LIMIT);
    }
}
