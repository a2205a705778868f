//! Version selection: given a metadata record and a query, pick the
//! effective version. Mirrors `rcs_find_version` from the original C source, with
//! the `rcs_ignore_deleted` global replaced by an explicit parameter.

use crate::model::{Metadata, SvidQuery, Version, VersionQuery};

/// Select the effective version for `record` under `query`. `see_deleted`
/// overrides the deletion check for callers that need to find a version of
/// a deleted file (e.g. to resurrect it).
pub fn select<'a>(
    record: &'a Metadata,
    query: VersionQuery,
    see_deleted: bool,
) -> Option<&'a Version> {
    let target = match query {
        VersionQuery::Latest => {
            if record.deleted && !see_deleted {
                return None;
            }
            match record.pin {
                None => return record.head(),
                Some(pin) => pin.as_query(),
            }
        }
        other => other,
    };

    let VersionQuery::At { vid, svid } = target else {
        unreachable!("Latest query was substituted above")
    };

    let had_pin = record.pin.is_some();

    let mut iter = record.versions.iter().skip_while(|v| v.vid > vid);
    let Some(first) = iter.next() else {
        return fallback(record, had_pin);
    };
    if first.vid != vid {
        return fallback(record, had_pin);
    }

    match svid {
        SvidQuery::Latest => Some(first),
        SvidQuery::Exact(target_svid) => {
            if first.svid <= target_svid {
                if first.svid == target_svid {
                    return Some(first);
                }
                return fallback(record, had_pin);
            }
            let mut rest = record
                .versions
                .iter()
                .skip_while(|v| v.vid > vid)
                .skip_while(|v| v.vid == vid && v.svid > target_svid);
            match rest.next() {
                Some(v) if v.vid == vid && v.svid == target_svid => Some(v),
                _ => fallback(record, had_pin),
            }
        }
    }
}

/// On a missed exact lookup, a pinned record silently falls back to the real
/// head (the original's dangling-pin recovery); an unpinned record has no
/// fallback.
fn fallback(record: &Metadata, had_pin: bool) -> Option<&Version> {
    if had_pin {
        record.head()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pin, Version};
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn v(vid: u32, svid: u32) -> Version {
        Version {
            vid,
            svid,
            mode: 0o644,
            uid: 0,
            gid: 0,
            rfile: PathBuf::from(format!("{:08X}.f", vid)),
        }
    }

    fn record(versions: Vec<Version>, pin: Option<Pin>, deleted: bool) -> Metadata {
        Metadata {
            vpath: "/f".into(),
            versions,
            deleted,
            pin,
            timestamp: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn latest_with_no_pin_returns_head() {
        let r = record(vec![v(2, 0), v(1, 0)], None, false);
        assert_eq!(select(&r, VersionQuery::Latest, false).unwrap().vid, 2);
    }

    #[test]
    fn deleted_hides_file_unless_see_deleted() {
        let r = record(vec![v(1, 0)], None, true);
        assert!(select(&r, VersionQuery::Latest, false).is_none());
        assert!(select(&r, VersionQuery::Latest, true).is_some());
    }

    #[test]
    fn pin_selects_exact_version() {
        let r = record(
            vec![v(2, 0), v(1, 1), v(1, 0)],
            Some(Pin {
                vid: 1,
                svid: crate::model::SvidQuery::Exact(0),
            }),
            false,
        );
        let selected = select(&r, VersionQuery::Latest, false).unwrap();
        assert_eq!(selected.key(), (1, 0));
    }

    #[test]
    fn dangling_pin_falls_back_to_head() {
        let r = record(
            vec![v(2, 0)],
            Some(Pin {
                vid: 1,
                svid: crate::model::SvidQuery::Latest,
            }),
            false,
        );
        let selected = select(&r, VersionQuery::Latest, false).unwrap();
        assert_eq!(selected.vid, 2);
    }

    #[test]
    fn pin_latest_sub_picks_newest_svid_of_vid() {
        let r = record(
            vec![v(2, 0), v(1, 1), v(1, 0)],
            Some(Pin {
                vid: 1,
                svid: crate::model::SvidQuery::Latest,
            }),
            false,
        );
        let selected = select(&r, VersionQuery::Latest, false).unwrap();
        assert_eq!(selected.key(), (1, 1));
    }
}
