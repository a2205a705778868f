//! Virtual path splitting, joining and hashing.
//!
//! Mirrors `helper_split_to_array` / `helper_build_composite` / `helper_hash_string`
//! from the original C source, but replaces the variadic format-string join
//! with an explicit [`Piece`] sequence.

/// One element of a path-join request.
pub enum Piece<'a> {
    Literal(&'a str),
    Sep,
    Sequence(&'a [String]),
}

/// Split `path` on `sep`, dropping empty segments.
pub fn split(path: &str, sep: char) -> Vec<String> {
    path.split(sep)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Join `pieces` with `sep` inserted between adjacent literal/sequence pieces.
/// A `Piece::Sep` forces a separator at that point without requiring one on
/// either side, and two separators never collapse into `sep sep`.
pub fn join(pieces: &[Piece], sep: char) -> String {
    let mut out = String::new();
    let mut need_sep = false;
    for piece in pieces {
        match piece {
            Piece::Sep => {
                if !out.is_empty() && !out.ends_with(sep) {
                    out.push(sep);
                }
                need_sep = false;
            }
            Piece::Literal(s) => {
                if need_sep && !out.is_empty() {
                    out.push(sep);
                }
                out.push_str(s);
                need_sep = true;
            }
            Piece::Sequence(seq) => {
                for s in seq.iter() {
                    if need_sep && !out.is_empty() {
                        out.push(sep);
                    }
                    out.push_str(s);
                    need_sep = true;
                }
            }
        }
    }
    out
}

/// Join a sequence of components with `/`, producing `/a/b/c` (or `/` for empty).
pub fn join_components(components: &[String]) -> String {
    if components.is_empty() {
        return "/".to_string();
    }
    join(&[Piece::Sep, Piece::Sequence(components)], '/')
}

/// True iff `shortest` is a component-wise prefix of `longest`.
pub fn has_prefix(longest: &[String], shortest: &[String]) -> bool {
    if shortest.len() > longest.len() {
        return false;
    }
    longest.iter().zip(shortest.iter()).all(|(a, b)| a == b)
}

/// XOR-all-bytes hash, kept byte-for-byte compatible with the original C source so
/// bucket membership is deterministic across runs.
pub fn hash(s: &str) -> u8 {
    s.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Split a full virtual path into `(dirname, basename)`. `dirname` keeps the
/// leading `/`; the basename of `/` is the empty string.
pub fn split_dir_base(path: &str) -> (String, String) {
    match path.rfind('/') {
        Some(0) if path.len() == 1 => ("/".to_string(), String::new()),
        Some(idx) => {
            let dir = if idx == 0 { "/" } else { &path[..idx] };
            (dir.to_string(), path[idx + 1..].to_string())
        }
        None => ("/".to_string(), path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(split("/a//b/c/", '/'), vec!["a", "b", "c"]);
        assert_eq!(split("", '/'), Vec::<String>::new());
    }

    #[test]
    fn join_components_roundtrips_split() {
        let comps = split("/a/b/c", '/');
        assert_eq!(join_components(&comps), "/a/b/c");
        assert_eq!(join_components(&[]), "/");
    }

    #[test]
    fn prefix_check() {
        let long = split("/a/b/c", '/');
        let short = split("/a/b", '/');
        assert!(has_prefix(&long, &short));
        assert!(!has_prefix(&short, &long));
    }

    #[test]
    fn hash_is_xor_of_bytes() {
        assert_eq!(hash("ab"), b'a' ^ b'b');
        assert_eq!(hash(""), 0);
    }

    #[test]
    fn dir_base_split() {
        assert_eq!(split_dir_base("/a/b/c"), ("/a/b".to_string(), "c".to_string()));
        assert_eq!(split_dir_base("/"), ("/".to_string(), String::new()));
    }
}
