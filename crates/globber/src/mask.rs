//! Mask compilation: root prefix plus per-segment patterns.
//!
//! A mask such as `src/lib/**/*.rs` is split into
//!
//! - the **root prefix** `src/lib/`: the longest leading run of whole
//!   segments with no wildcard, where traversal starts, and
//! - the **pattern segments** `**`, `*.rs`: matched one directory level at a
//!   time below the root.
//!
//! Literal segments after the first wildcard stay in the pattern; they are
//! never folded back into the prefix.

use std::path::MAIN_SEPARATOR;
use thiserror::Error;

use crate::pattern::{contains_wildcard, names_eq, wildcard_match, HiddenFiles};

/// Errors when compiling a mask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty mask")]
    Empty,
}

/// One component of the pattern part of a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Name without wildcards: "src", "main.rs"
    Literal(String),
    /// Name with `*` or `?`: "*.rs", "test_?"
    Wildcard(String),
    /// `**`: zero or more directory levels
    Globstar,
}

impl Segment {
    fn parse(part: &str) -> Self {
        if part == "**" {
            Segment::Globstar
        } else if contains_wildcard(part) {
            Segment::Wildcard(part.to_string())
        } else {
            Segment::Literal(part.to_string())
        }
    }

    /// Check whether a directory entry name matches this segment.
    ///
    /// `.` and `..` never match. Under `HiddenFiles::Exclude`, names starting
    /// with `.` only match literals and wildcards that start with `.` too.
    pub fn matches(&self, name: &str, hidden: HiddenFiles, case_sensitive: bool) -> bool {
        if name == "." || name == ".." {
            return false;
        }
        let concealed = hidden == HiddenFiles::Exclude && name.starts_with('.');
        match self {
            Segment::Literal(lit) => names_eq(lit, name, case_sensitive),
            Segment::Wildcard(pat) => {
                if concealed && !pat.starts_with('.') {
                    return false;
                }
                wildcard_match(pat, name, case_sensitive)
            }
            Segment::Globstar => !concealed,
        }
    }
}

/// A compiled glob mask.
///
/// # Examples
/// ```
/// use globber::{Mask, Segment};
///
/// let mask = Mask::parse("src/lib/**/*.rs").unwrap();
/// assert_eq!(mask.root_prefix(), "src/lib/");
/// assert_eq!(
///     mask.segments(),
///     &[Segment::Globstar, Segment::Wildcard("*.rs".into())]
/// );
///
/// let mask = Mask::parse("*.txt").unwrap();
/// assert_eq!(mask.root_prefix(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    raw: String,
    root: String,
    segments: Vec<Segment>,
    separator: char,
    dirs_only: bool,
}

impl Mask {
    /// Compile a mask.
    ///
    /// Both `/` and, on Windows, `\` separate segments. Runs of separators
    /// count as one. A trailing separator restricts matches to directories.
    pub fn parse(mask: &str) -> Result<Self, PatternError> {
        if mask.is_empty() {
            return Err(PatternError::Empty);
        }

        let anchor = anchor_len(mask);
        let rest = &mask[anchor..];
        let parts = split_parts(rest);

        let literal_count = parts
            .iter()
            .take_while(|(start, end)| !contains_wildcard(&rest[*start..*end]))
            .count();

        let (root, segments) = if literal_count == parts.len() {
            (mask.to_string(), Vec::new())
        } else {
            let root = mask[..anchor + parts[literal_count].0].to_string();
            let mut segments: Vec<Segment> = Vec::new();
            for (start, end) in &parts[literal_count..] {
                let segment = Segment::parse(&rest[*start..*end]);
                // Consecutive globstars collapse to one
                if segment == Segment::Globstar && segments.last() == Some(&Segment::Globstar) {
                    continue;
                }
                segments.push(segment);
            }
            (root, segments)
        };

        Ok(Mask {
            raw: mask.to_string(),
            root,
            segments,
            separator: mask.chars().find(|c| is_separator(*c)).unwrap_or(MAIN_SEPARATOR),
            dirs_only: !rest.is_empty() && rest.ends_with(is_separator),
        })
    }

    /// The mask as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Leading wildcard-free part, ending in a separator when non-empty.
    ///
    /// For a mask without any wildcard this is the whole mask.
    pub fn root_prefix(&self) -> &str {
        &self.root
    }

    /// Pattern segments below the root prefix; empty for a literal mask.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True if the mask has no wildcards at all.
    pub fn is_literal(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any pattern segment is `**`.
    pub fn has_globstar(&self) -> bool {
        self.segments.contains(&Segment::Globstar)
    }

    /// Separator used when joining matched names onto the root prefix.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// True if the mask ended in a separator.
    pub fn dirs_only(&self) -> bool {
        self.dirs_only
    }
}

/// Check if a character separates path segments on this host.
pub fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// Length of the part that anchors a mask: drive prefix and leading separators.
fn anchor_len(mask: &str) -> usize {
    let bytes = mask.as_bytes();
    let mut len = 0;
    if cfg!(windows) && bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        len = 2;
    }
    len + mask[len..]
        .chars()
        .take_while(|c| is_separator(*c))
        .map(char::len_utf8)
        .sum::<usize>()
}

/// Byte ranges of the non-empty segments in `s`.
fn split_parts(s: &str) -> Vec<(usize, usize)> {
    let mut parts = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        if is_separator(c) {
            if let Some(begin) = start.take() {
                parts.push((begin, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(begin) = start {
        parts.push((begin, s.len()));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wild(s: &str) -> Segment {
        Segment::Wildcard(s.to_string())
    }

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    #[test]
    fn test_empty_mask() {
        assert_eq!(Mask::parse(""), Err(PatternError::Empty));
    }

    #[test]
    fn test_root_prefix_stops_at_first_wildcard() {
        let mask = Mask::parse("dir/sub*/*.txt").unwrap();
        assert_eq!(mask.root_prefix(), "dir/");
        assert_eq!(mask.segments(), &[wild("sub*"), wild("*.txt")]);
    }

    #[test]
    fn test_literals_after_wildcard_stay_in_pattern() {
        let mask = Mask::parse("a/*/b/c/*.rs").unwrap();
        assert_eq!(mask.root_prefix(), "a/");
        assert_eq!(
            mask.segments(),
            &[wild("*"), lit("b"), lit("c"), wild("*.rs")]
        );
    }

    #[test]
    fn test_leading_wildcard_has_empty_root() {
        let mask = Mask::parse("*.txt").unwrap();
        assert_eq!(mask.root_prefix(), "");
        assert_eq!(mask.segments(), &[wild("*.txt")]);

        let mask = Mask::parse("**/*.log").unwrap();
        assert_eq!(mask.root_prefix(), "");
        assert_eq!(mask.segments(), &[Segment::Globstar, wild("*.log")]);
    }

    #[test]
    fn test_absolute_mask_keeps_anchor() {
        let mask = Mask::parse("/usr/*/bin").unwrap();
        assert_eq!(mask.root_prefix(), "/usr/");
        assert_eq!(mask.segments(), &[wild("*"), lit("bin")]);

        let mask = Mask::parse("/*").unwrap();
        assert_eq!(mask.root_prefix(), "/");
    }

    #[test]
    fn test_literal_mask() {
        let mask = Mask::parse("src/main.rs").unwrap();
        assert!(mask.is_literal());
        assert_eq!(mask.root_prefix(), "src/main.rs");
        assert!(mask.segments().is_empty());
    }

    #[test]
    fn test_repeated_separators() {
        let mask = Mask::parse("a//b/*").unwrap();
        assert_eq!(mask.root_prefix(), "a//b/");
        assert_eq!(mask.segments(), &[wild("*")]);
    }

    #[test]
    fn test_consecutive_globstars_collapse() {
        let mask = Mask::parse("a/**/**/z").unwrap();
        assert_eq!(mask.segments(), &[Segment::Globstar, lit("z")]);
        assert!(mask.has_globstar());
    }

    #[test]
    fn test_embedded_double_star_is_a_wildcard() {
        let mask = Mask::parse("a**b/x").unwrap();
        assert_eq!(mask.segments(), &[wild("a**b"), lit("x")]);
        assert!(!mask.has_globstar());
    }

    #[test]
    fn test_trailing_separator_means_dirs() {
        assert!(Mask::parse("src/*/").unwrap().dirs_only());
        assert!(!Mask::parse("src/*").unwrap().dirs_only());
        assert!(!Mask::parse("/").unwrap().dirs_only());
    }

    #[test]
    fn test_separator_follows_mask() {
        assert_eq!(Mask::parse("a/*").unwrap().separator(), '/');
        assert_eq!(Mask::parse("*").unwrap().separator(), MAIN_SEPARATOR);
    }

    #[test]
    fn test_segment_matching() {
        let star = wild("*");
        assert!(star.matches("main.rs", HiddenFiles::Include, true));
        assert!(star.matches(".hidden", HiddenFiles::Include, true));
        assert!(!star.matches(".hidden", HiddenFiles::Exclude, true));
        assert!(!star.matches(".", HiddenFiles::Include, true));
        assert!(!star.matches("..", HiddenFiles::Include, true));

        assert!(wild(".*").matches(".hidden", HiddenFiles::Exclude, true));
        assert!(lit(".git").matches(".git", HiddenFiles::Exclude, true));
        assert!(!Segment::Globstar.matches(".git", HiddenFiles::Exclude, true));
        assert!(Segment::Globstar.matches(".git", HiddenFiles::Include, true));

        assert!(lit("Makefile").matches("makefile", HiddenFiles::Include, false));
        assert!(!lit("Makefile").matches("makefile", HiddenFiles::Include, true));
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_separators_and_drive() {
        let mask = Mask::parse(r"C:\src\*.rs").unwrap();
        assert_eq!(mask.root_prefix(), r"C:\src\");
        assert_eq!(mask.separator(), '\\');

        let mask = Mask::parse(r"src/sub\*.rs").unwrap();
        assert_eq!(mask.root_prefix(), r"src/sub\");
    }
}
