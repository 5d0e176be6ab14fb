//! Wildcard matching for a single path component.
//!
//! The dialect is deliberately small:
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - everything else matches itself
//!
//! Matching is anchored at both ends and never sees a directory separator;
//! crossing directory levels is the traversal engine's job (`**`).

/// Whether names starting with `.` take part in wildcard matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiddenFiles {
    /// `.` is an ordinary character: `*` matches `.profile`.
    #[default]
    Include,
    /// Shell convention: a dotfile is only matched by a segment that itself
    /// starts with a literal `.`, and `**` never descends into one.
    Exclude,
}

/// Case sensitivity of the host filesystem's usual configuration.
pub fn host_case_sensitive() -> bool {
    !cfg!(any(windows, target_os = "macos"))
}

/// Check if a string contains wildcard tokens (`*` or `?`).
///
/// ```
/// use globber::contains_wildcard;
/// assert!(contains_wildcard("*.rs"));
/// assert!(contains_wildcard("file?.txt"));
/// assert!(!contains_wildcard("src/main.rs"));
/// ```
pub fn contains_wildcard(s: &str) -> bool {
    s.contains(['*', '?'])
}

/// Match one path component against a wildcard pattern.
///
/// Star backtracking is iterative: on a mismatch the most recent `*` absorbs
/// one more character and matching resumes after it. Earlier stars never need
/// revisiting, so the worst case is `O(pattern × name)`.
///
/// # Examples
/// ```
/// use globber::wildcard_match;
///
/// assert!(wildcard_match("*.rs", "main.rs", true));
/// assert!(wildcard_match("a?.txt", "a1.txt", true));
/// assert!(!wildcard_match("a?.txt", "a12.txt", true));
/// assert!(wildcard_match("README*", "readme.md", false));
/// ```
pub fn wildcard_match(pattern: &str, name: &str, case_sensitive: bool) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0, 0);
    // (pattern index just past the star, name index the star resumes from)
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < name.len() {
        match pattern.get(pi) {
            Some('*') => {
                pi += 1;
                backtrack = Some((pi, ni));
                continue;
            }
            Some('?') => {
                pi += 1;
                ni += 1;
                continue;
            }
            Some(&c) if chars_eq(c, name[ni], case_sensitive) => {
                pi += 1;
                ni += 1;
                continue;
            }
            _ => {}
        }

        match backtrack {
            Some((star_pi, star_ni)) => {
                pi = star_pi;
                ni = star_ni + 1;
                backtrack = Some((star_pi, ni));
            }
            None => return false,
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}

/// Compare two whole names under the given case policy.
pub fn names_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.chars().count() == b.chars().count()
            && a.chars().zip(b.chars()).all(|(x, y)| chars_eq(x, y, false))
    }
}

fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}
