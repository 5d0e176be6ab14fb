//! Lazy glob traversal, generic over `GlobFs`.
//!
//! `Globber` is a pull-based iterator: each `next()` resumes the depth-first
//! walk exactly where the previous call stopped. The suspended state is the
//! frame stack, one frame per directory currently being enumerated.

use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::mask::{Mask, PatternError, Segment};
use crate::pattern::{host_case_sensitive, HiddenFiles};
use crate::{DirEntry, EntryKind, FsError, GlobFs};

/// Types of entries to include in glob results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTypes {
    /// Include regular files and other non-directories.
    pub files: bool,
    /// Include directories.
    pub dirs: bool,
}

impl EntryTypes {
    /// Include only files.
    pub fn files_only() -> Self {
        Self {
            files: true,
            dirs: false,
        }
    }

    /// Include only directories.
    pub fn dirs_only() -> Self {
        Self {
            files: false,
            dirs: true,
        }
    }

    /// Include both files and directories.
    pub fn all() -> Self {
        Self {
            files: true,
            dirs: true,
        }
    }

    fn admits(&self, kind: EntryKind) -> bool {
        match kind {
            EntryKind::Directory => self.dirs,
            EntryKind::File | EntryKind::Other => self.files,
        }
    }
}

impl Default for EntryTypes {
    fn default() -> Self {
        Self::all()
    }
}

/// Callback invoked when a non-fatal error occurs during traversal.
///
/// Receives the path where the error occurred and the error itself.
/// This allows callers to log or collect errors without aborting the glob.
pub type ErrorCallback = Arc<dyn Fn(&Path, &FsError) + Send + Sync>;

/// Matching policy for a glob.
pub struct GlobOptions {
    /// Whether dotfiles take part in wildcard matches.
    pub hidden: HiddenFiles,
    /// Compare names case-sensitively (defaults to the host convention).
    pub case_sensitive: bool,
    /// Let `**` descend through symlinked directories, with cycle detection.
    /// Named segments always follow symlinks regardless.
    pub follow_symlinks: bool,
    /// Optional callback for skipped entries and unreadable directories.
    pub on_error: Option<ErrorCallback>,
}

impl fmt::Debug for GlobOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobOptions")
            .field("hidden", &self.hidden)
            .field("case_sensitive", &self.case_sensitive)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("on_error", &self.on_error.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Clone for GlobOptions {
    fn clone(&self) -> Self {
        Self {
            hidden: self.hidden,
            case_sensitive: self.case_sensitive,
            follow_symlinks: self.follow_symlinks,
            on_error: self.on_error.clone(),
        }
    }
}

impl Default for GlobOptions {
    fn default() -> Self {
        Self {
            hidden: HiddenFiles::Include,
            case_sensitive: host_case_sensitive(),
            follow_symlinks: false,
            on_error: None,
        }
    }
}

/// Configuration for one glob call. Read-only once traversal starts.
#[derive(Debug, Clone)]
pub struct GlobContext {
    /// The mask to expand.
    pub mask: String,
    /// Directory relative masks resolve against. `None` means the
    /// filesystem's current directory, read once when traversal starts.
    /// Never prepended to yielded paths.
    pub root: Option<PathBuf>,
    /// Which kinds of entries to yield.
    pub entry_types: EntryTypes,
    /// Matching policy.
    pub options: GlobOptions,
}

impl GlobContext {
    /// Create a context yielding directories if `dirs_only`, else files.
    pub fn new(mask: impl Into<String>, dirs_only: bool) -> Self {
        Self {
            mask: mask.into(),
            root: None,
            entry_types: if dirs_only {
                EntryTypes::dirs_only()
            } else {
                EntryTypes::files_only()
            },
            options: GlobOptions::default(),
        }
    }

    /// Context for a `globfiles` call.
    pub fn files(mask: impl Into<String>) -> Self {
        Self::new(mask, false)
    }

    /// Context for a `globdirs` call.
    pub fn dirs(mask: impl Into<String>) -> Self {
        Self::new(mask, true)
    }

    /// Resolve relative masks against `root` instead of the current directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Override which entry kinds are yielded.
    pub fn with_entry_types(mut self, entry_types: EntryTypes) -> Self {
        self.entry_types = entry_types;
        self
    }

    /// Set matching options.
    pub fn with_options(mut self, options: GlobOptions) -> Self {
        self.options = options;
        self
    }
}

/// A path yielded by a glob, with what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMatch {
    /// The path as the mask spells it: root prefix plus matched names.
    pub path: String,
    pub kind: EntryKind,
}

impl GlobMatch {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn into_path(self) -> PathBuf {
        PathBuf::from(self.path)
    }
}

impl fmt::Display for GlobMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// One directory being enumerated.
struct Frame {
    /// Where the directory lives on the filesystem.
    fs_path: PathBuf,
    /// How yielded paths below this directory are spelled, ending in a separator
    /// (or empty at an unanchored root).
    display: String,
    /// Remaining entries, sorted by name.
    entries: std::vec::IntoIter<DirEntry>,
    /// Live pattern positions, sorted and deduplicated; never the accept position.
    states: Vec<usize>,
    /// Resolved location, recorded only when following symlinks.
    canonical: Option<PathBuf>,
}

/// Outcome of feeding one entry to the pattern automaton.
struct Step {
    /// The entry matches the whole pattern.
    accept: bool,
    /// Positions reachable through a named segment.
    named: Vec<usize>,
    /// Positions reachable only by `**` absorbing this entry.
    starred: Vec<usize>,
}

/// The pattern segments as a small automaton over directory levels.
///
/// Position `i` means "segment `i` is next to match"; `segments.len()` is the
/// accept position. A globstar at `i` may be skipped (epsilon to `i + 1`) or
/// may absorb an entry and stay at `i`. Tracking a set of positions per frame
/// keeps a path reachable through several `**` splits from being yielded twice.
struct Automaton {
    segments: Vec<Segment>,
    hidden: HiddenFiles,
    case_sensitive: bool,
}

impl Automaton {
    fn accept(&self) -> usize {
        self.segments.len()
    }

    /// Add globstar skips until nothing changes, then sort and dedup.
    fn closure(&self, mut states: Vec<usize>) -> Vec<usize> {
        let mut i = 0;
        while i < states.len() {
            let s = states[i];
            if matches!(self.segments.get(s), Some(Segment::Globstar)) && !states.contains(&(s + 1))
            {
                states.push(s + 1);
            }
            i += 1;
        }
        states.sort_unstable();
        states.dedup();
        states
    }

    fn step(&self, states: &[usize], entry: &DirEntry) -> Step {
        let mut named = Vec::new();
        let mut starred = Vec::new();
        for &s in states {
            let Some(segment) = self.segments.get(s) else {
                continue;
            };
            if !segment.matches(&entry.name, self.hidden, self.case_sensitive) {
                continue;
            }
            match segment {
                Segment::Globstar => starred.push(s),
                _ => named.push(s + 1),
            }
        }
        let named = self.closure(named);
        let starred = self.closure(starred);
        let accept = named.contains(&self.accept()) || starred.contains(&self.accept());
        Step {
            accept,
            named,
            starred,
        }
    }
}

/// Traversal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Walking,
    Exhausted,
}

/// Lazy glob iterator, generic over any `GlobFs` implementation.
///
/// # Examples
/// ```no_run
/// use globber::{GlobContext, Globber, StdFs};
///
/// let globber = Globber::new(StdFs, GlobContext::files("src/**/*.rs")).unwrap();
/// for found in globber {
///     println!("{found}");
/// }
/// ```
pub struct Globber<F: GlobFs> {
    fs: F,
    mask: Mask,
    root: Option<PathBuf>,
    entry_types: EntryTypes,
    follow_symlinks: bool,
    on_error: Option<ErrorCallback>,
    automaton: Automaton,
    state: State,
    stack: Vec<Frame>,
}

impl<F: GlobFs> Globber<F> {
    /// Compile the context's mask. Nothing touches the filesystem until the
    /// first call to `next()`.
    pub fn new(fs: F, ctx: GlobContext) -> Result<Self, PatternError> {
        let mask = Mask::parse(&ctx.mask)?;
        let mut entry_types = ctx.entry_types;
        if mask.dirs_only() {
            entry_types.files = false;
        }
        let automaton = Automaton {
            segments: mask.segments().to_vec(),
            hidden: ctx.options.hidden,
            case_sensitive: ctx.options.case_sensitive,
        };
        Ok(Self {
            fs,
            mask,
            root: ctx.root,
            entry_types,
            follow_symlinks: ctx.options.follow_symlinks,
            on_error: ctx.options.on_error,
            automaton,
            state: State::Start,
            stack: Vec::new(),
        })
    }

    /// The compiled mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Map a path spelled as in the mask onto the filesystem.
    fn resolve(&self, base: &Option<PathBuf>, spelled: &str) -> PathBuf {
        let path = match base {
            Some(base) => base.join(spelled),
            None => PathBuf::from(spelled),
        };
        if path.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            path
        }
    }

    /// Leave `Start`: stat a literal mask, or open the root prefix.
    fn start(&mut self) -> Option<GlobMatch> {
        self.state = State::Exhausted;

        let base = if Path::new(self.mask.root_prefix()).is_absolute() {
            None
        } else {
            match &self.root {
                Some(root) => Some(root.clone()),
                None => match self.fs.current_dir() {
                    Ok(cwd) => Some(cwd),
                    Err(err) => {
                        self.report(Path::new("."), &err);
                        None
                    }
                },
            }
        };

        if self.mask.is_literal() {
            let path = self.resolve(&base, self.mask.as_str());
            let kind = self.fs.path_kind(&path)?;
            return self.entry_types.admits(kind).then(|| GlobMatch {
                path: self.mask.as_str().to_string(),
                kind,
            });
        }

        let fs_path = self.resolve(&base, self.mask.root_prefix());
        let accept = self.automaton.accept();
        let mut states = self.automaton.closure(vec![0]);
        states.retain(|s| *s != accept);
        let display = self.mask.root_prefix().to_string();
        if let Some(frame) = self.open_frame(fs_path, display, states) {
            self.stack.push(frame);
            self.state = State::Walking;
        }
        None
    }

    /// Read one directory listing into a frame. The handle is closed before
    /// this returns; unreadable entries are skipped.
    fn open_frame(&self, fs_path: PathBuf, display: String, states: Vec<usize>) -> Option<Frame> {
        let dir = match self.fs.open_dir(&fs_path) {
            Ok(dir) => dir,
            Err(err) => {
                self.report(&fs_path, &err);
                return None;
            }
        };

        let mut entries = Vec::new();
        for item in dir {
            match item {
                Ok(entry) if entry.name == "." || entry.name == ".." => {}
                Ok(entry) => entries.push(entry),
                Err(err) => self.report(&fs_path, &err),
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::trace!(dir = %fs_path.display(), entries = entries.len(), "opened frame");
        let canonical = self.follow_symlinks.then(|| self.fs.canonicalize(&fs_path));
        Some(Frame {
            fs_path,
            display,
            entries: entries.into_iter(),
            states,
            canonical,
        })
    }

    /// Whether `**` may absorb this directory entry and descend into it.
    ///
    /// A symlinked directory is a cycle only if it resolves to a directory on
    /// the current branch. The stack holds exactly that branch.
    fn may_descend_starred(&self, entry: &DirEntry, fs_path: &Path) -> bool {
        if !entry.is_symlink {
            return true;
        }
        if !self.follow_symlinks {
            return false;
        }
        let canonical = self.fs.canonicalize(fs_path);
        let on_branch = self
            .stack
            .iter()
            .any(|frame| frame.canonical.as_ref() == Some(&canonical));
        if on_branch {
            self.report(fs_path, &FsError::SymlinkCycle(fs_path.display().to_string()));
        }
        !on_branch
    }

    fn report(&self, path: &Path, err: &FsError) {
        tracing::debug!(path = %path.display(), error = %err, "glob skipped");
        if let Some(cb) = &self.on_error {
            cb(path, err);
        }
    }
}

impl<F: GlobFs> Iterator for Globber<F> {
    type Item = GlobMatch;

    fn next(&mut self) -> Option<GlobMatch> {
        if self.state == State::Start
            && let Some(found) = self.start()
        {
            return Some(found);
        }

        while let Some(frame) = self.stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };

            let step = self.automaton.step(&frame.states, &entry);
            if !step.accept && step.named.is_empty() && step.starred.is_empty() {
                continue;
            }

            let display = format!("{}{}", frame.display, entry.name);
            let fs_path = frame.fs_path.join(&entry.name);

            if entry.is_dir() {
                let accept = self.automaton.accept();
                let mut states: Vec<usize> = step.named.into_iter().filter(|s| *s != accept).collect();
                let starred: Vec<usize> = step.starred.into_iter().filter(|s| *s != accept).collect();
                if !starred.is_empty() && self.may_descend_starred(&entry, &fs_path) {
                    states.extend(starred);
                    states.sort_unstable();
                    states.dedup();
                }
                if !states.is_empty() {
                    let child_display = format!("{}{}", display, self.mask.separator());
                    if let Some(child) = self.open_frame(fs_path, child_display, states) {
                        self.stack.push(child);
                    }
                }
            }

            if step.accept && self.entry_types.admits(entry.kind) {
                return Some(GlobMatch {
                    path: display,
                    kind: entry.kind,
                });
            }
        }

        self.state = State::Exhausted;
        None
    }
}

impl<F: GlobFs> FusedIterator for Globber<F> {}

/// Expand a mask to the matching file paths, in traversal order.
pub fn glob_files<F: GlobFs>(fs: F, mask: &str) -> Result<Vec<String>, PatternError> {
    Ok(Globber::new(fs, GlobContext::files(mask))?.map(|m| m.path).collect())
}

/// Expand a mask to the matching directory paths, in traversal order.
pub fn glob_dirs<F: GlobFs>(fs: F, mask: &str) -> Result<Vec<String>, PatternError> {
    Ok(Globber::new(fs, GlobContext::dirs(mask))?.map(|m| m.path).collect())
}
