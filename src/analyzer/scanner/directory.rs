use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, trace};

use super::fs::{EntryKind, FileSystem, LocalFileSystem};
use super::gitignore::{self, GITIGNORE_FILE};
use super::patterns::IgnoreMatcher;
use crate::analyzer::language::FileType;
use crate::analyzer::symbols;
use crate::constants::exclusion::{BUILTIN_NAMES, LOCKFILE_SUFFIXES};
use crate::types::{DirectoryRecord, FileRecord, IoResultExt, Result};

/// Caller-side inputs to one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Entry names skipped wherever they appear
    pub exclude_dirs: Vec<String>,
    /// Patterns applied from the root down, ahead of any `.gitignore`
    pub ignore_patterns: Vec<String>,
    /// Exact root-relative paths to leave out, such as the report file
    pub skip_paths: Vec<String>,
    /// Read each directory's own `.gitignore`
    pub respect_gitignore: bool,
    /// Forwarded to the caller's watch loop; traversal ignores it
    pub watch: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            exclude_dirs: Vec::new(),
            ignore_patterns: Vec::new(),
            skip_paths: Vec::new(),
            respect_gitignore: true,
            watch: false,
        }
    }
}

impl AnalysisOptions {
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_skip_paths(mut self, paths: Vec<String>) -> Self {
        self.skip_paths = paths;
        self
    }

    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }
}

/// Why an entry was left out, in the order rules are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    IgnorePattern,
    GitignoreFile,
    Hidden,
    Builtin,
    Excluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnorePattern => write!(f, "ignore pattern"),
            Self::GitignoreFile => write!(f, "gitignore file"),
            Self::Hidden => write!(f, "hidden"),
            Self::Builtin => write!(f, "built-in exclusion"),
            Self::Excluded => write!(f, "excluded by configuration"),
        }
    }
}

/// Decide whether an entry is skipped. Pattern match first, then name rules.
pub fn skip_reason(
    name: &str,
    relative_path: &str,
    matcher: &IgnoreMatcher,
    exclude_dirs: &[String],
) -> Option<SkipReason> {
    if matcher.is_ignored(relative_path) {
        return Some(SkipReason::IgnorePattern);
    }
    if name == GITIGNORE_FILE {
        return Some(SkipReason::GitignoreFile);
    }
    if name.starts_with('.') {
        return Some(SkipReason::Hidden);
    }
    if BUILTIN_NAMES.contains(&name) || LOCKFILE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return Some(SkipReason::Builtin);
    }
    if exclude_dirs.iter().any(|d| d == name) {
        return Some(SkipReason::Excluded);
    }
    None
}

/// Recursive, depth-first directory analyzer.
///
/// Reported paths are relative to `project_root`, which stays fixed for the
/// analyzer's lifetime. Any I/O failure aborts the whole run.
pub struct DirectoryAnalyzer<F: FileSystem = LocalFileSystem> {
    project_root: PathBuf,
    fs: F,
}

impl DirectoryAnalyzer<LocalFileSystem> {
    pub fn new<P: AsRef<Path>>(project_root: P) -> Self {
        Self::with_file_system(project_root, LocalFileSystem)
    }
}

impl<F: FileSystem> DirectoryAnalyzer<F> {
    pub fn with_file_system<P: AsRef<Path>>(project_root: P, fs: F) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            fs,
        }
    }

    /// Analyze `dir` (the project root or a directory beneath it)
    pub fn analyze(&self, dir: &Path, options: &AnalysisOptions) -> Result<DirectoryRecord> {
        let start = Instant::now();
        let record = self.visit(dir, &options.ignore_patterns, options)?;

        info!(
            "Analyzed {} files in {} directories under {} ({:.2}s)",
            record.file_count(),
            record.directory_count() + 1,
            dir.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(record)
    }

    fn visit(
        &self,
        dir: &Path,
        inherited: &[String],
        options: &AnalysisOptions,
    ) -> Result<DirectoryRecord> {
        let entries = self.fs.read_dir(dir).at_path(dir)?;

        let mut effective = inherited.to_vec();
        if options.respect_gitignore {
            effective.extend(gitignore::load_patterns(&self.fs, dir)?);
        }
        let matcher = IgnoreMatcher::new(&effective);

        let mut files = Vec::new();
        let mut subdirectories = Vec::new();

        for entry in entries {
            let path = dir.join(&entry.name);
            let relative = self.relative_path(&path);

            if options.skip_paths.contains(&relative) {
                debug!("Skipping {} (skip path)", relative);
                continue;
            }

            let skipped = skip_reason(&entry.name, &relative, &matcher, &options.exclude_dirs);
            if let Some(reason) = skipped {
                debug!("Skipping {} ({})", relative, reason);
                continue;
            }

            match entry.kind {
                EntryKind::Directory => {
                    subdirectories.push(self.visit(&path, &effective, options)?);
                }
                EntryKind::File => {
                    files.push(self.analyze_file(&path, &entry.name, relative)?);
                }
                EntryKind::Other => {
                    debug!("Skipping {} (not a regular file or directory)", relative);
                }
            }
        }

        Ok(DirectoryRecord {
            path: self.relative_path(dir),
            files,
            subdirectories,
        })
    }

    fn analyze_file(&self, path: &Path, name: &str, relative: String) -> Result<FileRecord> {
        trace!("Analyzing {}", relative);

        let size_bytes = self.fs.file_len(path).at_path(path)?;
        let file_type = FileType::from_file_name(name);
        let content = self.fs.read_to_string(path).at_path(path)?;
        let symbols = symbols::extract(&content, file_type);

        Ok(FileRecord {
            path: relative,
            size_bytes,
            file_type,
            symbols,
        })
    }

    /// `/`-joined path relative to the project root; empty for the root itself
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Analyze `root` with paths reported relative to `root`
pub fn analyze<P: AsRef<Path>>(root: P, options: &AnalysisOptions) -> Result<DirectoryRecord> {
    let root = root.as_ref();
    DirectoryAnalyzer::new(root).analyze(root, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::scanner::fs::DirEntry;
    use crate::analyzer::scanner::fs::memory::MemoryFileSystem;
    use crate::types::DotcursorError;

    fn run(fs: MemoryFileSystem, options: &AnalysisOptions) -> Result<DirectoryRecord> {
        DirectoryAnalyzer::with_file_system("/p", fs).analyze(Path::new("/p"), options)
    }

    fn file_paths(record: &DirectoryRecord) -> Vec<&str> {
        record.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_enumeration_order_preserved() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .file("/p/zeta.ts", "")
            .file("/p/alpha.ts", "")
            .file("/p/mid.ts", "");

        let record = run(fs, &AnalysisOptions::default()).unwrap();
        assert_eq!(file_paths(&record), vec!["zeta.ts", "alpha.ts", "mid.ts"]);
        assert_eq!(record.path, "");
    }

    #[test]
    fn test_nested_paths_are_root_relative() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .dir("/p/src")
            .dir("/p/src/util")
            .file("/p/src/util/math.py", "def add(a, b):\n    return a + b\n");

        let record = run(fs, &AnalysisOptions::default()).unwrap();
        let util = &record.subdirectories[0].subdirectories[0];
        assert_eq!(record.subdirectories[0].path, "src");
        assert_eq!(util.path, "src/util");
        assert_eq!(util.files[0].path, "src/util/math.py");
        assert_eq!(util.files[0].symbols, vec!["add"]);
        assert_eq!(util.files[0].file_type, FileType::Python);
    }

    #[test]
    fn test_builtin_and_hidden_exclusions() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .dir("/p/node_modules")
            .dir("/p/dist")
            .dir("/p/build")
            .dir("/p/coverage")
            .dir("/p/.git")
            .file("/p/.env", "SECRET=1")
            .file("/p/.gitignore", "")
            .file("/p/bun.lockb", "")
            .file("/p/package-lock.json", "{}")
            .file("/p/yarn.lock", "")
            .file("/p/Thumbs.db", "")
            .file("/p/index.js", "");

        let record = run(fs, &AnalysisOptions::default()).unwrap();
        assert_eq!(file_paths(&record), vec!["index.js"]);
        assert!(record.subdirectories.is_empty());
    }

    #[test]
    fn test_excluded_subtree_is_never_read() {
        // reading anything under vendor/ would fail: it is not in the fake fs
        let mut fs = MemoryFileSystem::default().dir("/p").file("/p/a.ts", "");
        fs.dirs
            .get_mut(Path::new("/p"))
            .unwrap()
            .push(DirEntry::new("vendor", EntryKind::Directory));

        let options = AnalysisOptions::default().with_exclude_dirs(vec!["vendor".to_string()]);
        let record = run(fs, &options).unwrap();
        assert_eq!(file_paths(&record), vec!["a.ts"]);
    }

    #[test]
    fn test_gitignore_applies_to_children_only() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .file("/p/notes.tmp", "")
            .dir("/p/pkg")
            .file("/p/pkg/.gitignore", "*.tmp\n")
            .file("/p/pkg/cache.tmp", "")
            .file("/p/pkg/lib.js", "")
            .dir("/p/pkg/inner")
            .file("/p/pkg/inner/deep.tmp", "");

        let record = run(fs, &AnalysisOptions::default()).unwrap();
        assert_eq!(file_paths(&record), vec!["notes.tmp"]);

        let pkg = &record.subdirectories[0];
        assert_eq!(file_paths(pkg), vec!["pkg/lib.js"]);
        assert!(pkg.subdirectories[0].files.is_empty());
    }

    #[test]
    fn test_skip_paths_are_exact() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .file("/p/STRUCTURE.md", "# old report")
            .file("/p/main.ts", "")
            .dir("/p/docs")
            .file("/p/docs/STRUCTURE.md", "");

        let options = AnalysisOptions::default().with_skip_paths(vec!["STRUCTURE.md".to_string()]);
        let record = run(fs, &options).unwrap();
        assert_eq!(file_paths(&record), vec!["main.ts"]);
        assert_eq!(file_paths(&record.subdirectories[0]), vec!["docs/STRUCTURE.md"]);
    }

    #[test]
    fn test_gitignore_can_be_disabled() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .file("/p/.gitignore", "*.log\n")
            .file("/p/app.log", "");

        let options = AnalysisOptions::default().with_gitignore(false);
        let record = run(fs, &options).unwrap();
        assert_eq!(file_paths(&record), vec!["app.log"]);
    }

    #[test]
    fn test_caller_patterns_are_inherited() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .dir("/p/a")
            .dir("/p/a/temp")
            .file("/p/a/temp/x.ts", "")
            .file("/p/a/keep.ts", "");

        let options = AnalysisOptions::default().with_ignore_patterns(vec!["temp/".to_string()]);
        let record = run(fs, &options).unwrap();
        let a = &record.subdirectories[0];
        assert_eq!(file_paths(a), vec!["a/keep.ts"]);
        assert!(a.subdirectories.is_empty());
    }

    #[test]
    fn test_io_failure_aborts_run() {
        let mut fs = MemoryFileSystem::default().dir("/p").file("/p/ok.ts", "");
        fs.dirs
            .get_mut(Path::new("/p"))
            .unwrap()
            .push(DirEntry::new("vanished.ts", EntryKind::File));

        let err = run(fs, &AnalysisOptions::default()).unwrap_err();
        match err {
            DotcursorError::Traversal { path, .. } => {
                assert_eq!(path, PathBuf::from("/p/vanished.ts"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_other_entries_skipped() {
        let mut fs = MemoryFileSystem::default().dir("/p").file("/p/a.ts", "");
        fs.dirs
            .get_mut(Path::new("/p"))
            .unwrap()
            .push(DirEntry::new("socket", EntryKind::Other));

        let record = run(fs, &AnalysisOptions::default()).unwrap();
        assert_eq!(file_paths(&record), vec!["a.ts"]);
    }

    #[test]
    fn test_analyze_subdirectory_keeps_project_relative_paths() {
        let fs = MemoryFileSystem::default()
            .dir("/p")
            .dir("/p/src")
            .file("/p/src/main.ts", "function main() {}");

        let analyzer = DirectoryAnalyzer::with_file_system("/p", fs);
        let record = analyzer
            .analyze(Path::new("/p/src"), &AnalysisOptions::default())
            .unwrap();
        assert_eq!(record.path, "src");
        assert_eq!(file_paths(&record), vec!["src/main.ts"]);
    }

    #[test]
    fn test_skip_reason_order() {
        let matcher = IgnoreMatcher::new(&[".env"]);
        let excluded = vec!["node_modules".to_string()];

        assert_eq!(
            skip_reason(".env", ".env", &matcher, &[]),
            Some(SkipReason::IgnorePattern)
        );
        assert_eq!(
            skip_reason(".gitignore", ".gitignore", &matcher, &[]),
            Some(SkipReason::GitignoreFile)
        );
        assert_eq!(
            skip_reason(".cache", ".cache", &matcher, &[]),
            Some(SkipReason::Hidden)
        );
        assert_eq!(
            skip_reason("node_modules", "node_modules", &matcher, &excluded),
            Some(SkipReason::Builtin)
        );
        assert_eq!(
            skip_reason("generated", "generated", &matcher, &["generated".to_string()]),
            Some(SkipReason::Excluded)
        );
        assert_eq!(skip_reason("src", "src", &matcher, &excluded), None);
    }
}
