//! Filesystem access used by the analyzer.
//!
//! The analyzer only needs three fallible reads, so it goes through the
//! [`FileSystem`] trait instead of calling `std::fs` directly.

use std::fs;
use std::io;
use std::path::Path;

/// What a directory entry is, as far as traversal cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, fifos, dangling links, links to directories
    Other,
}

/// One immediate child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

pub trait FileSystem {
    /// Immediate entries of `dir`, in the order the platform returns them
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Byte length of a file
    fn file_len(&self, path: &Path) -> io::Result<u64>;

    /// Whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether anything (file, directory, link target) exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// `std::fs` backed filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    fn classify(path: &Path, file_type: fs::FileType) -> EntryKind {
        if file_type.is_dir() {
            return EntryKind::Directory;
        }
        if file_type.is_file() {
            return EntryKind::File;
        }
        // Symlinks: files are read through, directories are not followed
        if file_type.is_symlink() {
            return match fs::metadata(path) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };
        }
        EntryKind::Other
    }
}

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let kind = Self::classify(&entry.path(), entry.file_type()?);
            entries.push(DirEntry::new(
                entry.file_name().to_string_lossy().into_owned(),
                kind,
            ));
        }
        Ok(entries)
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_kinds() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.ts"), "x").unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();

        let mut entries = LocalFileSystem.read_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                DirEntry::new("a.ts", EntryKind::File),
                DirEntry::new("src", EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn test_file_len_and_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hello.py");
        fs::write(&path, "def hi():\n").unwrap();

        assert_eq!(LocalFileSystem.file_len(&path).unwrap(), 10);
        assert_eq!(LocalFileSystem.read_to_string(&path).unwrap(), "def hi():\n");
        assert!(LocalFileSystem.exists(&path));
        assert!(!LocalFileSystem.exists(&temp.path().join("missing.py")));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = LocalFileSystem.read_to_string(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real.ts"), "").unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real.ts"), temp.path().join("link.ts"))
            .unwrap();
        std::os::unix::fs::symlink(temp.path().join("dir"), temp.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling"))
            .unwrap();

        let entries = LocalFileSystem.read_dir(temp.path()).unwrap();
        let kind = |name: &str| entries.iter().find(|e| e.name == name).unwrap().kind;

        assert_eq!(kind("link.ts"), EntryKind::File);
        assert_eq!(kind("loop"), EntryKind::Other);
        assert_eq!(kind("dangling"), EntryKind::Other);
    }
}
