//! Markdown rendering of a [`DirectoryRecord`] tree.
//!
//! Directories become headers nested by depth, files become bullets with
//! type, size and symbol sub-bullets.

use std::fmt::Write;

use crate::constants::report::SIZE_LIMITS_KB;
use crate::types::{DirectoryRecord, FileRecord};

const ROOT_TITLE: &str = "# 📁 Project Structure";
const SIZE_WARNING: &str = "⚠️ **File size exceeds recommended limit**";

/// Size limit in bytes for a file's extension, if it has one
pub fn size_limit_bytes(file: &FileRecord) -> Option<u64> {
    let ext = file.extension()?;
    SIZE_LIMITS_KB
        .iter()
        .find(|(limit_ext, _)| *limit_ext == ext)
        .map(|(_, kb)| kb * 1024)
}

pub fn exceeds_size_limit(file: &FileRecord) -> bool {
    size_limit_bytes(file).is_some_and(|limit| file.size_bytes > limit)
}

pub fn render(record: &DirectoryRecord) -> String {
    let mut out = String::new();
    render_directory(&mut out, record, 0);
    out
}

fn render_directory(out: &mut String, record: &DirectoryRecord, level: usize) {
    let indent = "  ".repeat(level);

    if record.is_root() {
        let _ = writeln!(out, "{ROOT_TITLE}\n");
    } else {
        let _ = writeln!(out, "{indent}{} 📁 {}\n", "#".repeat(level + 2), record.path);
    }

    if !record.files.is_empty() {
        if level == 0 {
            out.push_str("## Files\n\n");
        }
        for file in &record.files {
            render_file(out, file, &indent);
        }
    }

    for subdir in &record.subdirectories {
        render_directory(out, subdir, level + 1);
    }
}

fn render_file(out: &mut String, file: &FileRecord, indent: &str) {
    let _ = writeln!(out, "{indent}- 📄 `{}`", file.path);
    let _ = writeln!(out, "{indent}  - Type: {}", file.file_type);
    let _ = writeln!(out, "{indent}  - Size: {:.2}KB", file.size_bytes as f64 / 1024.0);

    if exceeds_size_limit(file) {
        let _ = writeln!(out, "{indent}  - {SIZE_WARNING}");
    }

    if !file.symbols.is_empty() {
        let _ = writeln!(out, "{indent}  - Functions:");
        for symbol in &file.symbols {
            let _ = writeln!(out, "{indent}    - `{symbol}`");
        }
    }
    out.push('\n');
}
