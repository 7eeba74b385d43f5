//! End-to-end checks of the public analysis API against a real directory.

use std::fs;
use std::path::Path;

use dotcursor::{AnalysisOptions, DirectoryRecord, FileRecord, FileType, ReportFormat, analyze, report};
use tempfile::TempDir;

const MAIN_TS: &str = r#"
function hello() {
  console.log("Hello");
}
const arrowFunc = () => {
  return "arrow";
};
class TestClass {
  method() {}
}"#;

const SCRIPT_PY: &str = r#"
def python_func():
    pass
class PythonClass:
    pass"#;

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("main.ts"), MAIN_TS).unwrap();
    fs::write(root.join("script.py"), SCRIPT_PY).unwrap();
    fs::write(root.join("style.css"), "body { color: red; }").unwrap();

    fs::create_dir(root.join("temp")).unwrap();
    fs::write(root.join("test.log"), "log content").unwrap();
    fs::write(root.join("ignored.ts"), "ignored content").unwrap();
    fs::write(
        root.join(".gitignore"),
        "\n# Test gitignore\n*.log\ntemp/\nignored.ts",
    )
    .unwrap();
    temp
}

fn file<'a>(record: &'a DirectoryRecord, path: &str) -> &'a FileRecord {
    record
        .files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("{} not found in {:?}", path, record.files))
}

fn sorted_paths(record: &DirectoryRecord) -> Vec<&str> {
    let mut paths: Vec<&str> = record.files.iter().map(|f| f.path.as_str()).collect();
    paths.sort_unstable();
    paths
}

#[test]
fn analyzes_fixture_with_symbols() {
    let temp = workspace();
    let record = analyze(temp.path(), &AnalysisOptions::default()).unwrap();

    assert!(record.is_root());
    assert_eq!(sorted_paths(&record), vec!["main.ts", "script.py", "style.css"]);
    assert!(record.subdirectories.is_empty());

    let main = file(&record, "main.ts");
    assert_eq!(main.file_type, FileType::TypeScript);
    assert_eq!(main.symbols, vec!["hello", "arrowFunc", "TestClass"]);
    assert_eq!(main.size_bytes, MAIN_TS.len() as u64);

    let script = file(&record, "script.py");
    assert_eq!(script.file_type, FileType::Python);
    assert_eq!(script.symbols, vec!["python_func", "PythonClass"]);

    let style = file(&record, "style.css");
    assert_eq!(style.file_type, FileType::Css);
    assert!(style.symbols.is_empty());
}

#[test]
fn caller_patterns_exclude_without_gitignore() {
    let temp = workspace();
    let options = AnalysisOptions::default()
        .with_gitignore(false)
        .with_ignore_patterns(vec![
            "*.log".to_string(),
            "temp/".to_string(),
            "ignored.ts".to_string(),
        ]);

    let record = analyze(temp.path(), &options).unwrap();

    assert_eq!(sorted_paths(&record), vec!["main.ts", "script.py", "style.css"]);
    assert!(!record.subdirectories.iter().any(|d| d.path.contains("temp")));
}

#[test]
fn disabled_gitignore_lists_everything_visible() {
    let temp = workspace();
    let options = AnalysisOptions::default().with_gitignore(false);

    let record = analyze(temp.path(), &options).unwrap();

    assert_eq!(
        sorted_paths(&record),
        vec!["ignored.ts", "main.ts", "script.py", "style.css", "test.log"]
    );
    assert_eq!(record.subdirectories.len(), 1);
    assert_eq!(record.subdirectories[0].path, "temp");
    assert!(record.subdirectories[0].is_empty());
}

#[test]
fn nested_paths_use_forward_slashes() {
    let temp = workspace();
    let nested = temp.path().join("src").join("utils");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("helpers.js"), "function help() {}\n").unwrap();
    fs::create_dir(temp.path().join("node_modules")).unwrap();
    fs::write(temp.path().join("node_modules").join("dep.js"), "").unwrap();

    let record = analyze(temp.path(), &AnalysisOptions::default()).unwrap();

    assert_eq!(record.subdirectories.len(), 1);
    let src = &record.subdirectories[0];
    assert_eq!(src.path, "src");
    let utils = &src.subdirectories[0];
    assert_eq!(utils.path, "src/utils");
    assert_eq!(utils.files[0].path, "src/utils/helpers.js");
    assert_eq!(utils.files[0].symbols, vec!["help"]);
}

#[test]
fn missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    assert!(analyze(&missing, &AnalysisOptions::default()).is_err());
}

#[test]
fn markdown_report_lists_files() {
    let temp = workspace();
    let record = analyze(temp.path(), &AnalysisOptions::default()).unwrap();

    let markdown = report::render(&record, ReportFormat::Markdown).unwrap();
    assert!(markdown.starts_with("# 📁 Project Structure\n\n## Files\n\n"));
    assert!(markdown.contains("- 📄 `main.ts`\n  - Type: TypeScript\n"));
    assert!(markdown.contains("  - Functions:\n    - `hello`\n    - `arrowFunc`\n    - `TestClass`\n"));
    assert!(!markdown.contains("test.log"));
}

#[test]
fn report_written_to_disk() {
    let temp = workspace();
    let record = analyze(temp.path(), &AnalysisOptions::default()).unwrap();
    let out = temp.path().join("STRUCTURE.json");

    report::write_report(&record, ReportFormat::Json, Path::new(&out)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["path"], "");
    assert_eq!(json["files"].as_array().unwrap().len(), 3);
}
