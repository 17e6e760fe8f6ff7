//! End-to-end runs of the classtree binary in its non-interactive modes.

use std::path::Path;
use std::process::{Command, Output};

fn classtree(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_classtree"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run classtree")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn zoo() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "Animal.cs",
        "namespace Zoo {\n    public abstract class Animal {\n        public void Eat() {}\n    }\n}\n",
    );
    write(
        tmp.path(),
        "pets/Dog.cs",
        "namespace Zoo {\n    public sealed class Dog : Animal {\n    }\n}\n",
    );
    tmp
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_print_tree_and_summary() {
    let tmp = zoo();
    let output = classtree(&["--print", "--lang", "csharp", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Animal [abstract]\n└── Dog [sealed]\n"));
    assert!(text.contains("Classes: 2 (0 nested)"));
    assert!(text.contains("  Zoo.Animal -> Zoo.Dog"));
}

#[test]
fn test_language_auto_detected() {
    let tmp = zoo();
    write(tmp.path(), "tools/build.py", "class Builder:\n    pass\n");
    let output = classtree(&["--print", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Dog [sealed]"));
}

#[test]
fn test_exclude_and_no_recursive() {
    let tmp = zoo();
    let root = tmp.path().to_str().unwrap();

    let excluded = classtree(&["--print", "-l", "csharp", "--exclude", "pets/**", root]);
    assert!(excluded.status.success());
    assert!(!stdout(&excluded).contains("Dog"));

    let flat = classtree(&["--print", "-l", "csharp", "--no-recursive", root]);
    assert!(flat.status.success());
    assert!(stdout(&flat).contains("Classes: 1 (0 nested)"));
}

#[test]
fn test_json_lists_entities() {
    let tmp = zoo();
    let output = classtree(&["--json", "-l", "csharp", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entities = value.as_array().unwrap();
    assert_eq!(entities.len(), 2);
    let dog = entities
        .iter()
        .find(|e| e["name"] == "Dog")
        .expect("Dog in output");
    assert_eq!(dog["base_class"], "Animal");
    assert_eq!(dog["namespace"], "Zoo");
    assert_eq!(dog["is_sealed"], true);
}

#[test]
fn test_empty_directory_prints_nothing_to_display() {
    let tmp = tempfile::tempdir().unwrap();
    let output = classtree(&["--lang", "java", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "nothing to display");
}

#[test]
fn test_unknown_language_fails() {
    let tmp = zoo();
    let output = classtree(&["--print", "--lang", "cobol", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown language 'cobol'"));
}

#[test]
fn test_no_sources_without_lang_fails() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "README.md", "# nothing here\n");
    let output = classtree(&["--print", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("pass --lang"));
}

#[test]
fn test_missing_path_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    let output = classtree(&["--print", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}
