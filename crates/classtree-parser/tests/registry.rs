use std::fs;
use std::path::Path;

use classtree_parser::{ExtractError, ExtractorRegistry, Language, ScanOptions};

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn relative_names(root: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

fn csharp_project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "Top.cs", b"class Top { }");
    write(root, "src/Animal.cs", b"namespace Zoo { public abstract class Animal { } }");
    write(root, "src/pets/Dog.cs", b"namespace Zoo { public class Dog : Animal { } }");
    write(root, "bin/Generated.cs", b"class Generated { }");
    write(root, "obj/Debug/Temp.cs", b"class Temp { }");
    write(root, ".cache/Hidden.cs", b"class Hidden { }");
    write(root, "gen/Proto.cs", b"class Proto { }");
    write(root, "README.md", b"# docs");
    tmp
}

#[test]
fn collect_files_sorted_and_filtered() {
    let tmp = csharp_project();
    let registry = ExtractorRegistry::new();
    let files = registry
        .collect_files(tmp.path(), Language::CSharp, &ScanOptions::default())
        .unwrap();
    assert_eq!(
        relative_names(tmp.path(), &files),
        vec!["Top.cs", "gen/Proto.cs", "src/Animal.cs", "src/pets/Dog.cs"]
    );
}

#[test]
fn collect_files_extra_excludes() {
    let tmp = csharp_project();
    let registry = ExtractorRegistry::new();
    let options = ScanOptions {
        extra_excludes: vec!["gen/**".into(), "**/pets".into()],
        ..ScanOptions::default()
    };
    let files = registry.collect_files(tmp.path(), Language::CSharp, &options).unwrap();
    assert_eq!(relative_names(tmp.path(), &files), vec!["Top.cs", "src/Animal.cs"]);
}

#[test]
fn collect_files_non_recursive() {
    let tmp = csharp_project();
    let registry = ExtractorRegistry::new();
    let options = ScanOptions {
        recursive: false,
        ..ScanOptions::default()
    };
    let files = registry.collect_files(tmp.path(), Language::CSharp, &options).unwrap();
    assert_eq!(relative_names(tmp.path(), &files), vec!["Top.cs"]);
}

#[test]
fn collect_files_gitignore_toggle() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, ".gitignore", b"vendor/\n");
    write(root, "app.py", b"class App:\n    pass\n");
    write(root, "vendor/lib.py", b"class Lib:\n    pass\n");
    let registry = ExtractorRegistry::new();

    let honoured = registry
        .collect_files(root, Language::Python, &ScanOptions::default())
        .unwrap();
    assert_eq!(relative_names(root, &honoured), vec!["app.py"]);

    let options = ScanOptions {
        respect_gitignore: false,
        ..ScanOptions::default()
    };
    let all = registry.collect_files(root, Language::Python, &options).unwrap();
    assert_eq!(relative_names(root, &all), vec!["app.py", "vendor/lib.py"]);
}

#[test]
fn extract_directory_reports_progress() {
    let tmp = csharp_project();
    let registry = ExtractorRegistry::new();
    let mut calls = Vec::new();
    let mut on_file = |done: usize, total: usize| calls.push((done, total));
    let report = registry
        .extract_directory(tmp.path(), Language::CSharp, &ScanOptions::default(), Some(&mut on_file))
        .unwrap();

    assert_eq!(calls, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    assert_eq!(report.files_scanned, 4);
    assert!(report.errors.is_empty());
    let names: Vec<&str> = report.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Top", "Proto", "Animal", "Dog"]);
}

#[test]
fn extract_directory_records_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a_good.cs", b"class Good { }");
    write(root, "b_bad.cs", &[0xff, 0xfe, 0x00, 0x63]);
    write(root, "c_also_good.cs", b"class AlsoGood { }");

    let registry = ExtractorRegistry::new();
    let mut seen = 0;
    let mut on_file = |_: usize, _: usize| seen += 1;
    let report = registry
        .extract_directory(root, Language::CSharp, &ScanOptions::default(), Some(&mut on_file))
        .unwrap();

    assert_eq!(seen, 3);
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.entities.len(), 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].path.ends_with("b_bad.cs"));
    assert!(report.errors[0].message.contains("b_bad.cs"));
}

#[test]
fn extract_directory_empty_is_ok() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "notes.txt", b"class NotCode { }");
    let registry = ExtractorRegistry::new();
    let report = registry
        .extract_directory(tmp.path(), Language::Java, &ScanOptions::default(), None)
        .unwrap();
    assert!(report.is_empty());
    assert_eq!(report.files_scanned, 0);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ExtractorRegistry::new();
    let missing = tmp.path().join("nope");
    let err = registry
        .extract_directory(&missing, Language::CSharp, &ScanOptions::default(), None)
        .unwrap_err();
    assert!(matches!(err, ExtractError::MissingRoot(_)));

    write(tmp.path(), "file.cs", b"class A { }");
    let err = registry
        .collect_files(&tmp.path().join("file.cs"), Language::CSharp, &ScanOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExtractError::NotADirectory(_)));
}

#[test]
fn invalid_exclude_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = ExtractorRegistry::new();
    let options = ScanOptions {
        extra_excludes: vec!["src/[".into()],
        ..ScanOptions::default()
    };
    let err = registry
        .collect_files(tmp.path(), Language::CSharp, &options)
        .unwrap_err();
    assert!(matches!(err, ExtractError::Pattern { .. }));
}

#[test]
fn detect_language_picks_majority() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.py", b"class A:\n    pass\n");
    write(root, "b.py", b"class B:\n    pass\n");
    write(root, "C.java", b"class C {\n}\n");
    let registry = ExtractorRegistry::new();
    assert_eq!(
        registry.detect_language(root, &ScanOptions::default()).unwrap(),
        Some(Language::Python)
    );

    let empty = tempfile::tempdir().unwrap();
    assert_eq!(
        registry.detect_language(empty.path(), &ScanOptions::default()).unwrap(),
        None
    );
}
