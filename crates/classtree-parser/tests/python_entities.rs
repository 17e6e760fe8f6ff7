use std::path::Path;

use classtree_core::entity::ClassEntity;
use classtree_parser::{Extractor, Language};

fn extract(source: &str) -> Vec<ClassEntity> {
    Extractor::for_language(Language::Python).extract_source(Path::new("shapes.py"), source)
}

fn find<'a>(entities: &'a [ClassEntity], name: &str) -> &'a ClassEntity {
    entities.iter().find(|e| e.name == name).unwrap()
}

const SHAPES: &str = r#"from abc import ABC, abstractmethod


class Shape(ABC):
    @abstractmethod
    def area(self):
        ...

    def describe(self):
        return "shape"


class Square(Shape, Printable):
    class Meta:
        ordering = ["side"]

    def __init__(self, side):
        self.side = side

    def area(self):
        return self.side ** 2


class Plain(object):
    pass


class Registry(metaclass=ABCMeta):
    pass
"#;

#[test]
fn python_extract_classes_in_order() {
    let entities = extract(SHAPES);
    let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Shape", "Square", "Meta", "Plain", "Registry"]);
}

#[test]
fn python_has_no_namespace() {
    for entity in extract(SHAPES) {
        assert_eq!(entity.namespace, None);
    }
}

#[test]
fn python_bases() {
    let entities = extract(SHAPES);
    let square = find(&entities, "Square");
    assert_eq!(square.base_class.as_deref(), Some("Shape"));
    assert_eq!(square.interfaces, vec!["Printable"]);
    assert_eq!(find(&entities, "Plain").base_class, None);
    assert_eq!(find(&entities, "Registry").base_class, None);
    assert!(find(&entities, "Registry").interfaces.is_empty());
}

#[test]
fn python_abstract_detection() {
    let entities = extract(SHAPES);
    assert!(find(&entities, "Shape").is_abstract);
    assert!(find(&entities, "Registry").is_abstract);
    assert!(!find(&entities, "Square").is_abstract);
    assert!(!find(&entities, "Plain").is_abstract);

    let marked = extract("class Base:\n    @abstractmethod\n    def run(self):\n        pass\n");
    assert!(marked[0].is_abstract);
}

#[test]
fn python_nested_class() {
    let entities = extract(SHAPES);
    assert_eq!(find(&entities, "Meta").parent_class_name.as_deref(), Some("Square"));
    assert_eq!(find(&entities, "Square").parent_class_name, None);
    assert_eq!(find(&entities, "Plain").parent_class_name, None);
}

#[test]
fn python_method_count() {
    let entities = extract(SHAPES);
    assert_eq!(find(&entities, "Shape").method_count, 2);
    assert_eq!(find(&entities, "Square").method_count, 2);
    assert_eq!(find(&entities, "Meta").method_count, 0);
}

#[test]
fn python_async_def_counted() {
    let entities = extract("class Client:\n    async def fetch(self):\n        pass\n\n    def close(self):\n        pass\n");
    assert_eq!(entities[0].method_count, 2);
}

#[test]
fn python_line_count() {
    let entities = extract(SHAPES);
    assert_eq!(find(&entities, "Registry").line_count, 2);
    assert_eq!(find(&entities, "Meta").line_count, 3);
}

#[test]
fn python_multiline_bases() {
    let entities = extract("class Multi(\n    Base,\n    Mixin,\n):\n    pass\n");
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].base_class.as_deref(), Some("Base"));
    assert_eq!(entities[0].interfaces, vec!["Mixin"]);
    assert_eq!(entities[0].line_count, 5);
}

#[test]
fn python_sibling_after_nested_body() {
    let source = "class Outer:\n    class Inner:\n        x = 1\n    y = 2\n\nclass Next:\n    pass\n";
    let entities = extract(source);
    assert_eq!(find(&entities, "Inner").parent_class_name.as_deref(), Some("Outer"));
    assert_eq!(find(&entities, "Next").parent_class_name, None);
    assert_eq!(find(&entities, "Outer").line_count, 5);
}
