//! Connector-drawn tree lines for a forest.
//!
//! Every root starts a block; below each node its inheritance children come
//! first, then its nested classes, with `├──`/`└──` connectors and `│`
//! continuation bars under non-last siblings.

use classtree_core::entity::ModifierClass;
use classtree_core::hierarchy::{Forest, NodeId};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUE: &str = "│   ";
const BLANK: &str = "    ";

/// How a line's node hangs off the line above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Root,
    Inherits,
    Nested,
}

/// Styling category of a line, mapped to a terminal style at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    pub modifier: ModifierClass,
    pub nested: bool,
}

/// One rendered row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub node: NodeId,
    pub relation: Relation,
    /// Connector and continuation characters before the label.
    pub prefix: String,
    pub label: String,
    pub class: LineClass,
}

impl TreeLine {
    /// Unstyled text of the line, as written by exports.
    pub fn plain(&self) -> String {
        format!("{}{}", self.prefix, self.label)
    }
}

/// Render the whole forest, roots in order.
pub fn render_tree(forest: &Forest) -> Vec<TreeLine> {
    let mut lines = Vec::with_capacity(forest.len());
    for &root in forest.roots() {
        push_line(forest, root, Relation::Root, String::new(), &mut lines);
        push_descendants(forest, root, "", &mut lines);
    }
    lines
}

/// Render the subtree below `id` with `id` as its top line.
pub fn render_subtree(forest: &Forest, id: NodeId) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    push_line(forest, id, Relation::Root, String::new(), &mut lines);
    push_descendants(forest, id, "", &mut lines);
    lines
}

fn push_descendants(forest: &Forest, id: NodeId, indent: &str, lines: &mut Vec<TreeLine>) {
    let node = forest.node(id);
    let below: Vec<(NodeId, Relation)> = node
        .children
        .iter()
        .map(|&c| (c, Relation::Inherits))
        .chain(node.nested_children.iter().map(|&c| (c, Relation::Nested)))
        .collect();
    let count = below.len();
    for (i, (child, relation)) in below.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        push_line(forest, child, relation, format!("{indent}{connector}"), lines);
        let continuation = if is_last { BLANK } else { CONTINUE };
        push_descendants(forest, child, &format!("{indent}{continuation}"), lines);
    }
}

fn push_line(forest: &Forest, id: NodeId, relation: Relation, prefix: String, lines: &mut Vec<TreeLine>) {
    let entity = &forest.node(id).entity;
    let modifier = entity.modifier();
    let mut label = entity.name.clone();
    if modifier != ModifierClass::Normal {
        label.push_str(&format!(" [{modifier}]"));
    }
    if relation == Relation::Nested {
        label.push_str(" (nested)");
    }
    lines.push(TreeLine {
        node: id,
        relation,
        prefix,
        label,
        class: LineClass {
            modifier,
            nested: relation == Relation::Nested,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtree_core::entity::ClassEntity;

    fn class(name: &str, base: Option<&str>) -> ClassEntity {
        let mut e = ClassEntity::new(name, format!("{name}.cs"));
        e.base_class = base.map(String::from);
        e
    }

    fn plain(lines: &[TreeLine]) -> Vec<String> {
        lines.iter().map(TreeLine::plain).collect()
    }

    #[test]
    fn test_connectors_and_continuation() {
        let forest = Forest::build(vec![
            class("Animal", None),
            class("Dog", Some("Animal")),
            class("Puppy", Some("Dog")),
            class("Cat", Some("Animal")),
        ]);
        assert_eq!(
            plain(&render_tree(&forest)),
            vec!["Animal", "├── Cat", "└── Dog", "    └── Puppy"]
        );
    }

    #[test]
    fn test_children_before_nested() {
        let mut inner = class("Inner", None);
        inner.parent_class_name = Some("Outer".to_string());
        let mut base = class("Outer", None);
        base.is_abstract = true;
        let forest = Forest::build(vec![base, inner, class("Sub", Some("Outer")), class("Zed", None)]);
        let lines = render_tree(&forest);
        assert_eq!(
            plain(&lines),
            vec!["Outer [abstract]", "├── Sub", "└── Inner (nested)", "Zed"]
        );
        assert_eq!(lines[1].relation, Relation::Inherits);
        assert_eq!(lines[2].relation, Relation::Nested);
        assert!(lines[2].class.nested);
        assert_eq!(lines[0].class.modifier, ModifierClass::Abstract);
    }

    #[test]
    fn test_vertical_bar_under_non_last_sibling() {
        let forest = Forest::build(vec![
            class("Root", None),
            class("A", Some("Root")),
            class("A1", Some("A")),
            class("B", Some("Root")),
        ]);
        assert_eq!(
            plain(&render_tree(&forest)),
            vec!["Root", "├── A", "│   └── A1", "└── B"]
        );
    }

    #[test]
    fn test_every_node_rendered_once() {
        let forest = Forest::build(vec![
            class("A", None),
            class("B", Some("A")),
            class("C", Some("B")),
            class("D", None),
        ]);
        let lines = render_tree(&forest);
        assert_eq!(lines.len(), forest.len());
    }

    #[test]
    fn test_subtree_starts_at_node() {
        let forest = Forest::build(vec![
            class("A", None),
            class("B", Some("A")),
            class("C", Some("B")),
        ]);
        let b = forest.find_by_name("B").unwrap();
        assert_eq!(plain(&render_subtree(&forest, b)), vec!["B", "└── C"]);
    }
}
