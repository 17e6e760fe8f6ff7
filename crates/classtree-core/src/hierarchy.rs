//! Inheritance forest: resolves a flat entity list into parent/child and
//! nested-containment trees.
//!
//! Nodes live in an arena owned by [`Forest`]; every relation between nodes
//! is a [`NodeId`] index, so parent back-references never own anything.

use crate::entity::ClassEntity;
use serde::Serialize;
use std::collections::HashMap;

/// Index of a node within its [`Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// One node in the forest, wrapping exactly one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub entity: ClassEntity,
    /// Resolved inheritance parent. `None` for roots and nested classes.
    pub parent: Option<NodeId>,
    /// Lexically enclosing class, for nested classes.
    pub container: Option<NodeId>,
    /// Inheritance edges, sorted by entity name.
    pub children: Vec<NodeId>,
    /// Containment edges, sorted by entity name.
    pub nested_children: Vec<NodeId>,
    /// Inheritance depth. Nesting never contributes.
    pub depth: usize,
}

/// Recursive descendant counts split by the kind of edge leading to each descendant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescendantCounts {
    pub inherited: usize,
    pub nested: usize,
}

impl DescendantCounts {
    pub fn total(&self) -> usize {
        self.inherited + self.nested
    }
}

/// The resolved forest of class hierarchies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    nodes: Vec<HierarchyNode>,
    roots: Vec<NodeId>,
    by_full_name: HashMap<String, NodeId>,
}

impl HierarchyNode {
    fn new(entity: ClassEntity) -> Self {
        Self {
            entity,
            parent: None,
            container: None,
            children: Vec::new(),
            nested_children: Vec::new(),
            depth: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.nested_children.is_empty()
    }
}

impl Forest {
    /// Build the forest from entities in extraction order.
    ///
    /// Duplicate `full_name` keys follow a last-wins policy: the later entity
    /// replaces the earlier one but keeps its table position. Name-only base
    /// resolution picks the first match in table order. An inheritance edge
    /// that would close a cycle is refused and the node becomes a root.
    pub fn build(entities: impl IntoIterator<Item = ClassEntity>) -> Self {
        let mut slots: Vec<ClassEntity> = Vec::new();
        let mut by_full_name: HashMap<String, NodeId> = HashMap::new();
        for entity in entities {
            let key = entity.full_name();
            if let Some(&id) = by_full_name.get(&key) {
                tracing::debug!(
                    "duplicate class {} ({} replaces {})",
                    key,
                    entity.file_path.display(),
                    slots[id.0].file_path.display()
                );
                slots[id.0] = entity;
            } else {
                by_full_name.insert(key, NodeId(slots.len()));
                slots.push(entity);
            }
        }

        let mut forest = Self {
            nodes: slots.into_iter().map(HierarchyNode::new).collect(),
            roots: Vec::new(),
            by_full_name,
        };

        let handled = forest.link_nested();
        forest.link_inheritance(&handled);
        forest.promote_unreachable();
        forest.assign_depths();
        forest.sort_edges();

        tracing::debug!(
            "built forest: {} nodes, {} roots",
            forest.nodes.len(),
            forest.roots.len()
        );
        forest
    }

    /// Attach nested classes to their containers. Returns which nodes were attached.
    fn link_nested(&mut self) -> Vec<bool> {
        let mut handled = vec![false; self.nodes.len()];
        for idx in 0..self.nodes.len() {
            let Some(container_name) = self.nodes[idx].entity.parent_class_name.as_deref() else {
                continue;
            };
            let container = self
                .nodes
                .iter()
                .enumerate()
                .find(|(i, n)| *i != idx && n.entity.name == container_name)
                .map(|(i, _)| NodeId(i));
            if let Some(container) = container {
                self.nodes[idx].container = Some(container);
                self.nodes[container.0].nested_children.push(NodeId(idx));
                handled[idx] = true;
            }
        }
        handled
    }

    fn link_inheritance(&mut self, handled: &[bool]) {
        for idx in 0..self.nodes.len() {
            if handled[idx] {
                continue;
            }
            let id = NodeId(idx);
            let parent = self.nodes[idx]
                .entity
                .declared_base()
                .and_then(|base| self.resolve_base(id, base));

            match parent {
                Some(parent) if self.is_ancestor_or_self(id, parent) => {
                    tracing::warn!(
                        "inheritance cycle: {} -> {} refused, {} treated as root",
                        self.nodes[idx].entity.full_name(),
                        self.nodes[parent.0].entity.full_name(),
                        self.nodes[idx].entity.name
                    );
                    self.roots.push(id);
                }
                Some(parent) => {
                    self.nodes[idx].parent = Some(parent);
                    self.nodes[parent.0].children.push(id);
                }
                None => self.roots.push(id),
            }
        }
    }

    /// Detach nodes that no root can reach (a containment loop, or nesting
    /// mixed with inheritance into a loop) and make them roots.
    fn promote_unreachable(&mut self) {
        let mut reachable = vec![false; self.nodes.len()];
        for root in self.roots.clone() {
            self.mark_reachable(root, &mut reachable);
        }
        for idx in 0..self.nodes.len() {
            if reachable[idx] {
                continue;
            }
            let id = NodeId(idx);
            if let Some(parent) = self.nodes[idx].parent.take() {
                self.nodes[parent.0].children.retain(|c| *c != id);
            }
            if let Some(container) = self.nodes[idx].container.take() {
                self.nodes[container.0].nested_children.retain(|c| *c != id);
            }
            tracing::warn!(
                "{} is part of a class loop, treated as root",
                self.nodes[idx].entity.full_name()
            );
            self.roots.push(id);
            self.mark_reachable(id, &mut reachable);
        }
    }

    fn mark_reachable(&self, start: NodeId, reachable: &mut [bool]) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if reachable[id.0] {
                continue;
            }
            reachable[id.0] = true;
            let node = &self.nodes[id.0];
            stack.extend(node.children.iter().copied());
            stack.extend(node.nested_children.iter().copied());
        }
    }

    /// Resolve a base-class reference: exact full name, then the node's own
    /// namespace, then the first node with a matching simple name.
    fn resolve_base(&self, id: NodeId, base: &str) -> Option<NodeId> {
        if let Some(&found) = self.by_full_name.get(base) {
            return Some(found);
        }
        if let Some(ns) = self.nodes[id.0].entity.namespace.as_deref()
            && let Some(&found) = self.by_full_name.get(&format!("{}.{}", ns, base))
        {
            return Some(found);
        }
        self.nodes
            .iter()
            .position(|n| n.entity.name == base)
            .map(NodeId)
    }

    /// Whether `candidate` is `start` or one of its inheritance ancestors.
    fn is_ancestor_or_self(&self, candidate: NodeId, start: NodeId) -> bool {
        let mut current = Some(start);
        let mut steps = 0;
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn assign_depths(&mut self) {
        let mut stack: Vec<(NodeId, usize)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| (NodeId(i), 0))
            .collect();
        while let Some((id, depth)) = stack.pop() {
            self.nodes[id.0].depth = depth;
            for &child in &self.nodes[id.0].children {
                stack.push((child, depth + 1));
            }
        }
    }

    fn sort_edges(&mut self) {
        for idx in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[idx].children);
            let mut nested = std::mem::take(&mut self.nodes[idx].nested_children);
            children.sort_by(|a, b| self.name_of(*a).cmp(self.name_of(*b)));
            nested.sort_by(|a, b| self.name_of(*a).cmp(self.name_of(*b)));
            self.nodes[idx].children = children;
            self.nodes[idx].nested_children = nested;
        }
        let mut roots = std::mem::take(&mut self.roots);
        roots.sort_by(|a, b| self.name_of(*a).cmp(self.name_of(*b)));
        self.roots = roots;
    }

    fn name_of(&self, id: NodeId) -> &str {
        &self.nodes[id.0].entity.name
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    /// Root nodes, sorted by entity name.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in table order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn find_by_full_name(&self, full_name: &str) -> Option<NodeId> {
        self.by_full_name.get(full_name).copied()
    }

    /// First node (table order) with the given simple name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.entity.name == name)
            .map(NodeId)
    }

    /// Inheritance ancestors of `id`, nearest first. Excludes `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, |p| self.nodes[p.0].parent)
    }

    /// Inheritance chain from the topmost ancestor down to `id`, inclusive.
    pub fn inheritance_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// Count every descendant of `id` across both edge kinds.
    pub fn descendant_counts(&self, id: NodeId) -> DescendantCounts {
        let mut counts = DescendantCounts::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current.0];
            counts.inherited += node.children.len();
            counts.nested += node.nested_children.len();
            stack.extend(node.children.iter().copied());
            stack.extend(node.nested_children.iter().copied());
        }
        counts
    }
}
