//! Hierarchy projections of menu nodes

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::menu_node::MenuNode;

/// A menu node with its subtree materialized to some number of levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTree {
    #[serde(flatten)]
    pub node: MenuNode,

    /// Only set on the top-level node of a projection; `Some(None)` renders as `null` for roots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<MenuNode>>,

    pub children: Children,
}

/// Children are inlined as objects until the level bound, then listed by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    Expanded(Vec<MenuTree>),
    Collapsed(Vec<Uuid>),
}

impl Children {
    pub fn len(&self) -> usize {
        match self {
            Children::Expanded(trees) => trees.len(),
            Children::Collapsed(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<Uuid> {
        match self {
            Children::Expanded(trees) => trees.iter().map(|t| t.node.id).collect(),
            Children::Collapsed(ids) => ids.clone(),
        }
    }

    pub fn expanded(&self) -> Option<&[MenuTree]> {
        match self {
            Children::Expanded(trees) => Some(trees),
            Children::Collapsed(_) => None,
        }
    }
}

impl MenuTree {
    pub fn with_parent(mut self, parent: Option<MenuNode>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Number of descendant generations inlined as objects below this node.
    pub fn expanded_levels(&self) -> u32 {
        match &self.children {
            Children::Collapsed(_) => 0,
            Children::Expanded(trees) => trees
                .iter()
                .map(|t| 1 + t.expanded_levels())
                .max()
                .unwrap_or(0),
        }
    }
}

/// Sibling lists keyed by parent id, each ordered by position.
#[derive(Debug, Default)]
pub struct ChildIndex {
    children: HashMap<Uuid, Vec<MenuNode>>,
}

impl ChildIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups nodes by parent, keeping the incoming order within each group.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a MenuNode>) -> Self {
        let mut index = Self::new();
        for node in nodes {
            if let Some(parent_id) = node.parent_id {
                index
                    .children
                    .entry(parent_id)
                    .or_default()
                    .push(node.clone());
            }
        }
        index
    }

    pub fn insert(&mut self, parent_id: Uuid, children: Vec<MenuNode>) {
        self.children.insert(parent_id, children);
    }

    pub fn children_of(&self, parent_id: &Uuid) -> &[MenuNode] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Expands `node` `levels` generations deep. At the bound the children are
    /// listed by id only; anything deeper is left out.
    pub fn build(&self, node: MenuNode, levels: u32) -> MenuTree {
        let children = if levels == 0 {
            Children::Collapsed(self.children_of(&node.id).iter().map(|c| c.id).collect())
        } else {
            Children::Expanded(
                self.children_of(&node.id)
                    .iter()
                    .map(|child| self.build(child.clone(), levels - 1))
                    .collect(),
            )
        };

        MenuTree {
            node,
            parent: None,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, parent: Option<&MenuNode>, position: i32) -> MenuNode {
        let depth = parent.map_or(0, |p| p.depth + 1);
        MenuNode::new(name, parent.map(|p| p.id), depth, position).unwrap()
    }

    /// root -> a -> b -> c
    fn chain() -> (Vec<MenuNode>, ChildIndex) {
        let root = node("root", None, 0);
        let a = node("a", Some(&root), 0);
        let b = node("b", Some(&a), 0);
        let c = node("c", Some(&b), 0);
        let nodes = vec![root, a, b, c];
        let index = ChildIndex::from_nodes(&nodes);
        (nodes, index)
    }

    #[test]
    fn test_zero_levels_lists_child_ids() {
        let (nodes, index) = chain();
        let tree = index.build(nodes[0].clone(), 0);

        assert_eq!(tree.children, Children::Collapsed(vec![nodes[1].id]));
        assert_eq!(tree.expanded_levels(), 0);
    }

    #[test]
    fn test_two_levels_stop_at_bound() {
        let (nodes, index) = chain();
        let tree = index.build(nodes[0].clone(), 2);

        assert_eq!(tree.expanded_levels(), 2);
        let a = &tree.children.expanded().unwrap()[0];
        let b = &a.children.expanded().unwrap()[0];
        assert_eq!(b.node.id, nodes[2].id);
        assert_eq!(b.children, Children::Collapsed(vec![nodes[3].id]));
    }

    #[test]
    fn test_leaf_beyond_data_is_empty() {
        let (nodes, index) = chain();
        let tree = index.build(nodes[3].clone(), 5);
        assert_eq!(tree.children, Children::Expanded(vec![]));
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_sibling_order_preserved() {
        let root = node("root", None, 0);
        let first = node("first", Some(&root), 0);
        let second = node("second", Some(&root), 1);
        let index = ChildIndex::from_nodes([&root, &first, &second]);

        let tree = index.build(root.clone(), 1);
        assert_eq!(tree.children.ids(), vec![first.id, second.id]);
    }

    #[test]
    fn test_serialization_shapes() {
        let (nodes, index) = chain();
        let tree = index.build(nodes[0].clone(), 1).with_parent(None);
        let json = serde_json::to_value(&tree).unwrap();

        assert!(json["parent"].is_null());
        assert_eq!(json["name"], "root");
        let child = &json["children"][0];
        assert_eq!(child["name"], "a");
        assert!(child.get("parent").is_none());
        assert_eq!(child["children"][0], nodes[2].id.to_string());
    }
}
