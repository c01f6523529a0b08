use std::collections::HashMap;

use serde_json::Value;

use crate::scene::scene_graph::{NodeId, NodeKind, SceneGraph, SceneNode};

/// In-memory [`SceneGraph`], used headless and in tests
#[derive(Default)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
    last_node_id: NodeId,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of a node's children, in insertion order
    pub fn child_names(&self, id: NodeId) -> Vec<&str> {
        self.nodes
            .get(&id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|child| self.nodes.get(child))
                    .map(|child| child.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SceneGraph for Scene {
    fn add_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        kind: NodeKind,
        properties: Value,
    ) -> Option<NodeId> {
        let id = self.last_node_id + 1;
        match parent {
            Some(parent) => self.nodes.get_mut(&parent)?.children.push(id),
            None => self.roots.push(id),
        }
        self.last_node_id = id;
        self.nodes.insert(
            id,
            SceneNode {
                id,
                name: name.to_string(),
                parent,
                children: Vec::new(),
                kind,
                properties,
            },
        );
        Some(id)
    }

    fn update_node(&mut self, id: NodeId, properties: Value) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.properties = properties;
                true
            }
            None => false,
        }
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };
        match node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            Some(parent) => parent.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }

        let mut orphans = node.children;
        while let Some(orphan) = orphans.pop() {
            if let Some(removed) = self.nodes.remove(&orphan) {
                orphans.extend(removed.children);
            }
        }
        true
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn roots(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
