use serde_json::Value;

use tandem_shared::{ActorId, ComponentId};

pub type NodeId = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Root node mirroring one actor
    Actor { actor_id: ActorId, actor_type: String },
    /// Child node mirroring one component snapshot
    Component { component_id: ComponentId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub properties: Value,
}

/// The seam to a 3D library. The render context only ever builds trees of
/// named nodes with opaque properties.
pub trait SceneGraph {
    /// Adds a node under `parent`, or at the root. Returns `None` if the
    /// parent does not exist.
    fn add_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        kind: NodeKind,
        properties: Value,
    ) -> Option<NodeId>;

    /// Replaces a node's properties
    fn update_node(&mut self, id: NodeId, properties: Value) -> bool;

    /// Removes a node and everything below it
    fn remove_node(&mut self, id: NodeId) -> bool;

    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Top-level node ids, in insertion order
    fn roots(&self) -> Vec<NodeId>;

    fn node_count(&self) -> usize;
}
