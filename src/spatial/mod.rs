pub mod graph;
pub mod id;
pub mod node;

pub use self::id::{NodeId, NodeIds};

pub mod prelude {
    pub use super::graph::SceneGraph;
    pub use super::id::NodeId;
    pub use super::node::Node;
}
