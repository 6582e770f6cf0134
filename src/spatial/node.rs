use smallvec::SmallVec;

use crate::NodeId;

/// `Node` records the tree relationships of an object in the `SceneGraph`. Every
/// `Node` can have a parent, which allows you to apply transforms hierarchically.
///
/// `NodeId` are used to record the tree relationships. Every access requires going
/// through the arena, which can be cumbersome and comes with some runtime overhead.
/// But it keeps ownership simple: the arena owns every node, children are an ordered
/// list of ids, and the parent id is only a back-reference.
#[derive(Default, Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
}
