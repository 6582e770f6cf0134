use std::iter;

use crate::errors::*;
use crate::math::prelude::*;
use crate::math::translation_of;
use crate::utils::{FastHashMap, FastHashSet};

use super::id::{NodeId, NodeIds};
use super::node::Node;

/// A simple scene graph that used to store and compose the local transforms of
/// objects. We do also keeps a tree relationships betweens object in scene graph, so
/// you can access transforms in both local and world space.
///
/// World matrices are derived data. They are recomputed by `update_world_matrix`
/// and are only meaningful right after a full pass; before the first pass every
/// world matrix is the identity.
pub struct SceneGraph {
    ids: NodeIds,
    remap: FastHashMap<NodeId, usize>,
    entities: Vec<NodeId>,
    nodes: Vec<Node>,
    local_matrices: Vec<Matrix4<f32>>,
    world_matrices: Vec<Matrix4<f32>>,
    roots: FastHashSet<NodeId>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        SceneGraph::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph {
            ids: NodeIds::new(),
            remap: FastHashMap::default(),
            entities: Vec::new(),
            nodes: Vec::new(),
            local_matrices: Vec::new(),
            world_matrices: Vec::new(),
            roots: FastHashSet::default(),
        }
    }

    /// Adds a new root node with the initial local transform.
    pub fn add(&mut self, local: Matrix4<f32>) -> NodeId {
        let ent = self.ids.allocate();

        self.remap.insert(ent, self.entities.len());
        self.entities.push(ent);
        self.nodes.push(Node::default());
        self.local_matrices.push(local);
        self.world_matrices.push(Matrix4::identity());
        self.roots.insert(ent);
        ent
    }

    /// Removes a node and all of its descendants from SceneGraph.
    pub fn remove(&mut self, ent: NodeId) -> Option<Vec<NodeId>> {
        let index = self.remap.get(&ent).cloned()?;
        self.unlink(index);
        self.roots.remove(&ent);

        let removes: Vec<_> = iter::once(ent).chain(self.descendants(ent)).collect();
        for w in removes.iter() {
            if let Some(index) = self.remap.remove(w) {
                self.entities.swap_remove(index);
                self.nodes.swap_remove(index);
                self.local_matrices.swap_remove(index);
                self.world_matrices.swap_remove(index);

                if self.entities.len() != index {
                    self.remap.insert(self.entities[index], index);
                }
            }

            self.ids.release(*w);
        }

        debug!("Removes {} and {} descendants.", ent, removes.len() - 1);
        Some(removes)
    }

    /// Returns the number of nodes in this graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns true if the node is alive in this graph.
    #[inline]
    pub fn contains(&self, ent: NodeId) -> bool {
        self.remap.contains_key(&ent)
    }

    /// Returns all the alive nodes, in arena order.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.entities
    }

    /// Returns the roots of every hierarchy. The order is unspecified.
    #[inline]
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().cloned()
    }

    #[inline]
    fn index(&self, ent: NodeId) -> Result<usize> {
        self.remap
            .get(&ent)
            .cloned()
            .ok_or_else(|| Error::NodeHandleInvalid(ent))
    }

    // Removes the node at `index` from the child list of its parent, if any.
    fn unlink(&mut self, index: usize) {
        let child = self.entities[index];
        if let Some(parent) = self.nodes[index].parent.take() {
            let pi = self.remap[&parent];
            let children = &mut self.nodes[pi].children;
            if let Some(position) = children.iter().position(|&v| v == child) {
                children.remove(position);
            }
        }

        self.roots.insert(child);
    }
}

impl SceneGraph {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: NodeId) -> Option<NodeId> {
        self.remap.get(&ent).and_then(|v| self.nodes[*v].parent)
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: NodeId) -> bool {
        self.remap
            .get(&ent)
            .map(|v| self.nodes[*v].children.is_empty())
            .unwrap_or(false)
    }

    /// Returns ture if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self, ent: NodeId) -> bool {
        self.remap
            .get(&ent)
            .map(|v| self.nodes[*v].parent.is_none())
            .unwrap_or(false)
    }

    /// Attachs a child to parent node, after existing children. The child is removed
    /// from its previous parent first. Passing `None` makes the child a root.
    pub fn set_parent<T>(&mut self, child: NodeId, parent: T) -> Result<()>
    where
        T: Into<Option<NodeId>>,
    {
        let child_index = self.index(child)?;

        if let Some(parent) = parent.into() {
            if parent == child {
                return Err(Error::CanNotAttachSelfAsParent);
            }

            let parent_index = self.index(parent)?;
            if self.is_ancestor(parent, child) {
                return Err(Error::CanNotAttachToDescendant(child, parent));
            }

            self.unlink(child_index);
            self.nodes[parent_index].children.push(child);
            self.nodes[child_index].parent = Some(parent);
            self.roots.remove(&child);
            debug!("Attachs {} to {}.", child, parent);
            Ok(())
        } else {
            self.remove_from_parent(child)
        }
    }

    /// Detach a node from its parent and siblings. Children are not affected.
    pub fn remove_from_parent(&mut self, child: NodeId) -> Result<()> {
        let index = self.index(child)?;
        self.unlink(index);
        debug!("Detachs {} from its parent.", child);
        Ok(())
    }

    /// Returns an iterator of references to its ancestors.
    #[inline]
    pub fn ancestors(&self, ent: NodeId) -> Ancestors {
        Ancestors {
            cursor: self.parent(ent),
            scene: self,
        }
    }

    /// Return true if rhs is one of the ancestor of this node.
    #[inline]
    pub fn is_ancestor(&self, lhs: NodeId, rhs: NodeId) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns an iterator of this node's children, in attaching order.
    #[inline]
    pub fn children(&self, ent: NodeId) -> Children {
        let children = self
            .remap
            .get(&ent)
            .map(|&v| &self.nodes[v].children[..])
            .unwrap_or(&[]);

        Children {
            iter: children.iter(),
        }
    }

    /// Returns an iterator of this node's descendants in tree order.
    #[inline]
    pub fn descendants(&self, ent: NodeId) -> Descendants {
        let stack: Vec<NodeId> = self
            .remap
            .get(&ent)
            .map(|&v| self.nodes[v].children.iter().rev().cloned().collect())
            .unwrap_or_default();

        Descendants { stack, scene: self }
    }
}

/// An iterator of references to its ancestors.
pub struct Ancestors<'a> {
    scene: &'a SceneGraph,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        self.cursor = self.scene.parent(ent);
        Some(ent)
    }
}

/// An iterator of references to its children.
pub struct Children<'a> {
    iter: ::std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().cloned()
    }
}

/// An iterator of references to its descendants, in tree order.
pub struct Descendants<'a> {
    scene: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.stack.pop()?;

        // Deep first search when iterating children recursively.
        if let Some(&index) = self.scene.remap.get(&ent) {
            let children = &self.scene.nodes[index].children;
            self.stack.extend(children.iter().rev().cloned());
        }

        Some(ent)
    }
}

impl SceneGraph {
    /// Gets the transform in local space.
    #[inline]
    pub fn local_matrix(&self, ent: NodeId) -> Option<Matrix4<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_matrices[index])
    }

    /// Gets a mutable reference of the transform in local space.
    #[inline]
    pub fn local_matrix_mut(&mut self, ent: NodeId) -> Option<&mut Matrix4<f32>> {
        match self.remap.get(&ent) {
            Some(&index) => Some(&mut self.local_matrices[index]),
            None => None,
        }
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_matrix(&mut self, ent: NodeId, local: Matrix4<f32>) -> Result<()> {
        let index = self.index(ent)?;
        self.local_matrices[index] = local;
        Ok(())
    }

    /// Gets position of the node in local space.
    #[inline]
    pub fn local_position(&self, ent: NodeId) -> Option<Vector3<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| translation_of(&self.local_matrices[index]))
    }

    /// Gets the transform in world space, as of the last propagation pass.
    #[inline]
    pub fn world_matrix(&self, ent: NodeId) -> Option<Matrix4<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.world_matrices[index])
    }

    /// Gets position of the node in world space, as of the last propagation pass.
    #[inline]
    pub fn world_position(&self, ent: NodeId) -> Option<Vector3<f32>> {
        self.world_matrix(ent).map(|m| translation_of(&m))
    }

    /// Composes the transform in world space by walking the ancestors, regardless
    /// of the propagation state.
    pub fn compose_world_matrix(&self, ent: NodeId) -> Option<Matrix4<f32>> {
        self.local_matrix(ent).map(|local| {
            self.ancestors(ent)
                .map(|v| self.remap[&v])
                .fold(local, |acc, rhs| self.local_matrices[rhs] * acc)
        })
    }

    /// Recomputes the world matrix of every node, starting from all the roots.
    pub fn update_world_matrix(&mut self) {
        let roots: Vec<_> = self.roots.iter().map(|v| self.remap[v]).collect();
        for index in roots {
            self.propagate(index, None);
        }

        trace!("Updates world matrices of {} nodes.", self.entities.len());
    }

    /// Recomputes the world matrix of `ent` and its descendants. `world = parent * local`
    /// if the parent world transform is supplied, otherwise `world = local`.
    pub fn update_world_matrix_from<T>(&mut self, ent: NodeId, parent_world: T) -> Result<()>
    where
        T: Into<Option<Matrix4<f32>>>,
    {
        let index = self.index(ent)?;
        self.propagate(index, parent_world.into());
        Ok(())
    }

    fn propagate(&mut self, index: usize, parent_world: Option<Matrix4<f32>>) {
        let mut stack = vec![(index, parent_world)];

        while let Some((index, parent_world)) = stack.pop() {
            let local = self.local_matrices[index];
            let world = match parent_world {
                Some(parent_world) => parent_world * local,
                None => local,
            };

            self.world_matrices[index] = world;
            for child in self.nodes[index].children.iter() {
                stack.push((self.remap[child], Some(world)));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stale_world_matrix_is_identity() {
        let mut graph = SceneGraph::new();
        let e1 = graph.add(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(graph.world_matrix(e1), Some(Matrix4::identity()));

        graph.update_world_matrix();
        assert_eq!(graph.world_position(e1), Some(Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn removed_ids_are_invalid() {
        let mut graph = SceneGraph::new();
        let e1 = graph.add(Matrix4::identity());
        let e2 = graph.add(Matrix4::identity());
        graph.set_parent(e2, e1).unwrap();

        assert_eq!(graph.remove(e1), Some(vec![e1, e2]));
        assert!(graph.is_empty());
        assert!(graph.remove(e1).is_none());

        let e3 = graph.add(Matrix4::identity());
        assert_ne!(e3, e1);
        assert!(!graph.contains(e1));
        match graph.set_parent(e3, e1) {
            Err(Error::NodeHandleInvalid(v)) => assert_eq!(v, e1),
            other => panic!("unexpected {:?}", other),
        }
    }
}
