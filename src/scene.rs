//! The animated scene: a `SceneGraph` whose nodes carry a `Motion` and an optional
//! drawable payload.

use std::ops::Deref;

use crate::errors::*;
use crate::math::prelude::*;
use crate::motion::Motion;
use crate::spatial::graph::SceneGraph;
use crate::utils::FastHashMap;
use crate::NodeId;

/// `Scene` owns a tree of nodes. Each node has a local transform, an optional motion
/// which mutates that transform every tick, and an optional drawable `D` which is
/// passed through untouched to whoever renders the scene.
///
/// Read-only queries of the hierarchy and the transforms are available through
/// `Deref<Target = SceneGraph>`.
pub struct Scene<D> {
    graph: SceneGraph,
    motions: FastHashMap<NodeId, Motion>,
    drawables: FastHashMap<NodeId, D>,
}

impl<D> Default for Scene<D> {
    fn default() -> Self {
        Scene::new()
    }
}

impl<D> Deref for Scene<D> {
    type Target = SceneGraph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<D> Scene<D> {
    pub fn new() -> Self {
        Scene {
            graph: SceneGraph::new(),
            motions: FastHashMap::default(),
            drawables: FastHashMap::default(),
        }
    }

    /// Creates a node with the motion, initial local transform and drawable, and
    /// attachs `children` under it in order. The new node is a root.
    ///
    /// Everything is validated before the node is created, so a failed call leaves
    /// the scene unchanged. An orbiting node is moved onto its orbit at the current
    /// phase, keeping the rotation and scale of `local`.
    pub fn create_node<M, T>(
        &mut self,
        motion: M,
        children: &[NodeId],
        local: Matrix4<f32>,
        drawable: T,
    ) -> Result<NodeId>
    where
        M: Into<Option<Motion>>,
        T: Into<Option<D>>,
    {
        let motion = motion.into();
        if let Some(ref motion) = motion {
            motion.validate()?;
        }

        if let Some(&v) = children.iter().find(|&&v| !self.graph.contains(v)) {
            return Err(Error::NodeHandleInvalid(v));
        }

        let mut local = local;
        if let Some(ref motion) = motion {
            motion.place(&mut local);
        }

        let ent = self.graph.add(local);
        for &child in children {
            self.graph.set_parent(child, ent)?;
        }

        if let Some(motion) = motion {
            self.motions.insert(ent, motion);
        }

        if let Some(drawable) = drawable.into() {
            self.drawables.insert(ent, drawable);
        }

        Ok(ent)
    }

    /// Attachs `child` under `parent`, after its existing children. The child is
    /// removed from its previous parent first.
    #[inline]
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.graph.set_parent(child, parent)
    }

    /// Detachs `child` from its parent, making it the root of its own tree.
    #[inline]
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        self.graph.remove_from_parent(child)
    }

    /// Deletes a node and all of its descendants, with their motions and drawables.
    pub fn delete(&mut self, ent: NodeId) -> Option<Vec<NodeId>> {
        let removes = self.graph.remove(ent)?;
        for v in &removes {
            self.motions.remove(v);
            self.drawables.remove(v);
        }

        Some(removes)
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_matrix(&mut self, ent: NodeId, local: Matrix4<f32>) -> Result<()> {
        self.graph.set_local_matrix(ent, local)
    }

    /// Gets the motion of node.
    #[inline]
    pub fn motion(&self, ent: NodeId) -> Option<&Motion> {
        self.motions.get(&ent)
    }

    /// Replaces the motion of node. Passing `None` makes it stationary.
    pub fn set_motion<M>(&mut self, ent: NodeId, motion: M) -> Result<()>
    where
        M: Into<Option<Motion>>,
    {
        if !self.graph.contains(ent) {
            return Err(Error::NodeHandleInvalid(ent));
        }

        match motion.into() {
            Some(motion) => {
                motion.validate()?;
                self.motions.insert(ent, motion);
            }
            None => {
                self.motions.remove(&ent);
            }
        }

        Ok(())
    }

    /// Gets the drawable payload of node.
    #[inline]
    pub fn drawable(&self, ent: NodeId) -> Option<&D> {
        self.drawables.get(&ent)
    }

    /// Returns every node carrying a drawable, in arena order.
    pub fn drawables(&self) -> impl Iterator<Item = (NodeId, &D)> + '_ {
        self.graph
            .nodes()
            .iter()
            .filter_map(move |&v| self.drawables.get(&v).map(|d| (v, d)))
    }

    /// Animates the local transform of `ent` by `dt`, and then the transforms of all
    /// its descendants if `recursive` is set. World matrices are not touched.
    pub fn tick(&mut self, ent: NodeId, dt: f32, recursive: bool) -> Result<()> {
        if !self.graph.contains(ent) {
            return Err(Error::NodeHandleInvalid(ent));
        }

        if recursive {
            self.tick_tree(ent, dt);
        } else {
            self.animate(ent, dt);
        }

        Ok(())
    }

    fn tick_tree(&mut self, ent: NodeId, dt: f32) {
        let descendants: Vec<_> = self.graph.descendants(ent).collect();
        self.animate(ent, dt);
        for v in descendants {
            self.animate(v, dt);
        }
    }

    fn animate(&mut self, ent: NodeId, dt: f32) {
        if let Some(motion) = self.motions.get_mut(&ent) {
            if let Some(local) = self.graph.local_matrix_mut(ent) {
                motion.apply(local, dt);
            }
        }
    }

    /// Recomputes the world matrix of every node from the roots down.
    #[inline]
    pub fn update_world_matrix(&mut self) {
        self.graph.update_world_matrix();
    }

    /// Recomputes the world matrix of `ent` and its descendants under the supplied
    /// parent world transform.
    #[inline]
    pub fn update_world_matrix_from<T>(&mut self, ent: NodeId, parent_world: T) -> Result<()>
    where
        T: Into<Option<Matrix4<f32>>>,
    {
        self.graph.update_world_matrix_from(ent, parent_world)
    }

    /// Runs one frame: ticks every tree recursively by `dt`, then propagates the world
    /// matrices. Both passes complete before this returns.
    pub fn advance(&mut self, dt: f32) {
        let roots: Vec<_> = self.graph.roots().collect();
        for root in roots {
            self.tick_tree(root, dt);
        }

        self.graph.update_world_matrix();
        trace!("Advances scene of {} nodes by {}.", self.graph.len(), dt);
    }
}
