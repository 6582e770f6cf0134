use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

/// Identifies a node of a `SceneGraph`.
///
/// The slot of a removed node is handed out again, so a `NodeId` also records the
/// generation of the slot. An id kept around after its node was removed never
/// refers to the new occupant of the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    slot: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub fn slot(self) -> u32 {
        self.slot
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node #{}.{}", self.slot, self.generation)
    }
}

/// Allocates `NodeId`s. The generation of a slot is odd while a node lives in it,
/// and even once the node is released. Released slots are reused lowest first, so
/// the arena stays dense.
#[derive(Debug, Default)]
pub struct NodeIds {
    generations: Vec<u32>,
    vacant: BinaryHeap<Reverse<u32>>,
}

impl NodeIds {
    pub fn new() -> Self {
        NodeIds::default()
    }

    pub fn allocate(&mut self) -> NodeId {
        match self.vacant.pop() {
            Some(Reverse(slot)) => {
                let generation = &mut self.generations[slot as usize];
                *generation += 1;
                NodeId {
                    slot,
                    generation: *generation,
                }
            }
            None => {
                self.generations.push(1);
                NodeId {
                    slot: self.generations.len() as u32 - 1,
                    generation: 1,
                }
            }
        }
    }

    /// Returns true if `id` was allocated here and has not been released yet.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.generations
            .get(id.slot as usize)
            .map(|&v| v & 1 == 1 && v == id.generation)
            .unwrap_or(false)
    }

    /// Releases `id`. Returns false if it was already released.
    pub fn release(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        self.generations[id.slot as usize] += 1;
        self.vacant.push(Reverse(id.slot));
        true
    }

    /// Returns the number of live ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.generations.len() - self.vacant.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
