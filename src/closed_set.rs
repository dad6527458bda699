use crate::NodeID;

/// Per-cell flags for the cells whose cost is final.
///
/// Marked cells are also kept in insertion order, so that clearing the set and listing its
/// contents only touch the cells that were actually marked.
#[derive(Clone, Debug)]
pub(crate) struct ClosedSet {
    flags: Vec<bool>,
    marked: Vec<NodeID>,
}

impl ClosedSet {
    pub fn new(len: usize) -> ClosedSet {
        ClosedSet {
            flags: vec![false; len],
            marked: Vec::new(),
        }
    }

    pub fn mark(&mut self, id: NodeID) {
        let flag = &mut self.flags[id as usize];
        if !*flag {
            *flag = true;
            self.marked.push(id);
        }
    }

    pub fn contains(&self, id: NodeID) -> bool {
        self.flags[id as usize]
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// The marked cells in the order they were closed
    pub fn iter(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.marked.iter().copied()
    }

    pub fn clear(&mut self) {
        for id in self.marked.drain(..) {
            self.flags[id as usize] = false;
        }
    }
}
