use crate::frontier::FrontierHandle;
use crate::{Cost, NodeID};

/// Where a cell currently stands in the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Not reached by the current search
    Unseen,
    /// Reached and waiting in the frontier
    Open,
    /// Expanded. Its cost is final.
    Closed,
}

/// The search record of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub(crate) g: Cost,
    pub(crate) h: Cost,
    pub(crate) f: Cost,
    pub(crate) parent: Option<NodeID>,
    pub(crate) state: NodeState,
    pub(crate) handle: Option<FrontierHandle>,
    generation: u32,
}

static UNSEEN: SearchNode = SearchNode {
    g: 0,
    h: 0,
    f: 0,
    parent: None,
    state: NodeState::Unseen,
    handle: None,
    generation: 0,
};

impl SearchNode {
    /// The cost of the best known Path from the start (scaled x10)
    pub fn g(&self) -> Cost {
        self.g
    }
    /// The Heuristic estimate to the goal (scaled x10)
    pub fn h(&self) -> Cost {
        self.h
    }
    /// `g + h`, the priority in the frontier
    pub fn f(&self) -> Cost {
        self.f
    }
    /// The predecessor on the best known Path. `None` for the start.
    pub fn parent(&self) -> Option<NodeID> {
        self.parent
    }
    /// The [`NodeState`] of this cell
    pub fn state(&self) -> NodeState {
        self.state
    }
}

/// One [`SearchNode`] per cell, reused between searches.
///
/// Records are reset lazily: [`reset`](NodePool::reset) only bumps a generation counter, and a
/// record from an older generation reads as [`NodeState::Unseen`] until it is touched again.
#[derive(Clone, Debug)]
pub(crate) struct NodePool {
    nodes: Vec<SearchNode>,
    generation: u32,
    touched: usize,
}

impl NodePool {
    pub fn new(len: usize) -> NodePool {
        NodePool {
            nodes: vec![UNSEEN; len],
            generation: 1,
            touched: 0,
        }
    }

    /// The record of `id`, or the default Unseen record if it was not touched since the
    /// last reset.
    pub fn get(&self, id: NodeID) -> &SearchNode {
        let node = &self.nodes[id as usize];
        if node.generation == self.generation {
            node
        } else {
            &UNSEEN
        }
    }

    /// The record of `id`, initialized to Unseen on the first touch after a reset.
    pub fn get_mut(&mut self, id: NodeID) -> &mut SearchNode {
        let generation = self.generation;
        let node = &mut self.nodes[id as usize];
        if node.generation != generation {
            *node = SearchNode {
                generation,
                ..UNSEEN
            };
            self.touched += 1;
        }
        node
    }

    /// Marks every record as Unseen.
    pub fn reset(&mut self) {
        self.touched = 0;
        if self.generation == u32::MAX {
            self.nodes.fill(UNSEEN);
            self.generation = 1;
        } else {
            self.generation += 1;
        }
    }

    /// The number of records touched since the last reset
    pub fn touched(&self) -> usize {
        self.touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_init() {
        let mut pool = NodePool::new(4);
        assert_eq!(pool.get(2).state(), NodeState::Unseen);
        assert_eq!(pool.touched(), 0);

        let node = pool.get_mut(2);
        node.g = 30;
        node.state = NodeState::Open;
        assert_eq!(pool.get(2).g(), 30);
        assert_eq!(pool.touched(), 1);

        pool.get_mut(2).g = 20;
        assert_eq!(pool.touched(), 1);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut pool = NodePool::new(4);
        for id in 0..4 {
            let node = pool.get_mut(id);
            node.state = NodeState::Closed;
            node.parent = Some(0);
        }
        pool.reset();
        for id in 0..4 {
            assert_eq!(*pool.get(id), UNSEEN);
            assert_eq!(pool.get_mut(id).state(), NodeState::Unseen);
            assert_eq!(pool.get(id).parent(), None);
        }
    }

    #[test]
    fn generation_wraps() {
        let mut pool = NodePool::new(2);
        pool.get_mut(0).state = NodeState::Closed;
        pool.generation = u32::MAX;
        pool.get_mut(1).state = NodeState::Open;
        pool.reset();
        assert_eq!(pool.generation, 1);
        assert_eq!(pool.get(0).state(), NodeState::Unseen);
        assert_eq!(pool.get(1).state(), NodeState::Unseen);
    }
}
