//! In-memory chain index.
//!
//! Links live in an append-only arena and point at their parent by index, so
//! forks share ancestors without reference cycles. Links are never mutated
//! after insertion; readers on any number of threads can walk the arena
//! through shared references.

use crate::domain::{block_work, CompactTarget};
use crate::error::IndexError;
use crate::ports::ChainLink;
use primitive_types::U256;

/// Position of a link in a [`ChainArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
    /// Arena slot.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct ArenaNode {
    height: u64,
    bits: CompactTarget,
    time: i64,
    chain_work: U256,
    parent: Option<LinkId>,
}

/// Append-only block index with per-link cumulative work.
#[derive(Clone, Debug, Default)]
pub struct ChainArena {
    nodes: Vec<ArenaNode>,
    best: Option<LinkId>,
}

impl ChainArena {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no genesis has been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a link. `parent == None` adds the genesis link, which must be first.
    pub fn push(
        &mut self,
        parent: Option<LinkId>,
        bits: CompactTarget,
        time: i64,
    ) -> Result<LinkId, IndexError> {
        let (height, parent_work) = match parent {
            None if !self.nodes.is_empty() => return Err(IndexError::DuplicateGenesis),
            None => (0, U256::zero()),
            Some(id) => {
                let node = self
                    .nodes
                    .get(id.0)
                    .ok_or(IndexError::UnknownParent(id.0))?;
                (node.height + 1, node.chain_work)
            }
        };

        let id = LinkId(self.nodes.len());
        let chain_work = parent_work.saturating_add(block_work(bits));
        self.nodes.push(ArenaNode {
            height,
            bits,
            time,
            chain_work,
            parent,
        });

        // Most work wins; the first link seen keeps a tie
        let is_best = match self.best {
            None => true,
            Some(best) => chain_work > self.nodes[best.0].chain_work,
        };
        if is_best {
            self.best = Some(id);
        }

        Ok(id)
    }

    /// Handle for `id`, if present.
    pub fn link(&self, id: LinkId) -> Option<ArenaLink<'_>> {
        (id.0 < self.nodes.len()).then_some(ArenaLink { arena: self, id })
    }

    /// Genesis link.
    pub fn genesis(&self) -> Option<ArenaLink<'_>> {
        self.link(LinkId(0))
    }

    /// Link with the most cumulative work.
    pub fn tip(&self) -> Option<ArenaLink<'_>> {
        self.best.and_then(|id| self.link(id))
    }
}

/// Borrowed handle to one link of a [`ChainArena`].
#[derive(Copy, Clone, Debug)]
pub struct ArenaLink<'a> {
    arena: &'a ChainArena,
    id: LinkId,
}

impl<'a> ArenaLink<'a> {
    /// Arena position of this link.
    pub fn id(&self) -> LinkId {
        self.id
    }

    fn node(&self) -> &'a ArenaNode {
        &self.arena.nodes[self.id.0]
    }
}

impl PartialEq for ArenaLink<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl Eq for ArenaLink<'_> {}

impl ChainLink for ArenaLink<'_> {
    fn height(&self) -> u64 {
        self.node().height
    }

    fn bits(&self) -> CompactTarget {
        self.node().bits
    }

    fn time(&self) -> i64 {
        self.node().time
    }

    fn chain_work(&self) -> U256 {
        self.node().chain_work
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| ArenaLink {
            arena: self.arena,
            id,
        })
    }

    fn ancestor(&self, height: u64) -> Option<Self> {
        if height > self.height() {
            return None;
        }
        let mut link = *self;
        while link.height() > height {
            link = link.parent()?;
        }
        Some(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITS: CompactTarget = CompactTarget(0x207f_ffff);

    fn linear(count: u64) -> (ChainArena, Vec<LinkId>) {
        let mut arena = ChainArena::new();
        let mut ids = Vec::new();
        let mut parent = None;
        for h in 0..count {
            let id = arena.push(parent, BITS, h as i64 * 60).unwrap();
            ids.push(id);
            parent = Some(id);
        }
        (arena, ids)
    }

    #[test]
    fn test_heights_and_parents() {
        let (arena, ids) = linear(5);
        let tip = arena.tip().unwrap();
        assert_eq!(tip.height(), 4);
        assert_eq!(tip.id(), ids[4]);
        assert_eq!(tip.parent().unwrap().height(), 3);
        assert!(arena.genesis().unwrap().parent().is_none());
    }

    #[test]
    fn test_chain_work_accumulates() {
        let (arena, _) = linear(5);
        let tip = arena.tip().unwrap();
        assert_eq!(tip.chain_work(), block_work(BITS) * U256::from(5));
    }

    #[test]
    fn test_ancestor_lookup() {
        let (arena, ids) = linear(10);
        let tip = arena.tip().unwrap();

        assert_eq!(tip.ancestor(9), Some(tip));
        assert_eq!(tip.ancestor(3).unwrap().id(), ids[3]);
        assert_eq!(tip.ancestor(0).unwrap().id(), ids[0]);
        assert!(tip.ancestor(10).is_none());

        let mid = arena.link(ids[4]).unwrap();
        assert!(mid.ancestor(5).is_none());
    }

    #[test]
    fn test_forks_share_ancestors() {
        let (mut arena, ids) = linear(5);
        let harder = CompactTarget(0x2000_ffff);
        let fork = arena.push(Some(ids[2]), harder, 1_000).unwrap();

        let fork_link = arena.link(fork).unwrap();
        assert_eq!(fork_link.height(), 3);
        assert_eq!(fork_link.ancestor(2).unwrap().id(), ids[2]);
        assert_eq!(arena.len(), 6);
    }

    #[test]
    fn test_tip_follows_most_work() {
        let (mut arena, ids) = linear(3);
        assert_eq!(arena.tip().unwrap().id(), ids[2]);

        // One much harder block on a side branch outweighs the main chain
        let fork = arena.push(Some(ids[0]), CompactTarget(0x1d00_ffff), 0).unwrap();
        assert_eq!(arena.tip().unwrap().id(), fork);
    }

    #[test]
    fn test_insert_errors() {
        let (mut arena, _) = linear(2);
        assert_eq!(arena.push(None, BITS, 0), Err(IndexError::DuplicateGenesis));
        assert_eq!(
            arena.push(Some(LinkId(99)), BITS, 0),
            Err(IndexError::UnknownParent(99))
        );
    }

    #[test]
    fn test_empty_arena() {
        let arena = ChainArena::new();
        assert!(arena.is_empty());
        assert!(arena.tip().is_none());
        assert!(arena.genesis().is_none());
    }
}
