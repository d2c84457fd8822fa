use std::{
    collections::HashSet,
    sync::{Arc, LazyLock},
};

use parking_lot::Mutex;

use crate::{Error, MAX_NODE_ID, Result};

static GLOBAL: LazyLock<NodeRegistry> = LazyLock::new(NodeRegistry::new);

/// The set of node IDs currently owned by live generators.
///
/// A registry guarantees that at most one generator per node ID is built from
/// it. Claims are not tied to the generator's lifetime: dropping a
/// [`Generator`] leaves its node ID claimed until [`NodeRegistry::release`] or
/// [`NodeRegistry::reset_all`] is called.
///
/// Registries are cheap handles; clones share the same set. Generators use
/// [`NodeRegistry::global`] unless configured otherwise.
///
/// ```
/// use distid::{Error, NodeRegistry};
///
/// let registry = NodeRegistry::new();
/// registry.register(7).unwrap();
/// assert_eq!(registry.register(7), Err(Error::NodeIdInUse { node_id: 7 }));
///
/// assert!(registry.release(7));
/// registry.register(7).unwrap();
/// ```
///
/// [`Generator`]: crate::Generator
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    used: Arc<Mutex<HashSet<u16>>>,
}

impl NodeRegistry {
    /// Creates an empty registry independent of the global one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry shared by every generator that does not name
    /// its own.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Claims `node_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNodeId`] if `node_id` exceeds [`MAX_NODE_ID`]
    /// - [`Error::NodeIdInUse`] if it is already claimed
    pub fn register(&self, node_id: u16) -> Result<()> {
        if node_id > MAX_NODE_ID {
            return Err(Error::InvalidNodeId { node_id });
        }
        if !self.used.lock().insert(node_id) {
            return Err(Error::NodeIdInUse { node_id });
        }
        Ok(())
    }

    /// Frees `node_id`, returning whether it was claimed.
    ///
    /// The caller must make sure the generator that owned it has stopped
    /// producing IDs, otherwise two generators may share a node.
    pub fn release(&self, node_id: u16) -> bool {
        self.used.lock().remove(&node_id)
    }

    /// Frees every node ID.
    ///
    /// Intended for test isolation and administrative resets. Calling it while
    /// generators built from this registry are still in use allows duplicate
    /// node IDs, and with them duplicate IDs.
    pub fn reset_all(&self) {
        self.used.lock().clear();
    }

    /// Returns whether `node_id` is currently claimed.
    pub fn contains(&self, node_id: u16) -> bool {
        self.used.lock().contains(&node_id)
    }

    /// Number of claimed node IDs.
    pub fn len(&self) -> usize {
        self.used.lock().len()
    }

    /// Returns `true` when no node ID is claimed.
    pub fn is_empty(&self) -> bool {
        self.used.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Barrier, thread::scope};

    #[test]
    fn rejects_out_of_range_ids() {
        let registry = NodeRegistry::new();
        assert!(registry.register(0).is_ok());
        assert!(registry.register(MAX_NODE_ID).is_ok());
        assert_eq!(
            registry.register(MAX_NODE_ID + 1),
            Err(Error::InvalidNodeId { node_id: 1024 })
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn reset_frees_everything() {
        let registry = NodeRegistry::new();
        for node_id in 0..10 {
            registry.register(node_id).unwrap();
        }
        registry.reset_all();
        assert!(registry.is_empty());
        registry.register(3).unwrap();
        assert!(registry.contains(3));
    }

    #[test]
    fn release_only_frees_one_id() {
        let registry = NodeRegistry::new();
        registry.register(1).unwrap();
        registry.register(2).unwrap();
        assert!(registry.release(1));
        assert!(!registry.release(1));
        assert!(!registry.contains(1));
        assert!(registry.contains(2));
    }

    #[test]
    fn clones_share_state_but_registries_are_independent() {
        let a = NodeRegistry::new();
        let a2 = a.clone();
        let b = NodeRegistry::new();
        a.register(5).unwrap();
        assert_eq!(a2.register(5), Err(Error::NodeIdInUse { node_id: 5 }));
        assert!(b.register(5).is_ok());
    }

    #[test]
    fn concurrent_claims_have_one_winner() {
        const THREADS: usize = 8;
        let registry = NodeRegistry::new();
        let barrier = Barrier::new(THREADS);

        let winners: usize = scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        registry.register(42).is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });

        assert_eq!(winners, 1);
    }
}
