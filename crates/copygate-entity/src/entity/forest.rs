//! In-memory traversal index over one request's entity forest.
//!
//! The entities of a request are fetched once and indexed by external id
//! with a parent→children adjacency map; every traversal is an iterative
//! walk over that index rather than a query per recursion level. Unknown
//! ids (not part of the request) are silently skipped by every operation.

use std::collections::{BTreeSet, HashMap, HashSet};

use uuid::Uuid;

use super::model::{Entity, ReviewStatus};

/// Index over one request's forest, keyed by external entity id.
#[derive(Debug)]
pub struct EntityForest<'a> {
    by_id: HashMap<Uuid, &'a Entity>,
    children: HashMap<Uuid, Vec<&'a Entity>>,
    roots: Vec<&'a Entity>,
}

impl<'a> EntityForest<'a> {
    /// Build the index from the request's full entity list.
    ///
    /// Row order is preserved for children and roots, so traversal output
    /// is deterministic for a fixed snapshot.
    pub fn new(entities: &'a [Entity]) -> Self {
        let mut by_id = HashMap::with_capacity(entities.len());
        let mut children: HashMap<Uuid, Vec<&'a Entity>> = HashMap::new();
        let mut roots = Vec::new();

        for entity in entities {
            by_id.insert(entity.entity_id, entity);
            match entity.parent_id {
                Some(parent) => children.entry(parent).or_default().push(entity),
                None => roots.push(entity),
            }
        }

        Self {
            by_id,
            children,
            roots,
        }
    }

    /// Look up an entity by external id.
    pub fn get(&self, entity_id: Uuid) -> Option<&'a Entity> {
        self.by_id.get(&entity_id).copied()
    }

    /// The top-level anchor ids of the forest, in row order.
    pub fn anchors(&self) -> Vec<Uuid> {
        self.roots.iter().map(|e| e.entity_id).collect()
    }

    /// Every file leaf currently at the given review status, ordered by id.
    pub fn files_at(&self, status: ReviewStatus) -> Vec<Uuid> {
        self.by_id
            .values()
            .filter(|e| e.is_file_at(status))
            .map(|e| e.entity_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Count of file leaves across the whole request at the given status.
    pub fn count_files_at(&self, status: ReviewStatus) -> u64 {
        self.by_id.values().filter(|e| e.is_file_at(status)).count() as u64
    }

    /// Total number of file leaves in the forest.
    pub fn file_count(&self) -> u64 {
        self.by_id.values().filter(|e| e.is_file()).count() as u64
    }

    /// Resolve a scope of ids down to file leaves.
    ///
    /// A file id is included when its review status matches `filter` (or
    /// unconditionally without one); a folder id contributes every matching
    /// file leaf beneath it, found by an iterative depth-first walk. The
    /// result is deduplicated in first-visit order.
    pub fn descendant_files(&self, ids: &[Uuid], filter: Option<ReviewStatus>) -> Vec<Uuid> {
        let matches = |e: &Entity| filter.is_none_or(|status| e.review_status == Some(status));

        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for &id in ids {
            let Some(entity) = self.get(id) else { continue };
            if entity.is_file() {
                if matches(entity) && seen.insert(entity.entity_id) {
                    files.push(entity.entity_id);
                }
                continue;
            }

            let mut stack: Vec<&Entity> = self
                .children
                .get(&entity.entity_id)
                .map(|c| c.iter().rev().copied().collect())
                .unwrap_or_default();
            while let Some(node) = stack.pop() {
                if node.is_file() {
                    if matches(node) && seen.insert(node.entity_id) {
                        files.push(node.entity_id);
                    }
                } else if let Some(kids) = self.children.get(&node.entity_id) {
                    stack.extend(kids.iter().rev().copied());
                }
            }
        }

        files
    }

    /// Union of every id on the paths from the given leaves up to their
    /// roots, leaves and intermediate folders included.
    ///
    /// Distributes over union: `closure(A ∪ B) == closure(A) ∪ closure(B)`.
    pub fn ancestor_closure(&self, leaf_ids: &[Uuid]) -> BTreeSet<Uuid> {
        let mut closure = BTreeSet::new();

        for &id in leaf_ids {
            let mut current = self.get(id);
            while let Some(entity) = current {
                if !closure.insert(entity.entity_id) {
                    // Already walked this path from another leaf.
                    break;
                }
                current = entity.parent_id.and_then(|p| self.get(p));
            }
        }

        closure
    }

    /// Dual-mode settled counter.
    ///
    /// An id naming a file already at `status` counts itself; an id naming
    /// a folder counts its descendant file leaves at `status`. Used to
    /// report "already settled before this call" separately from "settled
    /// by this call".
    pub fn count_by_status(&self, ids: &[Uuid], status: ReviewStatus) -> u64 {
        self.descendant_files(ids, Some(status)).len() as u64
    }

    /// Chain from an entity up to its root anchor, the entity first.
    /// Empty if the id is not part of the request.
    pub fn routing(&self, entity_id: Uuid) -> Vec<&'a Entity> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.get(entity_id);
        while let Some(entity) = current {
            if !visited.insert(entity.entity_id) {
                break;
            }
            chain.push(entity);
            current = entity.parent_id.and_then(|p| self.get(p));
        }
        chain
    }
}
