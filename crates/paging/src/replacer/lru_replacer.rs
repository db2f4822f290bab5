use std::collections::BTreeMap;

use log::debug;
use memsim_error::errdata;

use super::{Policy, Replacer};
use crate::frame_table::FrameTable;
use crate::typedef::{FrameId, PageKey};
use crate::Result;

#[derive(Debug)]
struct LruNode {
    last_accessed_timestamp: u64,
}

/// Evicts the resident page with the oldest timestamp.
///
/// Pages are stamped only when they fault in; hits leave the stamp untouched, so a page that is
/// referenced again while resident does not become more recent. Timestamps come from a logical
/// clock that advances once per recorded fault, so no two pages ever share a stamp.
#[derive(Debug)]
pub struct LruReplacer<P: PageKey> {
    node_store: BTreeMap<P, LruNode>,
    current_timestamp: u64,
}

impl<P: PageKey> LruReplacer<P> {
    pub fn new() -> Self {
        Self {
            node_store: BTreeMap::new(),
            current_timestamp: 0,
        }
    }

    /// Returns the logical time `page` last faulted in, if it is tracked.
    pub fn last_access(&self, page: &P) -> Option<u64> {
        self.node_store
            .get(page)
            .map(|node| node.last_accessed_timestamp)
    }

    /// Returns the number of tracked pages.
    pub fn len(&self) -> usize {
        self.node_store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_store.is_empty()
    }

    /// Increments and returns the current timestamp.
    fn advance_timestamp(&mut self) -> u64 {
        let old_timestamp = self.current_timestamp;
        self.current_timestamp += 1;
        old_timestamp
    }
}

impl<P: PageKey> Default for LruReplacer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PageKey> Replacer<P> for LruReplacer<P> {
    /// Stamps the page with the next logical timestamp.
    fn record_access(&mut self, page: &P) {
        let ts = self.advance_timestamp();
        self.node_store
            .entry(page.clone())
            .and_modify(|node| node.last_accessed_timestamp = ts)
            .or_insert(LruNode {
                last_accessed_timestamp: ts,
            });
    }

    /// Evicts the page with the smallest timestamp, breaking ties on the lowest page id.
    fn evict(&mut self, frames: &FrameTable<P>) -> Result<FrameId> {
        let victim = self
            .node_store
            .iter()
            .min_by(|(page_a, node_a), (page_b, node_b)| {
                node_a
                    .last_accessed_timestamp
                    .cmp(&node_b.last_accessed_timestamp)
                    .then_with(|| page_a.cmp(page_b))
            })
            .map(|(page, _)| page.clone());
        let Some(page) = victim else {
            return errdata!("LRU replacer tracks no pages, nothing to evict");
        };

        self.node_store.remove(&page);
        let frame_id = frames.find_frame_of(&page)?;
        debug!("lru victim: page {:?} in frame {}", page, frame_id);
        Ok(frame_id)
    }

    fn policy(&self) -> Policy {
        Policy::Lru
    }
}
