use std::collections::VecDeque;

use log::debug;
use memsim_error::errdata;

use super::{Policy, Replacer};
use crate::frame_table::FrameTable;
use crate::typedef::{FrameId, PageKey};
use crate::Result;

/// Evicts pages in the order they faulted in.
///
/// Hits are never recorded, so a page that is referenced again keeps its original place in the
/// queue. Eviction order is therefore the fault order of the trace.
#[derive(Debug)]
pub struct FifoReplacer<P: PageKey> {
    queue: VecDeque<P>, // Arrival order, oldest at the front
}

impl<P: PageKey> FifoReplacer<P> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Returns the number of pages waiting in the arrival queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<P: PageKey> Default for FifoReplacer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PageKey> Replacer<P> for FifoReplacer<P> {
    /// Appends the page to the back of the arrival queue.
    fn record_access(&mut self, page: &P) {
        self.queue.push_back(page.clone());
    }

    /// Pops the oldest arrival and returns its frame.
    fn evict(&mut self, frames: &FrameTable<P>) -> Result<FrameId> {
        let Some(page) = self.queue.pop_front() else {
            return errdata!("FIFO queue is empty, nothing to evict");
        };
        let frame_id = frames.find_frame_of(&page)?;
        debug!("fifo victim: page {:?} in frame {}", page, frame_id);
        Ok(frame_id)
    }

    fn policy(&self) -> Policy {
        Policy::Fifo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsim_error::Error;

    fn frames_with(pages: &[u32]) -> FrameTable<u32> {
        let mut frames = FrameTable::new(pages.len()).unwrap();
        for (frame_id, page) in pages.iter().enumerate() {
            frames.assign(frame_id, *page).unwrap();
        }
        frames
    }

    #[test]
    fn test_fifo_evicts_in_arrival_order() {
        let frames = frames_with(&[3, 1, 2]);
        let mut replacer = FifoReplacer::new();
        replacer.record_access(&1);
        replacer.record_access(&2);
        replacer.record_access(&3);
        assert_eq!(3, replacer.len());

        assert_eq!(Ok(1), replacer.evict(&frames));
        assert_eq!(Ok(2), replacer.evict(&frames));
        assert_eq!(Ok(0), replacer.evict(&frames));
        assert!(replacer.is_empty());
    }

    #[test]
    fn test_fifo_ignores_hits() {
        let frames = frames_with(&[1, 2]);
        let mut replacer = FifoReplacer::new();
        replacer.record_access(&1);
        replacer.record_access(&2);
        replacer.record_hit(&1);
        replacer.record_hit(&1);

        // Page 1 faulted first, so it still goes first.
        assert_eq!(Ok(0), replacer.evict(&frames));
    }

    #[test]
    fn test_fifo_empty_queue_errors() {
        let frames = frames_with(&[1]);
        let mut replacer = FifoReplacer::<u32>::new();
        assert!(matches!(replacer.evict(&frames), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_fifo_victim_must_be_resident() {
        let frames = frames_with(&[2]);
        let mut replacer = FifoReplacer::new();
        replacer.record_access(&9);
        assert!(matches!(replacer.evict(&frames), Err(Error::NotResident(_))));
    }
}
