use std::fmt::Debug;

use super::Policy;
use crate::frame_table::FrameTable;
use crate::typedef::{FrameId, PageKey};
use crate::Result;

pub trait Replacer<P: PageKey>: Send + Sync + Debug {
    /// Records that `page` was just loaded into a frame on a page fault.
    fn record_access(&mut self, page: &P);

    /// Records a reference to a page that was already resident.
    /// FIFO and LRU keep this no-op; only oracle policies that follow the whole trace override it.
    fn record_hit(&mut self, _page: &P) {}

    /// Chooses a resident page to evict and returns the frame holding it.
    /// The victim is forgotten by the replacer; the caller must unmap it.
    fn evict(&mut self, frames: &FrameTable<P>) -> Result<FrameId>;

    /// Returns which policy this replacer implements.
    fn policy(&self) -> Policy;
}
