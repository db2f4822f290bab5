use log::{debug, warn};
use memsim_error::errdata;

use super::{Policy, Replacer};
use crate::frame_table::FrameTable;
use crate::typedef::{FrameId, PageKey};
use crate::Result;

/// The complete, known-in-advance sequence of page references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceString<P: PageKey> {
    references: Vec<P>,
}

impl<P: PageKey> ReferenceString<P> {
    pub fn new(references: Vec<P>) -> Self {
        Self { references }
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.references.get(index)
    }

    pub fn as_slice(&self) -> &[P] {
        &self.references
    }

    /// Returns the first index at or after `from` where `page` is referenced.
    pub fn next_occurrence(&self, page: &P, from: usize) -> Option<usize> {
        self.references
            .iter()
            .skip(from)
            .position(|reference| reference == page)
            .map(|offset| from + offset)
    }
}

impl<P: PageKey> From<Vec<P>> for ReferenceString<P> {
    fn from(references: Vec<P>) -> Self {
        Self::new(references)
    }
}

impl<P: PageKey> From<&[P]> for ReferenceString<P> {
    fn from(references: &[P]) -> Self {
        Self::new(references.to_vec())
    }
}

/// Access to future references. Only oracle policies have it; online policies never see the trace.
pub trait Lookahead<P: PageKey> {
    /// The full reference string the policy was built with.
    fn reference_string(&self) -> &ReferenceString<P>;

    /// Index of the next reference to be consumed.
    fn cursor(&self) -> usize;

    /// Index of the next use of `page` at or after the cursor, or `None` if it is never used again.
    fn next_use(&self, page: &P) -> Option<usize> {
        self.reference_string().next_occurrence(page, self.cursor())
    }
}

/// Belady's optimal policy: evicts the resident page whose next use lies farthest in the future.
///
/// This is an oracle. It needs the whole reference string up front and cannot run online.
#[derive(Debug)]
pub struct OptimalReplacer<P: PageKey> {
    reference_string: ReferenceString<P>,
    cursor: usize,
}

impl<P: PageKey> OptimalReplacer<P> {
    pub fn new(reference_string: ReferenceString<P>) -> Self {
        Self {
            reference_string,
            cursor: 0,
        }
    }

    /// Consumes one reference, hit or fault.
    fn advance(&mut self, page: &P) {
        match self.reference_string.get(self.cursor) {
            Some(expected) if expected == page => {}
            Some(expected) => warn!(
                "reference {} is {:?} but the lookahead expected {:?}",
                self.cursor, page, expected
            ),
            None => warn!(
                "reference {} ({:?}) is past the end of the lookahead",
                self.cursor, page
            ),
        }
        self.cursor += 1;
    }
}

impl<P: PageKey> Lookahead<P> for OptimalReplacer<P> {
    fn reference_string(&self) -> &ReferenceString<P> {
        &self.reference_string
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<P: PageKey> Replacer<P> for OptimalReplacer<P> {
    fn record_access(&mut self, page: &P) {
        self.advance(page);
    }

    fn record_hit(&mut self, page: &P) {
        self.advance(page);
    }

    /// Picks the resident page with the farthest next use. Pages never used again count as
    /// infinitely far; ties go to the lowest page id.
    fn evict(&mut self, frames: &FrameTable<P>) -> Result<FrameId> {
        // (never used again, next use) orders infinite distances above every finite one.
        let mut candidate: Option<(FrameId, &P, (bool, usize))> = None;
        for (frame_id, page) in frames.iter() {
            let Some(page) = page else {
                continue;
            };
            let next_use = self.next_use(page);
            let distance = (next_use.is_none(), next_use.unwrap_or(0));

            match &candidate {
                None => candidate = Some((frame_id, page, distance)),
                Some((_, best_page, best_distance)) => {
                    if distance > *best_distance
                        || (distance == *best_distance && page < *best_page)
                    {
                        candidate = Some((frame_id, page, distance));
                    }
                }
            }
        }

        match candidate {
            Some((frame_id, page, (never_used, next_use))) => {
                if never_used {
                    debug!(
                        "optimal victim: page {:?} in frame {}, never used again",
                        page, frame_id
                    );
                } else {
                    debug!(
                        "optimal victim: page {:?} in frame {}, next used at {}",
                        page, frame_id, next_use
                    );
                }
                Ok(frame_id)
            }
            None => errdata!("no resident page to evict"),
        }
    }

    fn policy(&self) -> Policy {
        Policy::Optimal
    }
}
