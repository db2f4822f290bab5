use std::collections::BTreeMap;

use log::{debug, trace};
use memsim_error::errdata;

use crate::frame_table::FrameTable;
use crate::replacer::{Policy, Replacer};
use crate::typedef::{FrameId, PageKey};
use crate::Result;

/// What a single page access did to physical memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome<P> {
    /// The page was already resident in `frame`.
    Hit { frame: FrameId },
    /// The page faulted into `frame`, displacing `evicted` if memory was full.
    Fault { frame: FrameId, evicted: Option<P> },
}

impl<P> AccessOutcome<P> {
    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::Fault { .. })
    }

    /// Returns the frame now holding the accessed page.
    pub fn frame(&self) -> FrameId {
        match self {
            AccessOutcome::Hit { frame } | AccessOutcome::Fault { frame, .. } => *frame,
        }
    }

    /// Returns the page evicted by this access, if any.
    pub fn evicted(&self) -> Option<&P> {
        match self {
            AccessOutcome::Fault { evicted, .. } => evicted.as_ref(),
            AccessOutcome::Hit { .. } => None,
        }
    }
}

/// Maps pages to frames, handles page faults, and counts them.
#[derive(Debug)]
pub struct PagingManager<P: PageKey> {
    frame_table: FrameTable<P>,       // Physical memory
    page_table: BTreeMap<P, FrameId>, // Maps resident pages to their frames
    replacer: Box<dyn Replacer<P>>,   // Picks victims when no frame is free
    fault_count: u64,                 // Accesses that were not resident
    hit_count: u64,                   // Accesses that were resident
}

impl<P: PageKey> PagingManager<P> {
    /// Initializes a manager with `frame_count` empty frames.
    pub fn new(frame_count: usize, replacer: Box<dyn Replacer<P>>) -> Result<Self> {
        Ok(Self {
            frame_table: FrameTable::new(frame_count)?,
            page_table: BTreeMap::new(),
            replacer,
            fault_count: 0,
            hit_count: 0,
        })
    }

    /// Initializes a manager with a fresh replacer for `policy`.
    /// `lookahead` must hold the full trace when `policy` is [`Policy::Optimal`].
    pub fn with_policy(
        frame_count: usize,
        policy: Policy,
        lookahead: Option<&[P]>,
    ) -> Result<Self> {
        Self::new(frame_count, policy.build_replacer(lookahead)?)
    }

    /// Accesses `page`, loading it into a frame on a fault.
    pub fn access_page(&mut self, page: P) -> Result<AccessOutcome<P>> {
        // check if the page is already resident
        if let Some(&frame_id) = self.page_table.get(&page) {
            self.hit_count += 1;
            self.replacer.record_hit(&page);
            trace!("hit: page {:?} in frame {}", page, frame_id);
            return Ok(AccessOutcome::Hit { frame: frame_id });
        }

        // get a free frame, evicting if memory is full
        let (frame_id, evicted) = self.get_free_frame()?;
        self.fault_count += 1;

        // load the page and map it
        self.frame_table.assign(frame_id, page.clone())?;
        self.page_table.insert(page.clone(), frame_id);

        // update the replacer
        self.replacer.record_access(&page);
        trace!(
            "fault #{}: page {:?} into frame {}",
            self.fault_count,
            page,
            frame_id
        );

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        Ok(AccessOutcome::Fault {
            frame: frame_id,
            evicted,
        })
    }

    /// Returns the lowest free frame, or reclaims one chosen by the replacer.
    /// The evicted page is unmapped before the frame is handed out.
    fn get_free_frame(&mut self) -> Result<(FrameId, Option<P>)> {
        if let Some(frame_id) = self.frame_table.find_free_frame() {
            return Ok((frame_id, None));
        }

        let frame_id = self.replacer.evict(&self.frame_table)?;
        let victim = match self.frame_table.get(frame_id)? {
            Some(page) => page.clone(),
            None => return errdata!("replacer chose frame {} which holds no page", frame_id),
        };

        // Remove old page from the page table
        match self.page_table.remove(&victim) {
            Some(mapped) if mapped == frame_id => {}
            Some(mapped) => {
                return errdata!(
                    "page {:?} sits in frame {} but the page table maps it to frame {}",
                    victim,
                    frame_id,
                    mapped
                )
            }
            None => {
                return errdata!(
                    "page {:?} sits in frame {} but has no page table entry",
                    victim,
                    frame_id
                )
            }
        }

        debug!(
            "{} evicted page {:?} from frame {}",
            self.replacer.policy(),
            victim,
            frame_id
        );
        Ok((frame_id, Some(victim)))
    }

    /// Verifies that the page table is exactly the inverse of the frame table.
    pub fn check_invariants(&self) -> Result<()> {
        for (page, &frame_id) in &self.page_table {
            match self.frame_table.get(frame_id)? {
                Some(resident) if resident == page => {}
                other => {
                    return errdata!(
                        "page table maps {:?} to frame {}, which holds {:?}",
                        page,
                        frame_id,
                        other
                    )
                }
            }
        }
        let occupied = self.frame_table.occupied();
        if occupied != self.page_table.len() {
            return errdata!(
                "{} frames are occupied but the page table has {} entries",
                occupied,
                self.page_table.len()
            );
        }
        Ok(())
    }

    /// Returns the current page to frame mapping.
    pub fn page_table(&self) -> &BTreeMap<P, FrameId> {
        &self.page_table
    }

    /// Returns physical memory.
    pub fn frame_table(&self) -> &FrameTable<P> {
        &self.frame_table
    }

    /// Returns the frame holding `page`, or `None` if it is not resident.
    pub fn frame_of(&self, page: &P) -> Option<FrameId> {
        self.page_table.get(page).copied()
    }

    pub fn is_resident(&self, page: &P) -> bool {
        self.page_table.contains_key(page)
    }

    /// Returns the total number of page faults since creation.
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    pub fn access_count(&self) -> u64 {
        self.fault_count + self.hit_count
    }

    /// Returns faults per access, or 0.0 before the first access.
    pub fn fault_rate(&self) -> f64 {
        match self.access_count() {
            0 => 0.0,
            accesses => self.fault_count as f64 / accesses as f64,
        }
    }

    pub fn policy(&self) -> Policy {
        self.replacer.policy()
    }
}
