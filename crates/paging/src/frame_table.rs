use memsim_error::{errconfig, errresident, Error};

use crate::typedef::{FrameId, PageKey};
use crate::Result;

/// Physical memory: a fixed number of frames, each holding at most one page.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTable<P: PageKey> {
    frames: Vec<Option<P>>, // Slot per frame, `None` when free
}

impl<P: PageKey> FrameTable<P> {
    /// Creates a frame table with `frame_count` empty frames.
    pub fn new(frame_count: usize) -> Result<Self> {
        if frame_count == 0 {
            return errconfig!("frame count must be positive");
        }
        let mut frames = Vec::with_capacity(frame_count);
        frames.resize_with(frame_count, || None);
        Ok(Self { frames })
    }

    /// Returns the total number of frames.
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Returns the number of frames currently holding a page.
    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.frames.iter().all(Option::is_some)
    }

    /// Returns the page held by `frame_id`, if any.
    pub fn get(&self, frame_id: FrameId) -> Result<Option<&P>> {
        self.frames
            .get(frame_id)
            .map(Option::as_ref)
            .ok_or(Error::OutOfBounds)
    }

    /// Returns the lowest-index frame holding no page.
    pub fn find_free_frame(&self) -> Option<FrameId> {
        self.frames.iter().position(Option::is_none)
    }

    /// Returns the frame holding `page`. Callers must already know the page is resident.
    pub fn find_frame_of(&self, page: &P) -> Result<FrameId> {
        match self
            .frames
            .iter()
            .position(|slot| slot.as_ref() == Some(page))
        {
            Some(frame_id) => Ok(frame_id),
            None => errresident!("page {:?} is not held by any frame", page),
        }
    }

    /// Overwrites the frame with `page` and returns the previous occupant.
    ///
    /// The caller is responsible for having unmapped the previous occupant from the page table.
    pub fn assign(&mut self, frame_id: FrameId, page: P) -> Result<Option<P>> {
        let slot = self.frames.get_mut(frame_id).ok_or(Error::OutOfBounds)?;
        Ok(slot.replace(page))
    }

    /// Iterates over every frame in index order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, Option<&P>)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .map(|(frame_id, slot)| (frame_id, slot.as_ref()))
    }

    /// Iterates over resident pages in frame order.
    pub fn pages(&self) -> impl Iterator<Item = &P> + '_ {
        self.frames.iter().flatten()
    }
}
