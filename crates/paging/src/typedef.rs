use std::fmt::Debug;

/// Index of a physical frame, always in `[0, frame_count)`.
pub type FrameId = usize;

/// The page identifier used by the demo traces.
pub type DefaultPageId = u32;

/// Bounds shared by every page identifier. Ordering keeps tie-breaks between victims well defined.
pub trait PageKey: Ord + Clone + Debug + Send + Sync + 'static {}

impl<T> PageKey for T where T: Ord + Clone + Debug + Send + Sync + 'static {}
