//! Bookkeeping that sits beside the paging core: a base/limit segment table and the
//! internal-fragmentation arithmetic of fixed-size frames.
pub mod fragmentation;
pub mod segment_table;

pub use fragmentation::{frames_required, internal_fragmentation};
pub use segment_table::{Segment, SegmentTable};

pub(crate) type Result<T> = std::result::Result<T, memsim_error::Error>;
