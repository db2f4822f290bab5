//! The demand-paging core: a fixed frame table, the page table kept in lock-step with it, and
//! interchangeable page-replacement policies that pick the victim when memory is full.
pub mod demand_paging;
pub mod frame_table;
pub mod paging_manager;
pub mod replacer;
pub mod typedef;

pub use demand_paging::DemandPaging;
pub use frame_table::FrameTable;
pub use paging_manager::{AccessOutcome, PagingManager};
pub use replacer::{
    FifoReplacer, Lookahead, LruReplacer, OptimalReplacer, Policy, ReferenceString, Replacer,
};
pub use typedef::{DefaultPageId, FrameId, PageKey};

pub(crate) type Result<T> = std::result::Result<T, memsim_error::Error>;
