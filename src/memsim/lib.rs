//! Memsim, a pedagogical simulator of operating-system memory management.
//!
//! The paging core lives in [`paging`]: a fixed frame table, a page table kept in lock-step with it,
//! and FIFO, LRU and Optimal replacement. [`segmentation`] holds the base/limit segment table and
//! fragmentation arithmetic. This crate ties them to a layered [`config::Config`] and replays traces
//! through [`simulation::Simulation`], producing reports for a presentation layer to print.
pub mod config;
pub mod simulation;

pub use memsim_error as error;
pub use memsim_paging as paging;
pub use memsim_segmentation as segmentation;
