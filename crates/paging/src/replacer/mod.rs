mod fifo_replacer;
mod lru_replacer;
mod optimal_replacer;
mod policy;
mod replacer;

pub use fifo_replacer::FifoReplacer;
pub use lru_replacer::LruReplacer;
pub use optimal_replacer::{Lookahead, OptimalReplacer, ReferenceString};
pub use policy::Policy;
pub use replacer::Replacer;
