use log::trace;

use crate::paging_manager::{AccessOutcome, PagingManager};
use crate::typedef::PageKey;
use crate::Result;

/// The request layer of a virtual address space: pages are loaded only when requested.
///
/// Every request is counted, hit or fault, then handed to the paging manager.
#[derive(Debug)]
pub struct DemandPaging<P: PageKey> {
    manager: PagingManager<P>,
    request_count: u64,
}

impl<P: PageKey> DemandPaging<P> {
    pub fn new(manager: PagingManager<P>) -> Self {
        Self {
            manager,
            request_count: 0,
        }
    }

    /// Requests `page`, faulting it in if it is not resident.
    pub fn request_page(&mut self, page: P) -> Result<AccessOutcome<P>> {
        self.request_count += 1;
        trace!("demand paging request #{}: page {:?}", self.request_count, page);
        self.manager.access_page(page)
    }

    /// Returns the number of requests made so far.
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn manager(&self) -> &PagingManager<P> {
        &self.manager
    }

    pub fn into_manager(self) -> PagingManager<P> {
        self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacer::Policy;
    use crate::typedef::FrameId;
    use std::collections::BTreeMap;

    #[test]
    fn test_demand_paging_counts_every_request() {
        let trace = [3, 5, 3, 7, 5];
        let manager = PagingManager::with_policy(2, Policy::Fifo, None).unwrap();
        let mut vm = DemandPaging::new(manager);
        assert_eq!(0, vm.request_count());

        for page in trace {
            vm.request_page(page).unwrap();
        }

        assert_eq!(5, vm.request_count());
        assert_eq!(3, vm.manager().fault_count());
        assert_eq!(2, vm.manager().hit_count());

        let expected: BTreeMap<u32, FrameId> = [(5, 1), (7, 0)].into_iter().collect();
        assert_eq!(&expected, vm.manager().page_table());
    }

    #[test]
    fn test_demand_paging_counts_failed_requests() {
        use crate::replacer::LruReplacer;
        use crate::replacer::Replacer;

        let mut replacer = LruReplacer::new();
        replacer.record_access(&42u32);
        let manager = PagingManager::new(1, Box::new(replacer)).unwrap();
        let mut vm = DemandPaging::new(manager);

        vm.request_page(1).unwrap();
        assert!(vm.request_page(2).is_err());
        assert_eq!(2, vm.request_count());
        assert_eq!(1, vm.into_manager().fault_count());
    }
}
