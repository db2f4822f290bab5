use std::collections::BTreeMap;

use memsim_error::errconfig;

use crate::Result;

/// A contiguous region of memory described by its starting address and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub base: usize,
    pub limit: usize,
}

/// Maps segment ids to their base/limit records.
#[derive(Debug, Clone)]
pub struct SegmentTable<S: Ord> {
    segments: BTreeMap<S, Segment>,
}

impl<S: Ord> SegmentTable<S> {
    pub fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
        }
    }

    /// Stores the segment `id`, replacing any earlier record for the same id.
    pub fn allocate(&mut self, id: S, base: usize, limit: usize) -> Result<()> {
        if limit == 0 {
            return errconfig!("segment limit must be positive");
        }
        self.segments.insert(id, Segment { base, limit });
        Ok(())
    }

    pub fn get(&self, id: &S) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Iterates over segments in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Segment)> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<S: Ord> Default for SegmentTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsim_error::Error;

    #[test]
    fn test_segment_table_allocate() {
        let mut table = SegmentTable::new();
        assert!(table.is_empty());
        table.allocate(0, 0, 100).unwrap();
        table.allocate(2, 200, 150).unwrap();
        table.allocate(1, 100, 200).unwrap();

        assert_eq!(3, table.len());
        assert_eq!(Some(&Segment { base: 100, limit: 200 }), table.get(&1));
        let ids: Vec<_> = table.iter().map(|(id, _)| *id).collect();
        assert_eq!(vec![0, 1, 2], ids);
    }

    #[test]
    fn test_segment_table_reallocate_overwrites() {
        let mut table = SegmentTable::new();
        table.allocate("code", 0, 100).unwrap();
        table.allocate("code", 500, 20).unwrap();
        assert_eq!(1, table.len());
        assert_eq!(Some(&Segment { base: 500, limit: 20 }), table.get(&"code"));
    }

    #[test]
    fn test_segment_table_rejects_empty_segment() {
        let mut table = SegmentTable::new();
        assert!(matches!(
            table.allocate(0, 10, 0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert_eq!(None, table.get(&0));
    }
}
