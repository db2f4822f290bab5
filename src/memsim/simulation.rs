use std::collections::BTreeMap;
use std::fmt;

use log::info;
use memsim_error::{errconfig, Result};
use memsim_paging::{AccessOutcome, DefaultPageId, DemandPaging, FrameId, PagingManager, Policy};
use memsim_segmentation::{frames_required, internal_fragmentation, SegmentTable};

use crate::config::Config;

/// Replays one page reference string under any replacement policy.
#[derive(Debug, Clone)]
pub struct Simulation {
    frame_count: usize,
    trace: Vec<DefaultPageId>,
}

impl Simulation {
    pub fn new(frame_count: usize, trace: Vec<DefaultPageId>) -> Result<Self> {
        if frame_count == 0 {
            return errconfig!("frame count must be positive");
        }
        Ok(Self { frame_count, trace })
    }

    /// The replacement run described by `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.frame_count, cfg.trace.clone())
    }

    /// The demand-paging run described by `cfg`.
    pub fn demand_from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.demand_frame_count, cfg.demand_trace.clone())
    }

    /// Replays the trace through a fresh demand-paging layer using `policy`.
    pub fn run_policy(&self, policy: Policy) -> Result<PolicyReport> {
        let manager =
            PagingManager::with_policy(self.frame_count, policy, Some(self.trace.as_slice()))?;
        let mut vm = DemandPaging::new(manager);
        let outcomes = self
            .trace
            .iter()
            .map(|&page| vm.request_page(page))
            .collect::<Result<Vec<_>>>()?;

        let report = PolicyReport {
            policy,
            frame_count: self.frame_count,
            outcomes,
            requests: vm.request_count(),
            faults: vm.manager().fault_count(),
            hits: vm.manager().hit_count(),
            page_table: vm.manager().page_table().clone(),
            frames: vm
                .manager()
                .frame_table()
                .iter()
                .map(|(_, page)| page.copied())
                .collect(),
        };
        info!(
            "{} over {} references with {} frames: {} faults",
            policy,
            self.trace.len(),
            self.frame_count,
            report.faults
        );
        Ok(report)
    }

    /// Runs every policy over the same trace.
    pub fn compare(&self) -> Result<Comparison> {
        let reports = Policy::ALL
            .iter()
            .map(|&policy| self.run_policy(policy))
            .collect::<Result<Vec<_>>>()?;
        Ok(Comparison {
            trace: self.trace.clone(),
            reports,
        })
    }
}

/// The state of memory after replaying a trace under one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyReport {
    pub policy: Policy,
    pub frame_count: usize,
    pub outcomes: Vec<AccessOutcome<DefaultPageId>>,
    pub requests: u64,
    pub faults: u64,
    pub hits: u64,
    pub page_table: BTreeMap<DefaultPageId, FrameId>,
    pub frames: Vec<Option<DefaultPageId>>,
}

impl PolicyReport {
    /// Pages evicted by the run, in eviction order.
    pub fn evictions(&self) -> Vec<DefaultPageId> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.evicted().copied())
            .collect()
    }
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page Table:")?;
        for (page, frame) in &self.page_table {
            writeln!(f, "Page {} -> Frame {}", page, frame)?;
        }
        writeln!(f, "Page Faults: {}", self.faults)?;
        writeln!(f, "Physical Memory:")?;
        for (frame, page) in self.frames.iter().enumerate() {
            match page {
                Some(page) => writeln!(f, "Frame {}: {}", frame, page)?,
                None => writeln!(f, "Frame {}: empty", frame)?,
            }
        }
        Ok(())
    }
}

/// Fault counts of every policy over one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub trace: Vec<DefaultPageId>,
    pub reports: Vec<PolicyReport>,
}

impl Comparison {
    pub fn faults(&self, policy: Policy) -> Option<u64> {
        self.reports
            .iter()
            .find(|report| report.policy == policy)
            .map(|report| report.faults)
    }

    /// The policy with the fewest faults. Earlier policies win ties.
    pub fn best(&self) -> Option<Policy> {
        self.reports
            .iter()
            .min_by_key(|report| report.faults)
            .map(|report| report.policy)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(
                f,
                "{:<20} {}",
                format!("{} Page Faults:", report.policy),
                report.faults
            )?;
        }
        writeln!(f, "Page Access Sequence: {:?}", self.trace)
    }
}

/// Builds the segment table described by `cfg`.
pub fn segment_table(cfg: &Config) -> Result<SegmentTable<u32>> {
    let mut table = SegmentTable::new();
    for segment in &cfg.segments {
        table.allocate(segment.id, segment.base, segment.limit)?;
    }
    Ok(table)
}

/// Renders a segment table, one segment per line.
pub struct SegmentTableDisplay<'a>(pub &'a SegmentTable<u32>);

impl fmt::Display for SegmentTableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Segment Table:")?;
        for (id, segment) in self.0.iter() {
            writeln!(
                f,
                "Segment {}: Base={} Limit={}",
                id, segment.base, segment.limit
            )?;
        }
        Ok(())
    }
}

/// Internal fragmentation of several process sizes against one frame size.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentationReport {
    pub frame_size: usize,
    /// (process size, frames required, bytes wasted)
    pub rows: Vec<(usize, usize, usize)>,
}

impl FragmentationReport {
    pub fn new(frame_size: usize, process_sizes: &[usize]) -> Result<Self> {
        let rows = process_sizes
            .iter()
            .map(|&size| {
                Ok((
                    size,
                    frames_required(frame_size, size)?,
                    internal_fragmentation(frame_size, size)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { frame_size, rows })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.frame_size, &cfg.process_sizes)
    }
}

impl fmt::Display for FragmentationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (process_size, frames, waste) in &self.rows {
            writeln!(
                f,
                "Frame Size: {} bytes, Process Size: {} bytes, Frames: {}",
                self.frame_size, process_size, frames
            )?;
            writeln!(f, "Internal Fragmentation: {} byte(s)", waste)?;
        }
        Ok(())
    }
}
