//! Configuration knobs.

use crate::sketch::feature::Case;

/// Either let the [`MemoryPlanner`](crate::sketch::planner::MemoryPlanner)
/// choose a batch size, or pin one.
///
/// `BatchPolicy::Fixed(500)` reproduces the legacy default batch size from
/// the reference implementation this engine supersedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    Auto,
    Fixed(usize),
}

impl Default for BatchPolicy {
    fn default() -> Self {
        BatchPolicy::Auto
    }
}

/// Parameters for a single (non-partitioned) `enrich` call.
#[derive(Debug, Clone)]
pub struct MotifParams {
    pub k: usize,
    pub case: Case,
    /// Required when `case == Case::Convolution`.
    pub filter_len: Option<u32>,
    pub delta: f64,
    pub epsilon: f64,
    pub min_count: u32,
    pub batch_policy: BatchPolicy,
    pub safety_factor: f64,
    pub min_batch: usize,
    pub max_batch: usize,
    pub seed: Option<u64>,
    pub use_accel: bool,
}

impl Default for MotifParams {
    fn default() -> Self {
        Self {
            k: 3,
            case: Case::Ordinary,
            filter_len: None,
            delta: 1e-4,
            epsilon: 5e-5,
            min_count: 1,
            batch_policy: BatchPolicy::Auto,
            safety_factor: 0.8,
            min_batch: 10,
            max_batch: 10_000,
            seed: None,
            use_accel: true,
        }
    }
}

/// Parameters for `enrich_partitioned`: a [`MotifParams`] plus the
/// length-bucket width `omega`.
#[derive(Debug, Clone)]
pub struct PartitionParams {
    pub motif: MotifParams,
    pub partition_width: u32,
}

impl Default for PartitionParams {
    fn default() -> Self {
        Self {
            motif: MotifParams::default(),
            partition_width: 10,
        }
    }
}
