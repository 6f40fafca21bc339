//! The core sketching engine: data model, Count-Min Sketch, combination
//! enumeration, record batching, memory planning, the three passes, and
//! the length-partitioned pipeline.
//!
//! Everything under this module is pure computation — no I/O, no logging.
//! That lives one layer up, in `cli`.

pub mod accel;
pub mod cms;
pub mod combinations;
pub mod config;
pub mod error;
pub mod feature;
pub mod partition;
pub mod passes;
pub mod planner;
pub mod record;
pub mod row;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use accel::{require_available, Accelerator, CpuAccelerator};
use config::{MotifParams, PartitionParams};
use error::Result;
use feature::{Case, InputMap};
use partition::{Partitioner, PartitionedResult};
use planner::{BatchPlan, MemoryPlanner};
use record::RecordBuilder;
use row::Row;

/// Runs the full single-record pipeline: build, CountPass, SelectPass,
/// ExtractPass, in that order, against a freshly allocated CMS.
pub fn enrich(map: &InputMap, params: &MotifParams) -> Result<Vec<Row>> {
    enrich_with_accelerator(map, params, &CpuAccelerator)
}

/// Like [`enrich`], but with an explicit accelerator, so a caller can
/// exercise the `use_accel` failure path without a GPU backend existing.
pub fn enrich_with_accelerator(
    map: &InputMap,
    params: &MotifParams,
    accel: &dyn Accelerator,
) -> Result<Vec<Row>> {
    require_available(params.use_accel, accel)?;

    let mut record = RecordBuilder::build(map, params, None)?;
    passes::count_pass(&record);
    passes::select_pass(&mut record, params.min_count);
    Ok(passes::extract_pass(&record))
}

/// Runs the length-partitioned pipeline: one shared CMS accumulated across
/// ascending-length buckets, each processed end to end before the next is
/// built.
pub fn enrich_partitioned(map: &InputMap, params: &PartitionParams) -> Result<PartitionedResult> {
    require_available(params.motif.use_accel, &CpuAccelerator)?;
    Partitioner::run(map, params)
}

/// Reports the batch size and memory breakdown `enrich`/`enrich_partitioned`
/// would choose for the given shape, without running the pipeline.
#[allow(clippy::too_many_arguments)]
pub fn plan_batch(
    total_points: usize,
    l: usize,
    k: usize,
    case: Case,
    target_bytes: Option<u64>,
    safety_factor: f64,
    min_batch: usize,
    max_batch: usize,
    delta: f64,
    epsilon: f64,
) -> Result<BatchPlan> {
    let h = match case {
        Case::Ordinary => k,
        Case::Convolution => 2 * k - 1,
    };
    let d = (1.0_f64 / delta).ln().ceil().max(1.0) as usize;
    let w = (std::f64::consts::E / epsilon).ceil().max(1.0) as usize;

    MemoryPlanner::plan(
        total_points,
        l,
        k,
        case,
        target_bytes,
        safety_factor,
        min_batch,
        max_batch,
        d,
        w,
        h,
        planner::DEFAULT_DEVICE_AVAILABLE_BYTES,
    )
}

/// A shared CMS handle, exposed for callers who want to run several
/// `enrich` calls against one accumulator outside of `enrich_partitioned`
/// (e.g. a streaming caller feeding in sequences as they arrive).
pub fn new_shared_cms(params: &MotifParams) -> Result<Arc<cms::Cms>> {
    Ok(Arc::new(cms::Cms::new(
        params.k,
        params.case,
        params.delta,
        params.epsilon,
        params.seed,
    )?))
}
