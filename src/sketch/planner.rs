//! Closed-form memory estimation and batch-size selection.

use crate::sketch::combinations::binomial;
use crate::sketch::config::{BatchPolicy, MotifParams};
use crate::sketch::error::{Result, SketchError};
use crate::sketch::feature::Case;

/// A conservative assumed device budget when no accelerator is queried.
pub const DEFAULT_DEVICE_AVAILABLE_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Reports a chosen batch size together with the byte-level breakdown that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub batch_size: usize,
    pub num_batches: usize,
    pub fixed_mem: u64,
    pub per_point_mem: u64,
    pub peak_mem: u64,
}

/// Per-data-point memory in bytes.
pub fn per_point_bytes(case: Case, l: usize, m: usize) -> u64 {
    let l = l as u64;
    let m = m as u64;
    match case {
        Case::Convolution => 16 * l + m,
        Case::Ordinary => 12 * l + m,
    }
}

/// Fixed memory in bytes: `k*m*4 (combs) + d*w*4 (sketch) + d*H*4 (coeffs)`
/// not including per-data-point growth.
pub fn fixed_bytes(k: usize, m: usize, d: usize, w: usize, h: usize) -> u64 {
    (k as u64 * m as u64 * 4) + (d as u64 * w as u64 * 4) + (d as u64 * h as u64 * 4)
}

/// Closed-form memory estimator / batch-size selector.
pub struct MemoryPlanner;

impl MemoryPlanner {
    /// Chooses a batch size for `total_points` sequences of maximum length
    /// `l`, given `k`/`case` (which determine `m` and per-point cost) and the
    /// CMS shape `(d, w, h)`.
    ///
    /// `target_gb` is the caller's memory budget in bytes; when `None`, only
    /// `device_available_bytes * safety_factor` bounds the batch.
    #[allow(clippy::too_many_arguments)]
    pub fn plan(
        total_points: usize,
        l: usize,
        k: usize,
        case: Case,
        target_bytes: Option<u64>,
        safety_factor: f64,
        min_batch: usize,
        max_batch: usize,
        d: usize,
        w: usize,
        h: usize,
        device_available_bytes: u64,
    ) -> Result<BatchPlan> {
        if !(safety_factor > 0.0 && safety_factor <= 1.0) {
            return Err(SketchError::Config(format!(
                "safety_factor must be in (0, 1], got {safety_factor}"
            )));
        }
        if min_batch == 0 || min_batch > max_batch {
            return Err(SketchError::Config(format!(
                "invalid batch bounds: min_batch={min_batch}, max_batch={max_batch}"
            )));
        }

        let m = binomial(l, k);
        let fixed = fixed_bytes(k, m, d, w, h);
        let per_point = per_point_bytes(case, l, m).max(1);

        let device_budget = (device_available_bytes as f64 * safety_factor) as u64;
        let budget = match target_bytes {
            Some(t) => t.min(device_budget),
            None => device_budget,
        };

        if budget <= fixed {
            return Err(SketchError::Memory(format!(
                "fixed memory ({fixed} bytes) already meets or exceeds the budget ({budget} bytes)"
            )));
        }

        let room = budget - fixed;
        let raw_batch = (room / per_point) as usize;

        // `min_batch` must never exceed the number of points on offer, or
        // the clamp below would be asked for an empty range. Tiny inputs
        // (fewer than `min_batch` points) just get `batch_size =
        // total_points` instead of panicking.
        let effective_min_batch = min_batch.min(total_points.max(1));

        if raw_batch < effective_min_batch {
            return Err(SketchError::Memory(format!(
                "per-point memory ({per_point} bytes) leaves room for only {raw_batch} points, \
                 below min_batch ({min_batch})"
            )));
        }

        let upper = max_batch
            .max(effective_min_batch)
            .min(total_points.max(effective_min_batch));
        let batch_size = raw_batch.clamp(effective_min_batch, upper);
        let num_batches = if total_points == 0 {
            0
        } else {
            (total_points + batch_size - 1) / batch_size
        };
        let peak_mem = fixed + per_point * batch_size as u64;

        Ok(BatchPlan {
            batch_size,
            num_batches,
            fixed_mem: fixed,
            per_point_mem: per_point,
            peak_mem,
        })
    }

    /// Resolves a [`BatchPolicy`] into a concrete batch size, delegating to
    /// [`MemoryPlanner::plan`] for `BatchPolicy::Auto`.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_batch_size(
        policy: BatchPolicy,
        total_points: usize,
        l: usize,
        params: &MotifParams,
        d: usize,
        w: usize,
        h: usize,
        device_available_bytes: u64,
    ) -> Result<usize> {
        match policy {
            BatchPolicy::Fixed(n) => {
                if n == 0 {
                    return Err(SketchError::Config("fixed batch size must be >= 1".into()));
                }
                Ok(n)
            }
            BatchPolicy::Auto => {
                let plan = Self::plan(
                    total_points,
                    l,
                    params.k,
                    params.case,
                    None,
                    params.safety_factor,
                    params.min_batch,
                    params.max_batch,
                    d,
                    w,
                    h,
                    device_available_bytes,
                )?;
                Ok(plan.batch_size)
            }
        }
    }
}
