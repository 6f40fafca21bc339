//! Record construction & batching.

use std::sync::Arc;

use ndarray::{Array2, Array3};

use crate::sketch::cms::Cms;
use crate::sketch::combinations::enumerate_combinations;
use crate::sketch::config::MotifParams;
use crate::sketch::error::Result;
use crate::sketch::feature::{normalize_input_map, validate_input_map, Case, InputMap};
use crate::sketch::planner::{MemoryPlanner, DEFAULT_DEVICE_AVAILABLE_BYTES};

/// Column index of the filter/feature id within `ref_batches`' second axis.
pub const FILTER_COL: usize = 0;
/// Column index of the caller's external sequence id.
pub const DATA_COL: usize = 1;
/// Column index of the position, Convolution only.
pub const POS_COL: usize = 2;

/// An immutable-after-construction container of batched, dense tensors plus
/// a handle to the (possibly shared) CMS.
///
/// Mutated only by `count_pass` (sketch counters, via the shared `Cms`) and
/// `select_pass` (`selection_bitmaps`); `extract_pass` only reads.
pub struct Record {
    pub case: Case,
    pub k: usize,
    pub filter_len: Option<u32>,
    /// `L`: the max sequence length among retained sequences.
    pub max_active_len: usize,
    /// `k x m` matrix of 1-based combination indices.
    pub combs: Array2<u32>,
    /// One `L x R x B_i` tensor per batch (`R` = 2 Ordinary, 3 Convolution).
    pub ref_batches: Vec<Array3<i64>>,
    /// One `L x B_i` tensor per batch.
    pub contrib_batches: Vec<Array2<f32>>,
    /// One `m x B_i` boolean matrix per batch, written by `select_pass`.
    pub selection_bitmaps: Vec<Array2<bool>>,
    pub cms: Arc<Cms>,
}

impl Record {
    /// `m = C(L, k)`: the number of combinations, i.e. the row count of
    /// every selection bitmap.
    pub fn num_combinations(&self) -> usize {
        self.combs.shape()[1]
    }

    pub fn num_batches(&self) -> usize {
        self.ref_batches.len()
    }

    pub fn retained_count(&self) -> usize {
        self.ref_batches.iter().map(|a| a.shape()[2]).sum()
    }
}

/// Builds [`Record`]s from an input map plus motif parameters.
pub struct RecordBuilder;

impl RecordBuilder {
    /// Normalises `map` and lays it out into dense batch tensors.
    ///
    /// * `shared_cms` — `Some` in the partitioned path, where counts must
    ///   accumulate into one CMS across partitions;
    ///   `None` to allocate a fresh, standalone CMS.
    pub fn build(
        map: &InputMap,
        params: &MotifParams,
        shared_cms: Option<Arc<Cms>>,
    ) -> Result<Record> {
        let case = params.case;
        validate_input_map(map, params.k, case, params.filter_len)?;

        // Steps 1-2: drop empty sequences, sort Convolution sequences by position.
        let retained = normalize_input_map(map, case);

        // Step 3: L = max retained sequence length.
        let l = retained.iter().map(|(_, seq)| seq.len()).max().unwrap_or(0);

        let cms = match shared_cms {
            Some(c) => c,
            None => Arc::new(Cms::new(params.k, case, params.delta, params.epsilon, params.seed)?),
        };

        // Step 4: decide batch size (delegates to the MemoryPlanner for `auto`).
        let batch_size = MemoryPlanner::resolve_batch_size(
            params.batch_policy,
            retained.len(),
            l,
            params,
            cms.d(),
            cms.w(),
            cms.h(),
            DEFAULT_DEVICE_AVAILABLE_BYTES,
        )?;

        // Step 6: combinations, computed once per Record.
        let combs = enumerate_combinations(params.k, l);
        let m = combs.shape()[1];

        let r = if case == Case::Convolution { 3 } else { 2 };

        // Step 5: allocate and fill ref_batches / contrib_batches.
        let mut ref_batches = Vec::new();
        let mut contrib_batches = Vec::new();
        // Step 7: allocate per-batch selection bitmaps (false).
        let mut selection_bitmaps = Vec::new();

        let mut start = 0;
        while start < retained.len() {
            let end = (start + batch_size).min(retained.len());
            let b = end - start;

            let mut ref_arr = Array3::<i64>::zeros((l, r, b));
            let mut contrib_arr = Array2::<f32>::zeros((l, b));

            for (local_n, (data_id, seq)) in retained[start..end].iter().enumerate() {
                for (i, feat) in seq.iter().enumerate() {
                    ref_arr[[i, FILTER_COL, local_n]] = feat.id() as i64;
                    ref_arr[[i, DATA_COL, local_n]] = *data_id;
                    contrib_arr[[i, local_n]] = feat.contribution();
                    if case == Case::Convolution {
                        ref_arr[[i, POS_COL, local_n]] = feat.position().unwrap() as i64;
                    }
                }
                // Remaining rows (i >= seq.len()) stay zero: padding.
            }

            ref_batches.push(ref_arr);
            contrib_batches.push(contrib_arr);
            selection_bitmaps.push(Array2::<bool>::from_elem((m, b), false));
            start = end;
        }

        Ok(Record {
            case,
            k: params.k,
            filter_len: params.filter_len,
            max_active_len: l,
            combs,
            ref_batches,
            contrib_batches,
            selection_bitmaps,
            cms,
        })
    }
}
