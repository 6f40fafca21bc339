//! CountPass, SelectPass, and ExtractPass.
//!
//! Scheduling follows a parallel-for over batches (outer), plain loops over
//! combinations/sequences (inner) — the same rayon-over-an-outer-loop shape
//! used elsewhere in this crate's hot paths.

use ndarray::{Array2, Array3};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::sketch::cms::Cms;
use crate::sketch::feature::Case;
use crate::sketch::record::{Record, DATA_COL, FILTER_COL, POS_COL};
use crate::sketch::row::{ConvolutionRow, OrdinaryRow, Row};

/// Cached per-(combination, sequence) state shared by validity, hashing,
/// and row emission, so each is computed only once per cell.
struct CombinationContext {
    filter_vals: SmallVec<[i64; 8]>,
    positions: SmallVec<[i64; 8]>, // empty for Ordinary
}

/// Validity check ("every filter slot occupied") plus the filter/position read shared by hashing
/// and extraction. Returns `None` when any slot in the combination is
/// absent (`filter_index == 0`).
fn combination_context(
    case: Case,
    k: usize,
    combs: &Array2<u32>,
    ref_arr: &Array3<i64>,
    j: usize,
    n: usize,
) -> Option<CombinationContext> {
    let mut filter_vals = SmallVec::new();
    let mut positions = SmallVec::new();
    for e in 0..k {
        let idx = combs[[e, j]] as usize;
        let fval = ref_arr[[idx - 1, FILTER_COL, n]];
        if fval == 0 {
            return None;
        }
        filter_vals.push(fval);
        if case == Case::Convolution {
            positions.push(ref_arr[[idx - 1, POS_COL, n]]);
        }
    }
    Some(CombinationContext {
        filter_vals,
        positions,
    })
}

/// Convolution gap check: `gap_e = pos_{e+1} - pos_e - ell`.
/// Returns `None` ("invalid: filters overlap") if any gap is negative.
fn gaps_if_valid(ctx: &CombinationContext, filter_len: i64) -> Option<SmallVec<[i64; 8]>> {
    let mut gaps = SmallVec::new();
    for e in 0..ctx.positions.len().saturating_sub(1) {
        let gap = ctx.positions[e + 1] - ctx.positions[e] - filter_len;
        if gap < 0 {
            return None;
        }
        gaps.push(gap);
    }
    Some(gaps)
}

/// Hashes one combination into one row, using the row's coefficients. All arithmetic uses
/// wrapping signed 32-bit semantics throughout.
fn row_hash(
    case: Case,
    ctx: &CombinationContext,
    gaps: Option<&SmallVec<[i64; 8]>>,
    cms: &Cms,
    row: usize,
) -> i32 {
    let mut h: i32 = 0;
    match case {
        Case::Ordinary => {
            for (e, &val) in ctx.filter_vals.iter().enumerate() {
                let coeff = cms.coeff(row, e) as i32;
                h = h.wrapping_add((val as i32).wrapping_mul(coeff));
            }
        }
        Case::Convolution => {
            for (e, &val) in ctx.filter_vals.iter().enumerate() {
                let coeff = cms.coeff(row, 2 * e) as i32;
                h = h.wrapping_add((val as i32).wrapping_mul(coeff));
            }
            if let Some(gaps) = gaps {
                for (e, &gap) in gaps.iter().enumerate() {
                    let coeff = cms.coeff(row, 2 * e + 1) as i32;
                    h = h.wrapping_add((gap as i32).wrapping_mul(coeff));
                }
            }
        }
    }
    h
}

/// The Count-Min estimate for one (combination, sequence) cell: the minimum
/// counter value across all `d` hash rows — a naive implementation that
/// used only row 1 would be a bug; this iterates every row.
fn count_estimate(
    case: Case,
    ctx: &CombinationContext,
    gaps: Option<&SmallVec<[i64; 8]>>,
    cms: &Cms,
) -> u32 {
    let mut min_c = u32::MAX;
    for r in 0..cms.d() {
        let h = row_hash(case, ctx, gaps, cms, r);
        let col = cms.fold_column(h);
        min_c = min_c.min(cms.peek(r, col));
    }
    min_c
}

/// Increments CMS cells for every valid combination, in every
/// (sequence, hash-row) pair, across every batch.
pub fn count_pass(record: &Record) {
    let case = record.case;
    let k = record.k;
    let filter_len = record.filter_len.map(|v| v as i64).unwrap_or(0);
    let combs = &record.combs;
    let cms = &record.cms;
    let m = record.num_combinations();

    record.ref_batches.par_iter().for_each(|ref_arr| {
        let b = ref_arr.shape()[2];
        for j in 0..m {
            for n in 0..b {
                let ctx = match combination_context(case, k, combs, ref_arr, j, n) {
                    Some(c) => c,
                    None => continue,
                };
                let gaps = if case == Case::Convolution {
                    match gaps_if_valid(&ctx, filter_len) {
                        Some(g) => Some(g),
                        None => continue,
                    }
                } else {
                    None
                };
                for r in 0..cms.d() {
                    let h = row_hash(case, &ctx, gaps.as_ref(), cms, r);
                    let col = cms.fold_column(h);
                    cms.increment(r, col);
                }
            }
        }
    });
}

/// Marks a cell selected when its Count-Min estimate meets
/// `min_count`.
pub fn select_pass(record: &mut Record, min_count: u32) {
    let case = record.case;
    let k = record.k;
    let filter_len = record.filter_len.map(|v| v as i64).unwrap_or(0);
    let combs = &record.combs;
    let cms = &record.cms;

    record
        .ref_batches
        .par_iter()
        .zip(record.selection_bitmaps.par_iter_mut())
        .for_each(|(ref_arr, bitmap)| {
            let m = bitmap.shape()[0];
            let b = ref_arr.shape()[2];
            for j in 0..m {
                for n in 0..b {
                    let ctx = match combination_context(case, k, combs, ref_arr, j, n) {
                        Some(c) => c,
                        None => continue,
                    };
                    let gaps = if case == Case::Convolution {
                        match gaps_if_valid(&ctx, filter_len) {
                            Some(g) => Some(g),
                            None => continue,
                        }
                    } else {
                        None
                    };
                    let count = count_estimate(case, &ctx, gaps.as_ref(), cms);
                    if count >= min_count {
                        bitmap[[j, n]] = true;
                    }
                }
            }
        });
}

/// Compacts the selection bitmaps into a row stream, one motif
/// row per selected `(combination, sequence)` cell. Row order within a
/// batch is the iteration order here (sequential), which is a stricter
/// guarantee than strictly required (stable, but not contractually ordered).
pub fn extract_pass(record: &Record) -> Vec<Row> {
    let case = record.case;
    let k = record.k;
    let filter_len_u32 = record.filter_len;
    let filter_len = filter_len_u32.map(|v| v as i64).unwrap_or(0);
    let combs = &record.combs;
    let cms = &record.cms;

    let mut rows = Vec::new();
    for ((ref_arr, contrib_arr), bitmap) in record
        .ref_batches
        .iter()
        .zip(record.contrib_batches.iter())
        .zip(record.selection_bitmaps.iter())
    {
        let m = bitmap.shape()[0];
        let b = ref_arr.shape()[2];
        for j in 0..m {
            for n in 0..b {
                if !bitmap[[j, n]] {
                    continue;
                }
                // A selected cell was valid when select_pass ran; the
                // tensors are immutable since, so it must still be valid.
                let ctx = combination_context(case, k, combs, ref_arr, j, n)
                    .expect("a selected cell must be a valid combination");
                let gaps = if case == Case::Convolution {
                    gaps_if_valid(&ctx, filter_len)
                        .expect("a selected Convolution cell must have non-negative gaps")
                } else {
                    SmallVec::new()
                };
                let count = count_estimate(
                    case,
                    &ctx,
                    if case == Case::Convolution {
                        Some(&gaps)
                    } else {
                        None
                    },
                    cms,
                );

                let data_index = ref_arr[[(combs[[k - 1, j]] as usize) - 1, DATA_COL, n]];
                let contribution: f32 = (0..k)
                    .map(|e| {
                        let idx = combs[[e, j]] as usize;
                        contrib_arr[[idx - 1, n]]
                    })
                    .sum();

                match case {
                    Case::Ordinary => {
                        rows.push(Row::Ordinary(OrdinaryRow {
                            motifs: ctx.filter_vals.into_vec(),
                            data_index,
                            contribution,
                            count,
                        }));
                    }
                    Case::Convolution => {
                        let ell = filter_len;
                        let start = ctx.positions[0];
                        let end = ctx.positions[k - 1] + ell - 1;
                        rows.push(Row::Convolution(ConvolutionRow {
                            motifs: ctx.filter_vals.into_vec(),
                            gaps: gaps.into_vec(),
                            start,
                            end,
                            data_index,
                            contribution,
                            count,
                        }));
                    }
                }
            }
        }
    }
    rows
}
