//! Brute-force ground truth counting, used only by tests to check the
//! "No underestimation" property. Never compiled into the
//! release path — `O(n * C(L, k))`, same complexity the sketch exists to
//! avoid.

use std::collections::HashMap;

use crate::sketch::combinations::enumerate_combinations;
use crate::sketch::feature::{normalize_input_map, Case, InputMap};

/// `(filter ids in combination order, inter-filter gaps)` — empty gaps for
/// Ordinary — uniquely identifies a motif occurrence.
pub type MotifKey = (Vec<i64>, Vec<i64>);

/// The exact occurrence count of every motif across every retained
/// sequence, using the same validity rule CountPass uses, but without any
/// sketching.
pub fn exact_motif_counts(
    map: &InputMap,
    k: usize,
    case: Case,
    filter_len: Option<u32>,
) -> HashMap<MotifKey, u64> {
    let retained = normalize_input_map(map, case);
    let mut counts: HashMap<MotifKey, u64> = HashMap::new();

    for (_, seq) in &retained {
        let l = seq.len();
        if l < k {
            continue;
        }
        let combs = enumerate_combinations(k, l);
        let m = combs.shape()[1];
        for j in 0..m {
            let idxs: Vec<usize> = (0..k).map(|e| combs[[e, j]] as usize - 1).collect();
            let ids: Vec<i64> = idxs.iter().map(|&i| seq[i].id() as i64).collect();

            match case {
                Case::Ordinary => {
                    *counts.entry((ids, Vec::new())).or_insert(0) += 1;
                }
                Case::Convolution => {
                    let ell = filter_len.expect("Convolution requires filter_len") as i64;
                    let positions: Vec<i64> = idxs
                        .iter()
                        .map(|&i| seq[i].position().unwrap() as i64)
                        .collect();
                    let mut gaps = Vec::with_capacity(k - 1);
                    let mut valid = true;
                    for e in 0..k - 1 {
                        let gap = positions[e + 1] - positions[e] - ell;
                        if gap < 0 {
                            valid = false;
                            break;
                        }
                        gaps.push(gap);
                    }
                    if valid {
                        *counts.entry((ids, gaps)).or_insert(0) += 1;
                    }
                }
            }
        }
    }
    counts
}
