//! k-of-L combination enumeration.
//!
//! Produces the fixed k-of-L combination table once per [`Record`](crate::sketch::record::Record):
//! a dense `k x m` matrix of 1-based positional indices, `m = C(L, k)`,
//! columns in lexicographic order.

use ndarray::Array2;

/// `C(n, k)`, saturating at `usize::MAX` rather than overflowing (used only
/// to size the combination matrix up front).
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result.min(usize::MAX as u128) as usize
}

/// Enumerates all k-of-L combinations (1-based indices into `1..=l`) as a
/// dense `k x m` matrix, columns in lexicographic order. `m = 0` when
/// `k > l`.
pub fn enumerate_combinations(k: usize, l: usize) -> Array2<u32> {
    if k == 0 || k > l {
        return Array2::zeros((k, 0));
    }
    let m = binomial(l, k);
    let mut combs = Array2::<u32>::zeros((k, m));

    // Standard lexicographic next-combination walk, starting at [1..=k].
    let mut current: Vec<u32> = (1..=k as u32).collect();
    let l = l as u32;
    for col in 0..m {
        for (row, &val) in current.iter().enumerate() {
            combs[[row, col]] = val;
        }
        if col + 1 == m {
            break;
        }
        // Find the rightmost index that can still be incremented.
        let mut i = k;
        loop {
            i -= 1;
            if current[i] < l - (k as u32 - 1 - i as u32) {
                current[i] += 1;
                for j in (i + 1)..k {
                    current[j] = current[j - 1] + 1;
                }
                break;
            }
            // i == 0 and still blocked would mean we've exhausted all
            // combinations before reaching `m`, which cannot happen given
            // `m = C(l, k)`.
        }
    }
    combs
}
