//! Count-Min Sketch: a probabilistic counting matrix with bounded error.
//!
//! `d` hash rows by `w` columns of atomic counters, plus `d x H` random hash
//! coefficients. The fold formula (`((h mod d*w) mod w)`) is load-bearing —
//! must not be simplified to
//! a single modulus.

use std::sync::atomic::{AtomicU32, Ordering};

use ndarray::Array2;

use crate::sketch::error::{Result, SketchError};
use crate::sketch::feature::Case;

/// SplitMix64, used to derive the hash-coefficient matrix deterministically
/// from a caller-supplied seed.
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// A uniform value in `[1, bound]` (`bound >= 1`).
    fn next_in_range(&mut self, bound: i64) -> i64 {
        if bound <= 1 {
            return 1;
        }
        1 + (self.next_u64() % (bound as u64)) as i64
    }
}

/// `((h mod n) mod w)`, reproducing the legacy two-step fold exactly: both
/// steps use Euclidean (non-negative) remainder so that wrapped, possibly
/// negative, 32-bit hash values fold into a valid column index.
#[inline]
pub(crate) fn fold(h: i32, n: i64, w: usize) -> usize {
    let step1 = (h as i64).rem_euclid(n);
    let col = step1.rem_euclid(w as i64);
    col as usize
}

/// A shared, probabilistic frequency counter.
///
/// Coefficients are read-only after construction; counters are written only
/// through [`Cms::increment`], an atomic add.
pub struct Cms {
    d: usize,
    w: usize,
    h: usize,
    counters: Vec<AtomicU32>,
    /// d x H matrix of hash coefficients, each in `[1, d*w - 1]`.
    hash_coeffs: Array2<i64>,
}

impl Cms {
    /// Builds a new sketch for the given error parameters.
    ///
    /// * `d = ceil(ln(1/delta))`
    /// * `w = ceil(e/epsilon)`
    /// * `h = k` for Ordinary, `2k - 1` for Convolution
    pub fn new(k: usize, case: Case, delta: f64, epsilon: f64, seed: Option<u64>) -> Result<Self> {
        if !(delta > 0.0 && delta < 1.0) {
            return Err(SketchError::Config(format!(
                "delta must be in (0, 1), got {delta}"
            )));
        }
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(SketchError::Config(format!(
                "epsilon must be in (0, 1), got {epsilon}"
            )));
        }
        if k == 0 {
            return Err(SketchError::Config("motif size k must be >= 1".into()));
        }

        let d = (1.0_f64 / delta).ln().ceil().max(1.0) as usize;
        let w = (std::f64::consts::E / epsilon).ceil().max(1.0) as usize;
        let h = match case {
            Case::Ordinary => k,
            Case::Convolution => 2 * k - 1,
        };

        let n = (d as i64).checked_mul(w as i64).ok_or_else(|| {
            SketchError::Config("d * w overflows; choose a larger delta/epsilon".into())
        })?;

        let mut rng = SplitMix64::new(seed.unwrap_or(0x5EED_C0DE_u64));
        let mut hash_coeffs = Array2::<i64>::zeros((d, h));
        for r in 0..d {
            for e in 0..h {
                hash_coeffs[[r, e]] = rng.next_in_range(n - 1);
            }
        }

        let counters = (0..d * w).map(|_| AtomicU32::new(0)).collect();

        Ok(Self {
            d,
            w,
            h,
            counters,
            hash_coeffs,
        })
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn h(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn coeff(&self, row: usize, e: usize) -> i64 {
        self.hash_coeffs[[row, e]]
    }

    /// Fold a raw hash value (row `r`) into a 0-based column index.
    #[inline]
    pub fn fold_column(&self, row_hash: i32) -> usize {
        fold(row_hash, (self.d * self.w) as i64, self.w)
    }

    /// Atomically increments the counter at `(row, col)`.
    #[inline]
    pub fn increment(&self, row: usize, col: usize) {
        self.counters[row * self.w + col].fetch_add(1, Ordering::Relaxed);
    }

    /// Reads the counter at `(row, col)`.
    #[inline]
    pub fn peek(&self, row: usize, col: usize) -> u32 {
        self.counters[row * self.w + col].load(Ordering::Relaxed)
    }
}
