//! Execution backend seam.

use crate::sketch::error::{Result, SketchError};

/// A potential execution backend for CountPass/SelectPass/ExtractPass.
///
/// Only a CPU backend ships today; the trait is where a GPU backend would
/// plug in without touching `sketch::passes`.
pub trait Accelerator {
    fn is_available(&self) -> bool;
}

/// The only backend this crate ships: rayon-parallelized CPU execution.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuAccelerator;

impl Accelerator for CpuAccelerator {
    fn is_available(&self) -> bool {
        true
    }
}

/// Checks `use_accel` against an accelerator's availability, surfacing
/// `SketchError::Accelerator` when a caller asked for acceleration an
/// unavailable backend can't provide.
pub fn require_available(use_accel: bool, accel: &dyn Accelerator) -> Result<()> {
    if use_accel && !accel.is_available() {
        return Err(SketchError::Accelerator(
            "acceleration requested but the configured backend is unavailable".into(),
        ));
    }
    Ok(())
}
