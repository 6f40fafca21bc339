use thiserror::Error;

/// Error taxonomy for the sketching engine.
///
/// Every public entry point (`enrich`, `enrich_partitioned`, `plan_batch`,
/// `RecordBuilder::build`) returns one of these variants on failure; none
/// are recovered internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SketchError {
    /// Invalid `delta`/`epsilon`/`k`/`min_count`/`batch_size`, mixed feature
    /// variants, or a Convolution request missing `filter_len`.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The input map is empty after dropping zero-length sequences.
    #[error("invalid input: {0}")]
    Input(String),

    /// Fixed memory already exceeds the budget, or per-point memory leaves
    /// less than `min_batch` room.
    #[error("insufficient memory: {0}")]
    Memory(String),

    /// GPU execution requested but unavailable.
    #[error("accelerator unavailable: {0}")]
    Accelerator(String),

    /// A check that should never fail outside of a programming error.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SketchError>;
