//! A probabilistic, Count-Min-Sketch-backed engine for discovering
//! frequent k-element motifs across combinatorial k-subsets of
//! variable-length sequences.

pub mod cli;
pub mod sketch;

pub use sketch::accel::{Accelerator, CpuAccelerator};
pub use sketch::cms::Cms;
pub use sketch::combinations::{binomial, enumerate_combinations};
pub use sketch::config::{BatchPolicy, MotifParams, PartitionParams};
pub use sketch::error::{Result, SketchError};
pub use sketch::feature::{detect_case, Case, DataPointId, Feature, InputMap};
pub use sketch::partition::{Partitioner, PartitionedResult};
pub use sketch::planner::{BatchPlan, MemoryPlanner};
pub use sketch::row::{ConvolutionRow, OrdinaryRow, Row, RowSchema};
pub use sketch::{enrich, enrich_partitioned, enrich_with_accelerator, new_shared_cms, plan_batch};
