//! Length-partitioned pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::sketch::cms::Cms;
use crate::sketch::config::PartitionParams;
use crate::sketch::error::Result;
use crate::sketch::feature::{validate_input_map, InputMap};
use crate::sketch::passes::{count_pass, extract_pass, select_pass};
use crate::sketch::record::RecordBuilder;
use crate::sketch::row::Row;

/// Result of [`Partitioner::run`]: the concatenated row stream plus any
/// advisory warnings (the `min_count > 1` notice).
#[derive(Debug, Default)]
pub struct PartitionedResult {
    pub rows: Vec<Row>,
    pub warnings: Vec<String>,
}

/// Drives `RecordBuilder` + `count_pass` + `select_pass` + `extract_pass`
/// once per length bucket, against one shared CMS.
pub struct Partitioner;

impl Partitioner {
    /// Partitions `map` by sequence length into buckets of width
    /// `params.partition_width`, then runs the full pipeline on each bucket
    /// in ascending-length order, accumulating counts into one shared CMS.
    pub fn run(map: &InputMap, params: &PartitionParams) -> Result<PartitionedResult> {
        let motif = &params.motif;
        validate_input_map(map, motif.k, motif.case, motif.filter_len)?;

        let omega = params.partition_width.max(1) as usize;

        let l_min = map
            .values()
            .filter(|seq| !seq.is_empty())
            .map(|seq| seq.len())
            .min()
            .expect("validate_input_map guarantees at least one non-empty sequence");

        // Step 1: bucket by length; empty buckets are simply never created.
        let mut buckets: BTreeMap<usize, InputMap> = BTreeMap::new();
        for (&id, seq) in map.iter() {
            if seq.is_empty() {
                continue;
            }
            let bucket_idx = (seq.len() - l_min) / omega;
            buckets.entry(bucket_idx).or_default().insert(id, seq.clone());
        }

        // Step 2: one shared CMS for every partition.
        let cms = Arc::new(Cms::new(motif.k, motif.case, motif.delta, motif.epsilon, motif.seed)?);

        let mut warnings = Vec::new();
        if motif.min_count > 1 {
            warnings.push(
                "min_count > 1 is not guaranteed across partitions; \
                 rerun with min_count = 1 and filter the row stream downstream"
                    .to_string(),
            );
        }

        // Step 3: process partitions in order, sharing the CMS, dropping
        // each Record before moving to the next.
        let mut rows = Vec::new();
        for (_bucket_idx, part_map) in buckets {
            let mut record = RecordBuilder::build(&part_map, motif, Some(Arc::clone(&cms)))?;
            count_pass(&record);
            select_pass(&mut record, motif.min_count);
            rows.extend(extract_pass(&record));
            // `record` drops here: its ref/contrib/selection tensors are
            // released before the next partition is built.
        }

        Ok(PartitionedResult { rows, warnings })
    }
}
