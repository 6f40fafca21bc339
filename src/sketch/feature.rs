//! Input data model: features, sequences, and the case they belong to.

use fxhash::FxHashMap;

use crate::sketch::error::{Result, SketchError};

/// The caller's external identifier for one sequence. Preserved verbatim
/// through batching so it can be re-attached to emitted motif rows.
pub type DataPointId = i64;

/// One element of a sequence.
///
/// The Convolution variant additionally carries the element's position,
/// which the Ordinary variant has no use for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature {
    Ordinary { id: u32, contribution: f32 },
    Convolution { filter_id: u32, contribution: f32, position: u32 },
}

impl Feature {
    #[inline]
    pub fn is_convolution(&self) -> bool {
        matches!(self, Feature::Convolution { .. })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        match *self {
            Feature::Ordinary { id, .. } => id,
            Feature::Convolution { filter_id, .. } => filter_id,
        }
    }

    #[inline]
    pub fn contribution(&self) -> f32 {
        match *self {
            Feature::Ordinary { contribution, .. } => contribution,
            Feature::Convolution { contribution, .. } => contribution,
        }
    }

    #[inline]
    pub fn position(&self) -> Option<u32> {
        match *self {
            Feature::Ordinary { .. } => None,
            Feature::Convolution { position, .. } => Some(position),
        }
    }
}

/// The operating mode of a whole input map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Ordinary,
    Convolution,
}

/// A finite mapping from a sequence id to its ordered feature list.
pub type InputMap = FxHashMap<DataPointId, Vec<Feature>>;

/// Inspects the first non-empty sequence to determine which case the whole
/// input map is operating in.
pub fn detect_case(map: &InputMap) -> Result<Case> {
    let mut ids: Vec<&DataPointId> = map.keys().collect();
    ids.sort_unstable();
    for id in ids {
        if let Some(first) = map[id].first() {
            return Ok(if first.is_convolution() {
                Case::Convolution
            } else {
                Case::Ordinary
            });
        }
    }
    Err(SketchError::Input(
        "input map is empty after dropping zero-length sequences".into(),
    ))
}

/// Pre-flight validation shared by every entry point.
///
/// * rejects an empty map (after the caller has already dropped empty
///   sequences, if any remain all are empty)
/// * rejects `k <= 0`
/// * rejects Convolution without `filter_len`
/// * rejects mixed feature variants within or across sequences
/// * rejects non-positive feature ids (zero is reserved for "absent slot")
pub fn validate_input_map(
    map: &InputMap,
    k: usize,
    case: Case,
    filter_len: Option<u32>,
) -> Result<()> {
    if k == 0 {
        return Err(SketchError::Config("motif size k must be >= 1".into()));
    }
    if case == Case::Convolution && filter_len.is_none() {
        return Err(SketchError::Config(
            "filter_len is required for the Convolution case".into(),
        ));
    }
    if let Some(len) = filter_len {
        if len == 0 {
            return Err(SketchError::Config("filter_len must be >= 1".into()));
        }
    }

    let mut any_non_empty = false;
    for seq in map.values() {
        if seq.is_empty() {
            continue;
        }
        any_non_empty = true;
        for feat in seq {
            if feat.is_convolution() != (case == Case::Convolution) {
                return Err(SketchError::Config(
                    "mixed feature variants are not allowed within one input map".into(),
                ));
            }
            if feat.id() == 0 {
                return Err(SketchError::Config(
                    "feature ids must be positive; 0 is reserved for an absent slot".into(),
                ));
            }
        }
    }
    if !any_non_empty {
        return Err(SketchError::Input(
            "input map is empty after dropping zero-length sequences".into(),
        ));
    }
    Ok(())
}

/// Drops empty sequences and, for Convolution, sorts each retained sequence
/// by ascending position.
pub fn normalize_input_map(map: &InputMap, case: Case) -> Vec<(DataPointId, Vec<Feature>)> {
    let mut ids: Vec<&DataPointId> = map.keys().collect();
    ids.sort_unstable();

    let mut retained: Vec<(DataPointId, Vec<Feature>)> = Vec::with_capacity(map.len());
    for &id in &ids {
        let seq = &map[id];
        if seq.is_empty() {
            continue;
        }
        let mut seq = seq.clone();
        if case == Case::Convolution {
            seq.sort_by_key(|f| f.position().unwrap_or(0));
        }
        retained.push((*id, seq));
    }
    retained
}
