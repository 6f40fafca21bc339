//! Output row schema.

/// One emitted Ordinary motif occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinaryRow {
    /// `m_1 .. m_k`, in combination order.
    pub motifs: Vec<i64>,
    /// The caller's original sequence key.
    pub data_index: i64,
    pub contribution: f32,
    /// The sketch-estimated frequency used at selection time.
    pub count: u32,
}

/// One emitted Convolution motif occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionRow {
    /// `m_1 .. m_k`, in combination order.
    pub motifs: Vec<i64>,
    /// `d_{1,2} .. d_{k-1,k}`, the inter-filter gaps.
    pub gaps: Vec<i64>,
    pub start: i64,
    pub end: i64,
    pub data_index: i64,
    pub contribution: f32,
    pub count: u32,
}

/// A single emitted motif row; which variant populates depends on the
/// [`Case`](crate::sketch::feature::Case) the input map was built with.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Ordinary(OrdinaryRow),
    Convolution(ConvolutionRow),
}

/// Describes the column layout of a row stream, independent of whether any
/// rows were actually emitted — the column layout is fully determined even
/// when zero rows are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchema {
    Ordinary { k: usize },
    Convolution { k: usize },
}

impl RowSchema {
    pub fn column_names(&self) -> Vec<String> {
        match *self {
            RowSchema::Ordinary { k } => {
                let mut cols: Vec<String> = (1..=k).map(|i| format!("m_{i}")).collect();
                cols.push("data_index".to_string());
                cols.push("contribution".to_string());
                cols.push("count".to_string());
                cols
            }
            RowSchema::Convolution { k } => {
                let mut cols: Vec<String> = (1..=k).map(|i| format!("m_{i}")).collect();
                for i in 1..k {
                    cols.push(format!("d_{}_{}", i, i + 1));
                }
                cols.push("start".to_string());
                cols.push("end".to_string());
                cols.push("data_index".to_string());
                cols.push("contribution".to_string());
                cols.push("count".to_string());
                cols
            }
        }
    }
}
