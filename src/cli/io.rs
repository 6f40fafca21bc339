use anyhow::{bail, Context};
use std::path::Path;

use motifsketch::{Case, DataPointId, Feature, InputMap, Row};

/// Reads a TSV sequence file into an [`InputMap`].
///
/// Ordinary case: `data_id\tfeature_id\tcontribution`.
/// Convolution case: `data_id\tfeature_id\tposition\tcontribution`.
///
/// Rows sharing a `data_id` need not be contiguous; they're appended to that
/// id's feature list in file order (Convolution sequences are re-sorted by
/// position downstream, so file order doesn't matter there either).
pub fn read_input_map(path: &Path, case: Case) -> anyhow::Result<InputMap> {
    let text = std::fs::read_to_string(path).context(format!("reading {:?}", path))?;
    let mut map = InputMap::default();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        let feat = match case {
            Case::Ordinary => {
                if cols.len() != 3 {
                    bail!(
                        "{:?}:{}: expected 3 columns for --case ordinary, got {}",
                        path,
                        lineno + 1,
                        cols.len()
                    );
                }
                let id: u32 = cols[1]
                    .parse()
                    .context(format!("{:?}:{}: feature_id", path, lineno + 1))?;
                let contribution: f32 = cols[2]
                    .parse()
                    .context(format!("{:?}:{}: contribution", path, lineno + 1))?;
                Feature::Ordinary { id, contribution }
            }
            Case::Convolution => {
                if cols.len() != 4 {
                    bail!(
                        "{:?}:{}: expected 4 columns for --case convolution, got {}",
                        path,
                        lineno + 1,
                        cols.len()
                    );
                }
                let filter_id: u32 = cols[1]
                    .parse()
                    .context(format!("{:?}:{}: feature_id", path, lineno + 1))?;
                let position: u32 = cols[2]
                    .parse()
                    .context(format!("{:?}:{}: position", path, lineno + 1))?;
                let contribution: f32 = cols[3]
                    .parse()
                    .context(format!("{:?}:{}: contribution", path, lineno + 1))?;
                Feature::Convolution {
                    filter_id,
                    contribution,
                    position,
                }
            }
        };
        let data_id: DataPointId = cols[0]
            .parse()
            .context(format!("{:?}:{}: data_id", path, lineno + 1))?;
        map.entry(data_id).or_default().push(feat);
    }

    Ok(map)
}

/// Writes a row stream to a TSV file, with a header derived from `schema`.
pub fn write_rows(path: &Path, schema: motifsketch::RowSchema, rows: &[Row]) -> anyhow::Result<()> {
    use std::io::Write;

    let mut w = std::io::BufWriter::new(
        std::fs::File::create(path).context(format!("creating {:?}", path))?,
    );
    writeln!(w, "{}", schema.column_names().join("\t")).context("writing header")?;

    for row in rows {
        match row {
            Row::Ordinary(r) => {
                let motifs: Vec<String> = r.motifs.iter().map(|m| m.to_string()).collect();
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}",
                    motifs.join("\t"),
                    r.data_index,
                    r.contribution,
                    r.count
                )
                .context("writing row")?;
            }
            Row::Convolution(r) => {
                let motifs: Vec<String> = r.motifs.iter().map(|m| m.to_string()).collect();
                let gaps: Vec<String> = r.gaps.iter().map(|g| g.to_string()).collect();
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    motifs.join("\t"),
                    gaps.join("\t"),
                    r.start,
                    r.end,
                    r.data_index,
                    r.contribution,
                    r.count
                )
                .context("writing row")?;
            }
        }
    }
    Ok(())
}
