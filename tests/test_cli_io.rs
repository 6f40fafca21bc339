#[cfg(test)]
mod tests {
    use motifsketch::cli::io::{read_input_map, write_rows};
    use motifsketch::{enrich, Case, ConvolutionRow, MotifParams, OrdinaryRow, Row, RowSchema};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tsv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file");
        file
    }

    #[test]
    fn reads_ordinary_tsv_grouping_by_data_id() -> anyhow::Result<()> {
        let tsv = "\
# comment line is ignored
1\t10\t1.0
1\t20\t1.5
2\t10\t2.0
";
        let tmp = write_tsv(tsv);
        let map = read_input_map(tmp.path(), Case::Ordinary)?;
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1].len(), 2);
        assert_eq!(map[&2].len(), 1);
        Ok(())
    }

    #[test]
    fn reads_convolution_tsv_with_position_column() -> anyhow::Result<()> {
        let tsv = "1\t7\t10\t1.0\n1\t19\t20\t1.0\n";
        let tmp = write_tsv(tsv);
        let map = read_input_map(tmp.path(), Case::Convolution)?;
        assert_eq!(map[&1].len(), 2);
        Ok(())
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let tsv = "1\tnot_a_number\t1.0\n";
        let tmp = write_tsv(tsv);
        let err = read_input_map(tmp.path(), Case::Ordinary).unwrap_err();
        assert!(err.to_string().contains(":1:"));
    }

    #[test]
    fn write_rows_emits_header_matching_schema() -> anyhow::Result<()> {
        let out = NamedTempFile::new()?;
        let rows = vec![Row::Ordinary(OrdinaryRow {
            motifs: vec![10, 20],
            data_index: 1,
            contribution: 2.0,
            count: 3,
        })];
        write_rows(out.path(), RowSchema::Ordinary { k: 2 }, &rows)?;
        let text = std::fs::read_to_string(out.path())?;
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "m_1\tm_2\tdata_index\tcontribution\tcount");
        assert_eq!(lines.next().unwrap(), "10\t20\t1\t2\t3");
        Ok(())
    }

    #[test]
    fn write_rows_convolution_schema_includes_gaps_and_bounds() -> anyhow::Result<()> {
        let out = NamedTempFile::new()?;
        let rows = vec![Row::Convolution(ConvolutionRow {
            motifs: vec![7, 19, 42],
            gaps: vec![2, 4],
            start: 10,
            end: 39,
            data_index: 1,
            contribution: 3.0,
            count: 25,
        })];
        write_rows(out.path(), RowSchema::Convolution { k: 3 }, &rows)?;
        let text = std::fs::read_to_string(out.path())?;
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "m_1\tm_2\tm_3\td_1_2\td_2_3\tstart\tend\tdata_index\tcontribution\tcount"
        );
        Ok(())
    }

    /// Round-trip: write an input map out, read it back, and confirm the
    /// same motifs come out of `enrich`.
    #[test]
    fn io_roundtrip_feeds_enrich_identically() -> anyhow::Result<()> {
        let tsv = "\
1\t10\t1.0
1\t20\t1.0
2\t10\t1.0
2\t20\t1.0
";
        let tmp = write_tsv(tsv);
        let map = read_input_map(tmp.path(), Case::Ordinary)?;

        let params = MotifParams {
            k: 2,
            min_count: 1,
            seed: Some(5),
            ..Default::default()
        };
        let rows = enrich(&map, &params)?;
        assert_eq!(rows.len(), 2);
        Ok(())
    }
}
