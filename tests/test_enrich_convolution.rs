#[cfg(test)]
mod tests {
    use motifsketch::{enrich, Case, Feature, InputMap, MotifParams, Row};

    fn conv_feat(filter_id: u32, position: u32) -> Feature {
        Feature::Convolution {
            filter_id,
            contribution: 1.0,
            position,
        }
    }

    /// spec.md §8 scenario 2: 25 identical non-overlapping occurrences of a
    /// 3-filter motif (ell=8) plus noise sequences; all 25 must surface.
    #[test]
    fn convolution_non_overlap_motif_is_recovered() -> anyhow::Result<()> {
        let mut map = InputMap::default();
        for id in 1..=25 {
            map.insert(
                id,
                vec![conv_feat(7, 10), conv_feat(19, 20), conv_feat(42, 32)],
            );
        }
        // Noise sequences that should not contribute to the motif's count.
        for id in 26..=60 {
            map.insert(
                id,
                vec![conv_feat(1, 1), conv_feat(2, 50), conv_feat(3, 90)],
            );
        }

        let params = MotifParams {
            k: 3,
            case: Case::Convolution,
            filter_len: Some(8),
            min_count: 8,
            seed: Some(3),
            ..Default::default()
        };

        let rows = enrich(&map, &params)?;
        let matching: Vec<_> = rows
            .iter()
            .filter_map(|r| match r {
                Row::Convolution(c) if c.motifs == vec![7, 19, 42] => Some(c),
                _ => None,
            })
            .collect();

        assert!(matching.len() >= 25, "got {} matching rows", matching.len());
        for row in &matching {
            assert_eq!(row.gaps, vec![2, 4]);
            assert_eq!(row.start, 10);
            assert_eq!(row.end, 39);
            assert!(row.count >= 25);
        }
        Ok(())
    }

    /// spec.md §8 scenario 3: an overlapping gap (d23 = 25-20-8 = -3) must
    /// reject the combination entirely.
    #[test]
    fn convolution_overlap_is_rejected() -> anyhow::Result<()> {
        let mut map = InputMap::default();
        map.insert(
            1,
            vec![conv_feat(22, 8), conv_feat(8, 20), conv_feat(39, 25)],
        );

        let params = MotifParams {
            k: 3,
            case: Case::Convolution,
            filter_len: Some(8),
            min_count: 1,
            ..Default::default()
        };

        let rows = enrich(&map, &params)?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[test]
    fn convolution_without_filter_len_is_a_config_error() {
        let mut map = InputMap::default();
        map.insert(1, vec![conv_feat(1, 0), conv_feat(2, 10)]);
        let params = MotifParams {
            k: 2,
            case: Case::Convolution,
            filter_len: None,
            ..Default::default()
        };
        let err = enrich(&map, &params).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn convolution_sequences_are_sorted_by_position_before_batching() -> anyhow::Result<()> {
        // Features given out of position order; the pipeline must sort by
        // position before combinations are evaluated.
        let mut map = InputMap::default();
        map.insert(1, vec![conv_feat(7, 20), conv_feat(19, 10)]);

        let params = MotifParams {
            k: 2,
            case: Case::Convolution,
            filter_len: Some(5),
            min_count: 1,
            ..Default::default()
        };

        let rows = enrich(&map, &params)?;
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            Row::Convolution(r) => {
                // After sorting by position, filter 19 (pos 10) precedes
                // filter 7 (pos 20).
                assert_eq!(r.motifs, vec![19, 7]);
                assert_eq!(r.gaps, vec![5]); // 20 - 10 - 5
                assert_eq!(r.start, 10);
                assert_eq!(r.end, 24);
            }
            Row::Ordinary(_) => panic!("expected a convolution row"),
        }
        Ok(())
    }
}
