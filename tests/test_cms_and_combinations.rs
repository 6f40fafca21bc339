#[cfg(test)]
mod tests {
    use motifsketch::{binomial, enumerate_combinations, Case, Cms};

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(50, 3), 19600);
        assert_eq!(binomial(3, 3), 1);
        assert_eq!(binomial(2, 3), 0);
    }

    #[test]
    fn combinations_are_lexicographic_and_strictly_increasing() {
        let combs = enumerate_combinations(2, 4);
        // C(4,2) = 6
        assert_eq!(combs.shape(), &[2, 6]);
        let expected = [
            [1, 2],
            [1, 3],
            [1, 4],
            [2, 3],
            [2, 4],
            [3, 4],
        ];
        for (col, exp) in expected.iter().enumerate() {
            assert_eq!(combs[[0, col]], exp[0]);
            assert_eq!(combs[[1, col]], exp[1]);
        }
    }

    #[test]
    fn k_equals_l_yields_single_combination() {
        let combs = enumerate_combinations(3, 3);
        assert_eq!(combs.shape(), &[3, 1]);
        assert_eq!(combs[[0, 0]], 1);
        assert_eq!(combs[[1, 0]], 2);
        assert_eq!(combs[[2, 0]], 3);
    }

    #[test]
    fn k_greater_than_l_yields_zero_combinations() {
        let combs = enumerate_combinations(4, 3);
        assert_eq!(combs.shape(), &[4, 0]);
    }

    #[test]
    fn cms_rejects_out_of_range_error_params() {
        assert!(Cms::new(2, Case::Ordinary, 0.0, 5e-5, None).is_err());
        assert!(Cms::new(2, Case::Ordinary, 1.0, 5e-5, None).is_err());
        assert!(Cms::new(2, Case::Ordinary, 1e-4, 0.0, None).is_err());
        assert!(Cms::new(2, Case::Ordinary, 1e-4, 1.0, None).is_err());
    }

    #[test]
    fn cms_shape_follows_the_closed_form() {
        let delta = 1e-4;
        let epsilon = 5e-5;
        let cms = Cms::new(3, Case::Convolution, delta, epsilon, Some(7)).unwrap();
        let expected_d = (1.0_f64 / delta).ln().ceil() as usize;
        let expected_w = (std::f64::consts::E / epsilon).ceil() as usize;
        assert_eq!(cms.d(), expected_d);
        assert_eq!(cms.w(), expected_w);
        assert_eq!(cms.h(), 2 * 3 - 1);
    }

    #[test]
    fn cms_increment_and_peek_are_consistent() {
        let cms = Cms::new(2, Case::Ordinary, 1e-4, 5e-5, Some(1)).unwrap();
        assert_eq!(cms.peek(0, 0), 0);
        cms.increment(0, 0);
        cms.increment(0, 0);
        assert_eq!(cms.peek(0, 0), 2);
        // Untouched cells remain zero.
        assert_eq!(cms.peek(0, 1), 0);
    }

    #[test]
    fn cms_seeded_coefficients_are_deterministic() {
        let a = Cms::new(3, Case::Ordinary, 1e-4, 5e-5, Some(42)).unwrap();
        let b = Cms::new(3, Case::Ordinary, 1e-4, 5e-5, Some(42)).unwrap();
        for r in 0..a.d() {
            for e in 0..a.h() {
                assert_eq!(a.coeff(r, e), b.coeff(r, e));
            }
        }
    }
}
