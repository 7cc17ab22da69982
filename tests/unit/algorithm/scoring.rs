//! Tests for the blend rule and score/commit consistency

#[cfg(test)]
mod tests {
    use strandweave::algorithm::config::ScoreMode;
    use strandweave::algorithm::coverage::StrandCoverage;
    use strandweave::algorithm::scoring::{StrandScore, blend, commit_strand, score_strand};
    use strandweave::analysis::residual::ResidualField;
    use strandweave::math::geometry::Point;

    fn horizontal_strand() -> StrandCoverage {
        StrandCoverage::rasterize(Point::new(2.0, 5.0), Point::new(8.0, 5.0), 1.0, 10, 10)
    }

    // Tests blending removes the opacity share of the residual
    // Verified by subtracting opacity instead of scaling
    #[test]
    fn test_blend() {
        assert!((blend(1.0, 0.25) - 0.75).abs() < 1e-7);
        assert!((blend(0.5, 0.5) - 0.25).abs() < 1e-7);
        assert_eq!(blend(0.0, 0.5), 0.0);
        assert_eq!(blend(0.8, 1.0), 0.0);
        assert_eq!(blend(0.8, 0.0), 0.8);
    }

    // Tests scoring reads the field without changing it
    // Verified by committing while scoring
    #[test]
    fn test_score_does_not_modify() {
        let field = ResidualField::from_rows(10, vec![vec![1.0; 10]; 10]);
        let score = score_strand(&horizontal_strand(), &field, 0.1);

        assert_eq!(score.pixels, 7);
        assert!((score.reduction - 0.7).abs() < 1e-5);
        assert!((field.total() - 100.0).abs() < 1e-9);
    }

    // Tests committed reduction equals the score of the same strand
    // Verified by using a different blend in commit
    #[test]
    fn test_commit_matches_score() {
        let mut field = ResidualField::from_rows(10, vec![vec![0.6; 10]; 10]);
        let coverage = horizontal_strand();
        let before = field.total();

        let score = score_strand(&coverage, &field, 0.3);
        let removed = commit_strand(&coverage, &mut field, 0.3);

        assert_eq!(score.reduction, removed);
        assert!((before - field.total() - removed).abs() < 1e-5);
        assert_eq!(field.get(2, 5), Some(blend(0.6, 0.3)));
        assert_eq!(field.get(1, 5), Some(0.6));
    }

    // Tests repeated strands give diminishing returns
    // Verified by resetting the residual after commit
    #[test]
    fn test_diminishing_returns() {
        let mut field = ResidualField::from_rows(10, vec![vec![1.0; 10]; 10]);
        let coverage = horizontal_strand();

        let first = commit_strand(&coverage, &mut field, 0.5);
        let second = commit_strand(&coverage, &mut field, 0.5);
        let third = score_strand(&coverage, &field, 0.5).reduction;

        assert!(first > second);
        assert!(second > third);
        assert!(third > 0.0);
    }

    // Tests ranking keys for both score modes
    // Verified by returning the total in mean mode
    #[test]
    fn test_ranking() {
        let score = StrandScore {
            reduction: 3.0,
            pixels: 12,
        };
        assert!((score.ranking(ScoreMode::Total) - 3.0).abs() < 1e-12);
        assert!((score.ranking(ScoreMode::Mean) - 0.25).abs() < 1e-12);

        let empty = StrandScore::default();
        assert!(empty.ranking(ScoreMode::Mean).abs() < 1e-12);
    }

    // Tests coverage outside the field is ignored
    // Verified by indexing rows without bounds checks
    #[test]
    fn test_coverage_outside_field() {
        let coverage =
            StrandCoverage::rasterize(Point::new(0.0, 8.0), Point::new(9.0, 8.0), 1.0, 10, 10);
        let mut small = ResidualField::from_rows(4, vec![vec![1.0; 4]; 4]);

        assert!(score_strand(&coverage, &small, 0.5).reduction.abs() < 1e-12);
        assert!(commit_strand(&coverage, &mut small, 0.5).abs() < 1e-12);
        assert!((small.total() - 16.0).abs() < 1e-9);
    }
}
