//! Ranking - Descending rank with averaged ties.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An option's final place in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOption {
    pub option: String,
    /// Closeness coefficient, net flow, or weighted sum depending on method.
    pub performance_score: Decimal,
    /// 1 is best. Tied options share the mean of the positions they occupy.
    pub rank: Decimal,
}

/// Ranks options by score, highest first.
///
/// Options with equal scores receive the average of the positions they would
/// occupy, so two options tied for first both get rank 1.5. The result is
/// ordered by rank, with ties ordered by option name.
pub fn rank_descending(scores: Vec<(String, Decimal)>) -> Vec<RankedOption> {
    let mut sorted = scores;
    sorted.sort_by(|left, right| right.1.cmp(&left.1));

    let mut ranked = Vec::with_capacity(sorted.len());
    let mut start = 0;
    while start < sorted.len() {
        let score = sorted[start].1;
        let end = sorted[start..]
            .iter()
            .position(|(_, s)| *s != score)
            .map_or(sorted.len(), |offset| start + offset);

        // Positions start+1 ..= end share their mean
        let rank = Decimal::from(start + 1 + end) / Decimal::TWO;
        for (option, performance_score) in &sorted[start..end] {
            ranked.push(RankedOption {
                option: option.clone(),
                performance_score: *performance_score,
                rank,
            });
        }
        start = end;
    }

    ranked.sort_by(|left, right| {
        left.rank
            .cmp(&right.rank)
            .then_with(|| left.option.cmp(&right.option))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scores(values: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
        values
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    #[test]
    fn ranks_highest_score_first() {
        let ranked = rank_descending(scores(&[
            ("A", dec!(0.2)),
            ("B", dec!(0.9)),
            ("C", dec!(0.5)),
        ]));

        let order: Vec<_> = ranked.iter().map(|r| r.option.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(ranked[0].rank, dec!(1));
        assert_eq!(ranked[1].rank, dec!(2));
        assert_eq!(ranked[2].rank, dec!(3));
    }

    #[test]
    fn ties_share_mean_position() {
        let ranked = rank_descending(scores(&[
            ("C", dec!(0.5)),
            ("A", dec!(0.5)),
            ("B", dec!(0.1)),
        ]));

        assert_eq!(ranked[0].option, "A");
        assert_eq!(ranked[0].rank, dec!(1.5));
        assert_eq!(ranked[1].option, "C");
        assert_eq!(ranked[1].rank, dec!(1.5));
        assert_eq!(ranked[2].rank, dec!(3));
    }

    #[test]
    fn all_tied_share_middle_rank() {
        let ranked = rank_descending(scores(&[
            ("A", dec!(0)),
            ("B", dec!(0)),
            ("C", dec!(0)),
        ]));
        assert!(ranked.iter().all(|r| r.rank == dec!(2)));
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        assert!(rank_descending(Vec::new()).is_empty());
    }

    #[test]
    fn ranking_is_idempotent() {
        let input = scores(&[("A", dec!(1)), ("B", dec!(1)), ("C", dec!(3))]);
        assert_eq!(rank_descending(input.clone()), rank_descending(input));
    }
}
