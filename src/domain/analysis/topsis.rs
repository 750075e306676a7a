//! TOPSIS - Ranking by closeness to the ideal solution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ranking::{rank_descending, RankedOption};
use super::table::{distinct, DecisionRow};
use crate::domain::foundation::numeric;
use crate::domain::foundation::DomainError;

/// Vector-normalized and weighted score of one (option, criterion) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub option: String,
    pub criterion: String,
    pub normalized_score: Decimal,
    pub weighted_score: Decimal,
    pub is_negative: bool,
}

/// Ideal-best and ideal-worst weighted score of one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealSolution<T> {
    pub criterion: String,
    pub best: T,
    pub worst: T,
}

/// Distances of one option from the two ideal solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationMeasure {
    pub option: String,
    /// `S+`
    pub to_best: Decimal,
    /// `S-`
    pub to_worst: Decimal,
}

/// Result of a TOPSIS run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopsisOutcome {
    pub ranking: Vec<RankedOption>,
    pub weighted_scores: Vec<WeightedScore>,
}

/// TOPSIS pipeline stages.
pub struct TopsisCalculator;

impl TopsisCalculator {
    /// Divides each score by its criterion column's Euclidean norm, then
    /// multiplies by the criterion weight.
    ///
    /// # Edge Cases
    /// - A column of all zeros normalizes to 0 (the criterion does not
    ///   discriminate)
    pub fn normalized_weighted_scores(
        rows: &[DecisionRow<Decimal>],
    ) -> Result<Vec<WeightedScore>, DomainError> {
        const CONTEXT: &str = "TOPSIS normalization";

        let mut squares: HashMap<&str, Decimal> = HashMap::new();
        for row in rows {
            let square = numeric::square(row.score, CONTEXT)?;
            let total = squares.entry(row.criterion.as_str()).or_insert(Decimal::ZERO);
            *total = numeric::checked_add(*total, square, CONTEXT)?;
        }

        let mut norms = HashMap::with_capacity(squares.len());
        for (criterion, sum_of_squares) in squares {
            norms.insert(criterion, numeric::sqrt(sum_of_squares, CONTEXT)?);
        }

        rows.iter()
            .map(|row| {
                let norm = norms
                    .get(row.criterion.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let normalized_score = if norm.is_zero() {
                    Decimal::ZERO
                } else {
                    numeric::checked_div(row.score, norm, CONTEXT)?
                };
                Ok(WeightedScore {
                    option: row.option.clone(),
                    criterion: row.criterion.clone(),
                    normalized_score,
                    weighted_score: numeric::checked_mul(normalized_score, row.weight, CONTEXT)?,
                    is_negative: row.is_negative,
                })
            })
            .collect()
    }

    /// Ideal-best and ideal-worst weighted score per criterion.
    ///
    /// For benefit criteria the best is the column maximum; for cost criteria
    /// it is the column minimum. The worst is the opposite extreme.
    pub fn ideal_solutions(scores: &[WeightedScore]) -> Vec<IdealSolution<Decimal>> {
        distinct(scores.iter().map(|s| s.criterion.as_str()))
            .into_iter()
            .filter_map(|criterion| {
                let column: Vec<&WeightedScore> = scores
                    .iter()
                    .filter(|s| s.criterion == criterion)
                    .collect();
                let is_negative = column.first()?.is_negative;
                let max = column.iter().map(|s| s.weighted_score).max()?;
                let min = column.iter().map(|s| s.weighted_score).min()?;

                let (best, worst) = if is_negative { (min, max) } else { (max, min) };
                Some(IdealSolution {
                    criterion,
                    best,
                    worst,
                })
            })
            .collect()
    }

    /// Euclidean distance of each option from the ideal-best (`S+`) and
    /// ideal-worst (`S-`) points.
    pub fn separation_measures(
        scores: &[WeightedScore],
        ideals: &[IdealSolution<Decimal>],
    ) -> Result<Vec<SeparationMeasure>, DomainError> {
        const CONTEXT: &str = "TOPSIS separation measures";

        let ideals: HashMap<&str, &IdealSolution<Decimal>> = ideals
            .iter()
            .map(|ideal| (ideal.criterion.as_str(), ideal))
            .collect();

        distinct(scores.iter().map(|s| s.option.as_str()))
            .into_iter()
            .map(|option| {
                let mut to_best = Decimal::ZERO;
                let mut to_worst = Decimal::ZERO;
                for score in scores.iter().filter(|s| s.option == option) {
                    let Some(ideal) = ideals.get(score.criterion.as_str()) else {
                        continue;
                    };
                    to_best = numeric::checked_add(
                        to_best,
                        numeric::square(score.weighted_score - ideal.best, CONTEXT)?,
                        CONTEXT,
                    )?;
                    to_worst = numeric::checked_add(
                        to_worst,
                        numeric::square(score.weighted_score - ideal.worst, CONTEXT)?,
                        CONTEXT,
                    )?;
                }
                Ok(SeparationMeasure {
                    option,
                    to_best: numeric::sqrt(to_best, CONTEXT)?,
                    to_worst: numeric::sqrt(to_worst, CONTEXT)?,
                })
            })
            .collect()
    }

    /// Closeness coefficient `S- / (S+ + S-)`.
    ///
    /// When both distances are zero the option coincides with both ideals and
    /// the coefficient is the midpoint 0.5.
    pub fn closeness_coefficient(
        to_best: Decimal,
        to_worst: Decimal,
    ) -> Result<Decimal, DomainError> {
        const CONTEXT: &str = "closeness coefficient";
        let total = numeric::checked_add(to_best, to_worst, CONTEXT)?;
        if total.is_zero() {
            return Ok(Decimal::ONE / Decimal::TWO);
        }
        numeric::checked_div(to_worst, total, CONTEXT)
    }

    /// Ranks options by closeness coefficient, highest first.
    pub fn ranking(separations: &[SeparationMeasure]) -> Result<Vec<RankedOption>, DomainError> {
        let scores = separations
            .iter()
            .map(|s| {
                Self::closeness_coefficient(s.to_best, s.to_worst)
                    .map(|closeness| (s.option.clone(), closeness))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rank_descending(scores))
    }

    /// Runs the full pipeline.
    pub fn calculate(rows: &[DecisionRow<Decimal>]) -> Result<TopsisOutcome, DomainError> {
        let weighted_scores = Self::normalized_weighted_scores(rows)?;
        let ideals = Self::ideal_solutions(&weighted_scores);
        let separations = Self::separation_measures(&weighted_scores, &ideals)?;
        let ranking = Self::ranking(&separations)?;

        Ok(TopsisOutcome {
            ranking,
            weighted_scores,
        })
    }
}
