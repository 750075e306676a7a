//! Fuzzy AHP - Buckley's fuzzy geometric mean method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ahp::{
    comparison_positions, AhpCalculator, AhpOutcome, ComparisonMatrix, CriterionWeight,
    PairwiseComparison,
};
use super::table::ScoreRow;
use crate::domain::foundation::numeric;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::fuzzy::{Combination, TriangularFuzzyNumber};

/// Square reciprocal matrix of fuzzy pairwise judgments, one per decision
/// maker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyComparisonMatrix {
    criteria: Vec<String>,
    values: Vec<Vec<TriangularFuzzyNumber>>,
}

impl FuzzyComparisonMatrix {
    /// Wraps a full matrix. Reciprocity is the caller's responsibility.
    pub fn new(
        criteria: Vec<String>,
        values: Vec<Vec<TriangularFuzzyNumber>>,
    ) -> Result<Self, ValidationError> {
        if criteria.is_empty() {
            return Err(ValidationError::empty_field("criteria"));
        }
        let n = criteria.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return Err(ValidationError::invalid_format(
                "comparison_matrix",
                format!("expected a {}x{} matrix", n, n),
            ));
        }
        Ok(Self { criteria, values })
    }

    /// Builds the matrix from upper-triangle fuzzy judgments.
    ///
    /// The diagonal is `(1, 1, 1)`, each mirror cell is the judgment's
    /// reciprocal `(1/c, 1/b, 1/a)`, and pairs never mentioned default to
    /// `(1, 1, 1)`.
    pub fn from_pairs(
        criteria: Vec<String>,
        pairs: &[PairwiseComparison<TriangularFuzzyNumber>],
    ) -> Result<Self, DomainError> {
        let positions = comparison_positions(&criteria, pairs)?;
        if let Some(pair) = pairs.iter().find(|pair| pair.value.a().is_zero()) {
            return Err(ValidationError::invalid_format(
                "comparisons",
                format!(
                    "judgment {} / {} must have a positive lower bound, got {}",
                    pair.criterion_a, pair.criterion_b, pair.value
                ),
            )
            .into());
        }

        let one = TriangularFuzzyNumber::crisp(Decimal::ONE)?;
        let n = criteria.len();
        let mut values = vec![vec![one; n]; n];
        for (pair, (i, j)) in pairs.iter().zip(positions) {
            values[i][j] = pair.value;
            values[j][i] = pair.value.reciprocal()?;
        }
        Ok(Self::new(criteria, values)?)
    }

    /// Criteria in row order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Number of criteria.
    pub fn size(&self) -> usize {
        self.criteria.len()
    }

    /// Rows of the matrix.
    pub fn rows(&self) -> &[Vec<TriangularFuzzyNumber>] {
        &self.values
    }
}

/// Fuzzy AHP pipeline stages.
pub struct FuzzyAhpCalculator;

impl FuzzyAhpCalculator {
    /// Combines decision makers' matrices cell by cell with
    /// [`Combination::Union`].
    ///
    /// # Errors
    /// - `MISSING_INPUT` if there are no matrices
    /// - `VALIDATION_FAILED` if the matrices disagree on criteria
    pub fn combine_comparison_matrices(
        matrices: &[FuzzyComparisonMatrix],
    ) -> Result<FuzzyComparisonMatrix, DomainError> {
        let first = matrices
            .first()
            .ok_or_else(|| ValidationError::empty_field("decision_makers"))?;
        if let Some(other) = matrices.iter().find(|m| m.criteria != first.criteria) {
            return Err(ValidationError::invalid_format(
                "decision_makers",
                format!(
                    "comparison matrices disagree on criteria: {:?} vs {:?}",
                    first.criteria, other.criteria
                ),
            )
            .into());
        }

        let n = first.size();
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = Vec::with_capacity(n);
            for j in 0..n {
                let cell: Vec<_> = matrices.iter().map(|m| m.values[i][j]).collect();
                row.push(TriangularFuzzyNumber::combine(&cell, Combination::Union)?);
            }
            values.push(row);
        }
        Ok(FuzzyComparisonMatrix::new(first.criteria.clone(), values)?)
    }

    /// Fuzzy geometric mean of each row: componentwise product of each
    /// judgment raised to `1/n`.
    pub fn fuzzy_geometric_means(
        matrix: &FuzzyComparisonMatrix,
    ) -> Result<Vec<TriangularFuzzyNumber>, DomainError> {
        let exponent = numeric::checked_div(
            Decimal::ONE,
            Decimal::from(matrix.size()),
            "fuzzy AHP geometric mean",
        )?;
        let one = TriangularFuzzyNumber::crisp(Decimal::ONE)?;

        matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter().try_fold(one, |acc, value| {
                    let root = value.power(exponent)?;
                    acc.multiply(&root)
                })
            })
            .collect()
    }

    /// Crisp weights: centroid of each fuzzy geometric mean, scaled to sum
    /// to 1.
    pub fn fuzzy_priority_vector(
        matrix: &FuzzyComparisonMatrix,
    ) -> Result<Vec<CriterionWeight>, DomainError> {
        let centroids = Self::fuzzy_geometric_means(matrix)?
            .iter()
            .map(TriangularFuzzyNumber::centroid)
            .collect::<Result<Vec<_>, _>>()?;
        AhpCalculator::normalize_weights(matrix.criteria(), &centroids, "fuzzy AHP priority vector")
    }

    /// Centroid of every cell.
    pub fn defuzzify(matrix: &FuzzyComparisonMatrix) -> Result<ComparisonMatrix, DomainError> {
        let values = matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(TriangularFuzzyNumber::centroid)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ComparisonMatrix::new(matrix.criteria().to_vec(), values)?)
    }

    /// Runs the full pipeline.
    ///
    /// Consistency is checked on the defuzzified combined matrix; scoring and
    /// ranking are the crisp AHP stages.
    pub fn calculate(
        matrices: &[FuzzyComparisonMatrix],
        scores: &[ScoreRow<Decimal>],
    ) -> Result<AhpOutcome, DomainError> {
        let combined = Self::combine_comparison_matrices(matrices)?;
        let weights = Self::fuzzy_priority_vector(&combined)?;
        let crisp = Self::defuzzify(&combined)?;
        AhpCalculator::score_and_rank(&crisp, weights, scores)
    }
}
