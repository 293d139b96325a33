use super::domain::{Product, ScoreBreakdown, ScoreResult};
use super::error::NutriscoreError;
use super::policy::CategoryPolicy;
use rayon::prelude::*;

/// Stateless entry point dispatching products to their category policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NutriscoreEngine;

impl NutriscoreEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, product: &Product) -> Result<ScoreResult, NutriscoreError> {
        let policy = CategoryPolicy::for_category(product.category)?;
        Ok(policy.result(product))
    }

    /// Scores every product independently, one result per input in input order.
    ///
    /// An unsupported category fails only its own entry.
    pub fn calculate_bulk(
        &self,
        products: &[Product],
    ) -> Vec<Result<ScoreResult, NutriscoreError>> {
        products
            .par_iter()
            .map(|product| self.calculate(product))
            .collect()
    }

    /// Per-nutrient points behind the score `calculate` would return.
    pub fn explain(&self, product: &Product) -> Result<ScoreBreakdown, NutriscoreError> {
        let policy = CategoryPolicy::for_category(product.category)?;
        Ok(policy.breakdown(product))
    }
}
