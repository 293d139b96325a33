use super::domain::ProductCategory;

/// Failure raised by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NutriscoreError {
    #[error("Nutri-Score calculation not implemented for category '{0}'")]
    UnsupportedCategory(ProductCategory),
}
