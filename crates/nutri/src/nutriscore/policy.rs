use super::beverage::BeveragePolicy;
use super::domain::{Product, ProductCategory, ScoreBreakdown, ScoreResult};
use super::error::NutriscoreError;

/// Scoring algorithms for the categories that have one.
///
/// `general` and `fats` deliberately have no variant yet; selecting them is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    Beverage(BeveragePolicy),
}

impl CategoryPolicy {
    pub fn for_category(category: ProductCategory) -> Result<Self, NutriscoreError> {
        match category {
            ProductCategory::Beverage => Ok(Self::Beverage(BeveragePolicy)),
            ProductCategory::General | ProductCategory::Fats => {
                Err(NutriscoreError::UnsupportedCategory(category))
            }
        }
    }

    pub fn breakdown(&self, product: &Product) -> ScoreBreakdown {
        match self {
            CategoryPolicy::Beverage(policy) => policy.breakdown(product),
        }
    }

    pub fn result(&self, product: &Product) -> ScoreResult {
        match self {
            CategoryPolicy::Beverage(policy) => policy.result(product),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_beverages_have_a_policy() {
        assert_eq!(
            CategoryPolicy::for_category(ProductCategory::Beverage),
            Ok(CategoryPolicy::Beverage(BeveragePolicy))
        );
        for category in [ProductCategory::General, ProductCategory::Fats] {
            assert_eq!(
                CategoryPolicy::for_category(category),
                Err(NutriscoreError::UnsupportedCategory(category))
            );
        }
    }

    #[test]
    fn result_agrees_with_breakdown() {
        let product = Product {
            energy_kj: 180.0,
            sugar_g: 8.9,
            sat_fat_g: 0.0,
            salt_g: 0.0,
            fruit_veg_pct: 100.0,
            fibre_g: 0.2,
            protein_g: 0.5,
            has_sweeteners: false,
            is_water: false,
            category: ProductCategory::Beverage,
        };
        let policy = CategoryPolicy::for_category(product.category).expect("beverage policy");

        let breakdown = policy.breakdown(&product);
        assert_eq!(policy.result(&product).score, breakdown.score());
        assert_eq!(breakdown.score(), 4);
    }
}
