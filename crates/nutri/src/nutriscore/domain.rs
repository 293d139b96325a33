use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product families with distinct Nutri-Score algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    General,
    Fats,
    Beverage,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::General,
        ProductCategory::Fats,
        ProductCategory::Beverage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::General => "general",
            ProductCategory::Fats => "fats",
            ProductCategory::Beverage => "beverage",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product category '{0}' (expected general, fats or beverage)")]
pub struct ParseCategoryError(pub String);

impl FromStr for ProductCategory {
    type Err = ParseCategoryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        ProductCategory::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
            .ok_or_else(|| ParseCategoryError(raw.to_string()))
    }
}

/// Nutritional facts for a single product, per 100 g or 100 ml.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub energy_kj: f64,
    pub sugar_g: f64,
    pub sat_fat_g: f64,
    pub salt_g: f64,
    pub fruit_veg_pct: f64,
    pub fibre_g: f64,
    pub protein_g: f64,
    pub has_sweeteners: bool,
    pub is_water: bool,
    pub category: ProductCategory,
}

/// Letter grade, A (best) through E (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutriscoreGrade {
    A,
    B,
    C,
    D,
    E,
}

impl NutriscoreGrade {
    pub fn letter(self) -> &'static str {
        match self {
            NutriscoreGrade::A => "A",
            NutriscoreGrade::B => "B",
            NutriscoreGrade::C => "C",
            NutriscoreGrade::D => "D",
            NutriscoreGrade::E => "E",
        }
    }
}

impl fmt::Display for NutriscoreGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Final score paired with the grade derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i32,
    pub grade: NutriscoreGrade,
}

/// Attributes that can contribute points to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Sugar,
    SaturatedFat,
    Salt,
    Sweeteners,
    FruitVegetables,
    Fibre,
    Protein,
}

impl Nutrient {
    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Energy => "Energy (kJ)",
            Nutrient::Sugar => "Sugars (g)",
            Nutrient::SaturatedFat => "Saturated fat (g)",
            Nutrient::Salt => "Salt (g)",
            Nutrient::Sweeteners => "Sweeteners",
            Nutrient::FruitVegetables => "Fruits & vegetables (%)",
            Nutrient::Fibre => "Fibre (g)",
            Nutrient::Protein => "Protein (g)",
        }
    }
}

/// One attribute's contribution to a score, kept for audit output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub nutrient: Nutrient,
    pub value: f64,
    pub points: i32,
}

/// Unfavorable and favorable point contributions behind a single score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub water_exempt: bool,
    pub unfavorable: Vec<ScoreComponent>,
    pub favorable: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    /// Breakdown for products exempt from point computation.
    pub fn exempt() -> Self {
        Self {
            water_exempt: true,
            ..Self::default()
        }
    }

    pub fn n_total(&self) -> i32 {
        self.unfavorable.iter().map(|component| component.points).sum()
    }

    pub fn p_total(&self) -> i32 {
        self.favorable.iter().map(|component| component.points).sum()
    }

    pub fn score(&self) -> i32 {
        self.n_total() - self.p_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            " Beverage ".parse::<ProductCategory>(),
            Ok(ProductCategory::Beverage)
        );
        assert_eq!("FATS".parse::<ProductCategory>(), Ok(ProductCategory::Fats));
        assert!("snacks".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn grade_and_category_serialize_as_wire_labels() {
        let result = ScoreResult {
            score: 4,
            grade: NutriscoreGrade::C,
        };
        let json = serde_json::to_value(result).expect("serialize result");
        assert_eq!(json, serde_json::json!({ "score": 4, "grade": "C" }));

        let category = serde_json::to_value(ProductCategory::Beverage).expect("serialize");
        assert_eq!(category, serde_json::json!("beverage"));
    }

    #[test]
    fn exempt_breakdown_scores_zero() {
        let breakdown = ScoreBreakdown::exempt();
        assert!(breakdown.water_exempt);
        assert_eq!(breakdown.score(), 0);
    }
}
