//! Nutri-Score engine: threshold tables, category policies and grade bands.
//!
//! Scoring is a pure function of a [`Product`]; nothing here performs I/O or logs.

pub mod beverage;
pub mod domain;
pub mod engine;
pub mod error;
pub mod grade;
pub mod policy;
pub mod thresholds;

pub use beverage::BeveragePolicy;
pub use domain::{
    NutriscoreGrade, Nutrient, ParseCategoryError, Product, ProductCategory, ScoreBreakdown,
    ScoreComponent, ScoreResult,
};
pub use engine::NutriscoreEngine;
pub use error::NutriscoreError;
pub use grade::{GradeBands, BEVERAGE_BANDS};
pub use policy::CategoryPolicy;
pub use thresholds::{ThresholdTable, ThresholdTableError};
