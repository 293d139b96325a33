use crate::nutriscore::{Product, ProductCategory};
use serde::{Deserialize, Serialize};

/// External representation of a product as submitted over HTTP or in a CSV row.
///
/// Only energy and sugar are mandatory; other nutrients default to zero and the category
/// defaults to `general`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRequest {
    pub energy_kj: f64,
    pub sugar_g: f64,
    #[serde(default)]
    pub sat_fat_g: f64,
    #[serde(default)]
    pub salt_g: f64,
    #[serde(default)]
    pub fruit_veg_pct: f64,
    #[serde(default)]
    pub fibre_g: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub has_sweeteners: bool,
    #[serde(default)]
    pub is_water: bool,
    #[serde(default = "default_category")]
    pub category: ProductCategory,
}

fn default_category() -> ProductCategory {
    ProductCategory::General
}

/// A product field that violates its declared constraint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("request body could not be decoded: {reason}")]
    Undecodable { reason: String },
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), InputError> {
        let quantities = [
            ("energy_kj", self.energy_kj),
            ("sugar_g", self.sugar_g),
            ("sat_fat_g", self.sat_fat_g),
            ("salt_g", self.salt_g),
            ("fruit_veg_pct", self.fruit_veg_pct),
            ("fibre_g", self.fibre_g),
            ("protein_g", self.protein_g),
        ];

        for (field, value) in quantities {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(InputError::Negative { field, value });
            }
        }

        if self.fruit_veg_pct > 100.0 {
            return Err(InputError::OutOfRange {
                field: "fruit_veg_pct",
                value: self.fruit_veg_pct,
                min: 0.0,
                max: 100.0,
            });
        }

        Ok(())
    }

    pub fn into_product(self) -> Result<Product, InputError> {
        self.validate()?;
        Ok(Product {
            energy_kj: self.energy_kj,
            sugar_g: self.sugar_g,
            sat_fat_g: self.sat_fat_g,
            salt_g: self.salt_g,
            fruit_veg_pct: self.fruit_veg_pct,
            fibre_g: self.fibre_g,
            protein_g: self.protein_g,
            has_sweeteners: self.has_sweeteners,
            is_water: self.is_water,
            category: self.category,
        })
    }
}
