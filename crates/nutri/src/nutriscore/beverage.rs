use super::domain::{
    NutriscoreGrade, Nutrient, Product, ScoreBreakdown, ScoreComponent, ScoreResult,
};
use super::grade::BEVERAGE_BANDS;
use super::thresholds::ThresholdTable;

pub const ENERGY_KJ: ThresholdTable<'static> = ThresholdTable::new(&[
    30.0, 90.0, 150.0, 210.0, 240.0, 270.0, 300.0, 330.0, 360.0, 390.0,
]);
pub const SUGAR_G: ThresholdTable<'static> =
    ThresholdTable::new(&[0.5, 2.0, 3.5, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
pub const SAT_FAT_G: ThresholdTable<'static> =
    ThresholdTable::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
pub const SALT_G: ThresholdTable<'static> = ThresholdTable::new(&[
    0.2, 0.4, 0.6, 0.8, 1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.4, 2.6, 2.8, 3.0, 3.2, 3.4, 3.6,
    3.8, 4.0,
]);
pub const FRUIT_VEG_PCT: ThresholdTable<'static> =
    ThresholdTable::with_points(&[40.0, 60.0, 80.0], &[0, 2, 4, 6]);
pub const FIBRE_G: ThresholdTable<'static> = ThresholdTable::new(&[3.0, 4.1, 5.2, 6.3, 7.4]);
pub const PROTEIN_G: ThresholdTable<'static> =
    ThresholdTable::new(&[1.2, 1.5, 1.8, 2.1, 2.4, 2.7, 3.0]);

/// Flat penalty for any added sweetener.
pub const SWEETENER_POINTS: i32 = 4;

/// Nutri-Score algorithm for drinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeveragePolicy;

impl BeveragePolicy {
    /// Every table the policy scores with, for invariant checks.
    pub fn tables() -> [(Nutrient, ThresholdTable<'static>); 7] {
        [
            (Nutrient::Energy, ENERGY_KJ),
            (Nutrient::Sugar, SUGAR_G),
            (Nutrient::SaturatedFat, SAT_FAT_G),
            (Nutrient::Salt, SALT_G),
            (Nutrient::FruitVegetables, FRUIT_VEG_PCT),
            (Nutrient::Fibre, FIBRE_G),
            (Nutrient::Protein, PROTEIN_G),
        ]
    }

    pub fn breakdown(&self, product: &Product) -> ScoreBreakdown {
        // Water is checked before any attribute is read.
        if product.is_water {
            return ScoreBreakdown::exempt();
        }

        let sweeteners = if product.has_sweeteners {
            SWEETENER_POINTS
        } else {
            0
        };

        let unfavorable = vec![
            component(Nutrient::Energy, product.energy_kj, &ENERGY_KJ),
            component(Nutrient::Sugar, product.sugar_g, &SUGAR_G),
            component(Nutrient::SaturatedFat, product.sat_fat_g, &SAT_FAT_G),
            component(Nutrient::Salt, product.salt_g, &SALT_G),
            ScoreComponent {
                nutrient: Nutrient::Sweeteners,
                value: if product.has_sweeteners { 1.0 } else { 0.0 },
                points: sweeteners,
            },
        ];

        let favorable = vec![
            component(
                Nutrient::FruitVegetables,
                product.fruit_veg_pct,
                &FRUIT_VEG_PCT,
            ),
            component(Nutrient::Fibre, product.fibre_g, &FIBRE_G),
            component(Nutrient::Protein, product.protein_g, &PROTEIN_G),
        ];

        ScoreBreakdown {
            water_exempt: false,
            unfavorable,
            favorable,
        }
    }

    /// Raw signed score before grading.
    pub fn score(&self, product: &Product) -> i32 {
        self.breakdown(product).score()
    }

    pub fn grade(&self, breakdown: &ScoreBreakdown) -> NutriscoreGrade {
        if breakdown.water_exempt {
            NutriscoreGrade::A
        } else {
            BEVERAGE_BANDS.grade(breakdown.score())
        }
    }

    pub fn result(&self, product: &Product) -> ScoreResult {
        let breakdown = self.breakdown(product);
        ScoreResult {
            score: breakdown.score(),
            grade: self.grade(&breakdown),
        }
    }
}

fn component(nutrient: Nutrient, value: f64, table: &ThresholdTable<'_>) -> ScoreComponent {
    ScoreComponent {
        nutrient,
        value,
        points: table.score(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutriscore::domain::ProductCategory;

    fn drink() -> Product {
        Product {
            energy_kj: 0.0,
            sugar_g: 0.0,
            sat_fat_g: 0.0,
            salt_g: 0.0,
            fruit_veg_pct: 0.0,
            fibre_g: 0.0,
            protein_g: 0.0,
            has_sweeteners: false,
            is_water: false,
            category: ProductCategory::Beverage,
        }
    }

    #[test]
    fn tables_are_well_formed() {
        for (nutrient, table) in BeveragePolicy::tables() {
            assert_eq!(table.validate(), Ok(()), "{nutrient:?}");
        }
        assert_eq!(SALT_G.bucket_count(), 21);
        assert_eq!(ENERGY_KJ.bucket_count(), 11);
        assert_eq!(PROTEIN_G.bucket_count(), 8);
    }

    #[test]
    fn boundaries_belong_to_lower_bucket() {
        for (nutrient, table) in BeveragePolicy::tables() {
            for (index, boundary) in table.boundaries().iter().copied().enumerate() {
                assert_eq!(
                    table.score(boundary),
                    table.points_for_bucket(index),
                    "{nutrient:?} at {boundary}"
                );
                assert_eq!(
                    table.score(boundary + 1e-9),
                    table.points_for_bucket(index + 1),
                    "{nutrient:?} just above {boundary}"
                );
            }
        }
    }

    #[test]
    fn water_ignores_every_other_attribute() {
        let water = Product {
            energy_kj: 900.0,
            sugar_g: 40.0,
            salt_g: 5.0,
            has_sweeteners: true,
            is_water: true,
            ..drink()
        };

        let result = BeveragePolicy.result(&water);
        assert_eq!(result.score, 0);
        assert_eq!(result.grade, NutriscoreGrade::A);
        assert!(BeveragePolicy.breakdown(&water).unfavorable.is_empty());
    }

    #[test]
    fn orange_juice_breakdown() {
        let juice = Product {
            energy_kj: 180.0,
            sugar_g: 8.9,
            fruit_veg_pct: 100.0,
            fibre_g: 0.2,
            protein_g: 0.5,
            ..drink()
        };

        let breakdown = BeveragePolicy.breakdown(&juice);
        assert_eq!(breakdown.n_total(), 10);
        assert_eq!(breakdown.p_total(), 6);
        assert_eq!(BeveragePolicy.score(&juice), 4);
        assert_eq!(BeveragePolicy.grade(&breakdown), NutriscoreGrade::C);
    }

    #[test]
    fn sweeteners_add_fixed_penalty() {
        let plain = Product {
            sugar_g: 3.0,
            energy_kj: 60.0,
            ..drink()
        };
        let sweetened = Product {
            has_sweeteners: true,
            ..plain
        };

        assert_eq!(
            BeveragePolicy.score(&sweetened) - BeveragePolicy.score(&plain),
            SWEETENER_POINTS
        );
    }

    #[test]
    fn favorable_points_can_drive_score_negative() {
        let smoothie = Product {
            fruit_veg_pct: 95.0,
            fibre_g: 8.0,
            protein_g: 3.5,
            ..drink()
        };

        let result = BeveragePolicy.result(&smoothie);
        assert_eq!(result.score, -18);
        assert_eq!(result.grade, NutriscoreGrade::B);
    }
}
