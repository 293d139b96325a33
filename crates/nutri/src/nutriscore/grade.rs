use super::domain::NutriscoreGrade;

/// Ordered score bands; the first band whose upper bound covers the score wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBands {
    bands: &'static [(i32, NutriscoreGrade)],
    above: NutriscoreGrade,
}

impl GradeBands {
    pub const fn new(bands: &'static [(i32, NutriscoreGrade)], above: NutriscoreGrade) -> Self {
        Self { bands, above }
    }

    pub fn grade(&self, score: i32) -> NutriscoreGrade {
        self.bands
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map(|(_, grade)| *grade)
            .unwrap_or(self.above)
    }
}

/// Beverage bands. Grade A is absent: only the water exemption can award it.
pub const BEVERAGE_BANDS: GradeBands = GradeBands::new(
    &[
        (2, NutriscoreGrade::B),
        (6, NutriscoreGrade::C),
        (9, NutriscoreGrade::D),
    ],
    NutriscoreGrade::E,
);
