use crate::routes::BulkScoreResponse;
use clap::Args;
use nutri::error::AppError;
use nutri::ingest::{BulkProductImporter, ProductRequest};
use nutri::nutriscore::{NutriscoreEngine, ProductCategory, ScoreBreakdown, ScoreResult};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Energy per 100 g/ml in kJ
    #[arg(long)]
    pub(crate) energy_kj: f64,
    /// Sugars in g
    #[arg(long)]
    pub(crate) sugar_g: f64,
    /// Saturated fat in g
    #[arg(long, default_value_t = 0.0)]
    pub(crate) sat_fat_g: f64,
    /// Salt in g
    #[arg(long, default_value_t = 0.0)]
    pub(crate) salt_g: f64,
    /// Fruit, vegetable and legume share in percent (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) fruit_veg_pct: f64,
    /// Fibre in g
    #[arg(long, default_value_t = 0.0)]
    pub(crate) fibre_g: f64,
    /// Protein in g
    #[arg(long, default_value_t = 0.0)]
    pub(crate) protein_g: f64,
    /// The product contains non-nutritive sweeteners
    #[arg(long)]
    pub(crate) has_sweeteners: bool,
    /// The product is plain water
    #[arg(long)]
    pub(crate) is_water: bool,
    /// Product category (general, fats or beverage)
    #[arg(long, default_value_t = ProductCategory::Beverage)]
    pub(crate) category: ProductCategory,
    /// Print the per-nutrient point breakdown
    #[arg(long)]
    pub(crate) explain: bool,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    fn request(&self) -> ProductRequest {
        ProductRequest {
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
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BulkArgs {
    /// CSV file whose headers match the product field names
    pub(crate) csv: PathBuf,
    /// Emit JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let product = args.request().into_product()?;
    let engine = NutriscoreEngine::new();
    let result = engine.calculate(&product)?;
    let breakdown = if args.explain {
        Some(engine.explain(&product)?)
    } else {
        None
    };

    if args.json {
        let payload = match &breakdown {
            Some(breakdown) => json!({
                "score": result.score,
                "grade": result.grade,
                "breakdown": breakdown,
            }),
            None => json!(result),
        };
        println!("{}", to_pretty_json(&payload)?);
        return Ok(());
    }

    render_score(&result, breakdown.as_ref());
    Ok(())
}

pub(crate) fn run_bulk(args: BulkArgs) -> Result<(), AppError> {
    let products = BulkProductImporter::from_path(&args.csv)?;
    let results = NutriscoreEngine::new().calculate_bulk(&products);
    let response = BulkScoreResponse::from_results(results);

    if args.json {
        println!("{}", to_pretty_json(&response)?);
    } else {
        render_bulk(&args.csv, &response);
    }

    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

fn render_score(result: &ScoreResult, breakdown: Option<&ScoreBreakdown>) {
    println!("Nutri-Score: {} (score {})", result.grade, result.score);

    let Some(breakdown) = breakdown else {
        return;
    };

    if breakdown.water_exempt {
        println!("\nWater is exempt from point computation");
        return;
    }

    println!("\nUnfavorable points (N = {})", breakdown.n_total());
    for component in &breakdown.unfavorable {
        println!(
            "- {}: {} -> {} pts",
            component.nutrient.label(),
            component.value,
            component.points
        );
    }

    println!("\nFavorable points (P = {})", breakdown.p_total());
    for component in &breakdown.favorable {
        println!(
            "- {}: {} -> {} pts",
            component.nutrient.label(),
            component.value,
            component.points
        );
    }
}

fn render_bulk(source: &std::path::Path, response: &BulkScoreResponse) {
    println!("Nutri-Score bulk results for {}", source.display());
    println!(
        "{} product(s) scored, {} failed\n",
        response.total - response.failed,
        response.failed
    );

    for row in &response.results {
        match (&row.score, &row.grade, &row.error) {
            (Some(score), Some(grade), _) => {
                println!("- row {}: {} (score {})", row.row, grade, score)
            }
            (_, _, Some(error)) => println!("- row {}: error: {}", row.row, error),
            _ => println!("- row {}: no result", row.row),
        }
    }
}
