//! CSV ingestion feeding the bulk engine, as the HTTP and CLI collaborators use it.

use nutri::ingest::{BulkImportError, BulkProductImporter};
use nutri::nutriscore::{NutriscoreEngine, NutriscoreError, NutriscoreGrade, ProductCategory};
use std::io::Cursor;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/beverages.csv")
}

#[test]
fn reference_beverages_score_in_row_order() {
    let products = BulkProductImporter::from_path(fixture()).expect("fixture parses");
    assert_eq!(products.len(), 6);

    let results = NutriscoreEngine::new().calculate_bulk(&products);
    let scored: Vec<(i32, NutriscoreGrade)> = results
        .into_iter()
        .map(|result| {
            let result = result.expect("beverages are supported");
            (result.score, result.grade)
        })
        .collect();

    assert_eq!(
        scored,
        vec![
            (0, NutriscoreGrade::A),
            (4, NutriscoreGrade::C),
            (4, NutriscoreGrade::C),
            (16, NutriscoreGrade::E),
            (12, NutriscoreGrade::E),
            (5, NutriscoreGrade::C),
        ]
    );
}

#[test]
fn unsupported_rows_fail_individually() {
    let csv = "energy_kj,sugar_g,category\n\
               180,10.6,beverage\n\
               900,20,general\n\
               20,1,beverage\n";
    let products = BulkProductImporter::from_reader(Cursor::new(csv)).expect("parses");

    let results = NutriscoreEngine::new().calculate_bulk(&products);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1],
        Err(NutriscoreError::UnsupportedCategory(ProductCategory::General))
    );
    assert_eq!(
        results[2].as_ref().map(|result| result.score),
        Ok(1)
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let missing = fixture().with_file_name("does-not-exist.csv");
    assert!(matches!(
        BulkProductImporter::from_path(missing),
        Err(BulkImportError::Io(_))
    ));
}

#[test]
fn header_only_file_yields_no_products() {
    let csv = "energy_kj,sugar_g\n";
    let products = BulkProductImporter::from_reader(Cursor::new(csv)).expect("parses");
    assert!(products.is_empty());
}
