use super::request::{InputError, ProductRequest};
use crate::nutriscore::{Product, ProductCategory};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

const CSV_MIME: &str = "text/csv";
const OPAQUE_MIME: &str = "application/octet-stream";
const REQUIRED_COLUMNS: [&str; 2] = ["energy_kj", "sugar_g"];

#[derive(Debug, thiserror::Error)]
pub enum BulkImportError {
    #[error("unsupported file '{file_name}': expected a CSV upload")]
    UnrecognizedFileFormat { file_name: String },
    #[error("CSV header is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: InputError,
    },
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read product file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid upload: {reason}")]
    Upload { reason: String },
    #[error("upload exceeds the size limit: {reason}")]
    UploadTooLarge { reason: String },
}

/// Turns tabular product listings into validated [`Product`] records.
///
/// Column headers match the product field names; extra columns (such as a product name)
/// are ignored. Any malformed row rejects the whole listing.
pub struct BulkProductImporter;

impl BulkProductImporter {
    /// Accepts an upload declared as CSV. A generic or missing content type falls back to
    /// the file extension; any other declared type is rejected.
    pub fn ensure_tabular(
        file_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<(), BulkImportError> {
        let declared = content_type
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|essence| !essence.is_empty());

        let tabular = match declared {
            Some(essence) if essence.eq_ignore_ascii_case(CSV_MIME) => true,
            Some(essence) if !essence.eq_ignore_ascii_case(OPAQUE_MIME) => false,
            _ => file_name
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(|guessed| guessed == CSV_MIME)
                .unwrap_or(false),
        };

        if tabular {
            Ok(())
        } else {
            Err(BulkImportError::UnrecognizedFileFormat {
                file_name: file_name.unwrap_or("<unnamed>").to_string(),
            })
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, BulkImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Product>, BulkImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        let columns: Vec<&'static str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|required| !headers.iter().any(|header| header == *required))
            .collect();
        if !columns.is_empty() {
            return Err(BulkImportError::MissingColumns { columns });
        }

        let mut products = Vec::new();
        for (index, record) in csv_reader.deserialize::<ProductRow>().enumerate() {
            let row = index + 1;
            let product = record?
                .into_request()
                .and_then(ProductRequest::into_product)
                .map_err(|source| BulkImportError::InvalidRow { row, source })?;
            products.push(product);
        }

        Ok(products)
    }
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(default, deserialize_with = "optional_number")]
    energy_kj: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    sugar_g: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    sat_fat_g: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    salt_g: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    fruit_veg_pct: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    fibre_g: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    protein_g: Option<f64>,
    #[serde(default, deserialize_with = "optional_flag")]
    has_sweeteners: Option<bool>,
    #[serde(default, deserialize_with = "optional_flag")]
    is_water: Option<bool>,
    #[serde(default, deserialize_with = "optional_category")]
    category: Option<ProductCategory>,
}

impl ProductRow {
    fn into_request(self) -> Result<ProductRequest, InputError> {
        Ok(ProductRequest {
            energy_kj: self
                .energy_kj
                .ok_or(InputError::Missing { field: "energy_kj" })?,
            sugar_g: self.sugar_g.ok_or(InputError::Missing { field: "sugar_g" })?,
            sat_fat_g: self.sat_fat_g.unwrap_or_default(),
            salt_g: self.salt_g.unwrap_or_default(),
            fruit_veg_pct: self.fruit_veg_pct.unwrap_or_default(),
            fibre_g: self.fibre_g.unwrap_or_default(),
            protein_g: self.protein_g.unwrap_or_default(),
            has_sweeteners: self.has_sweeteners.unwrap_or_default(),
            is_water: self.is_water.unwrap_or_default(),
            category: self.category.unwrap_or(ProductCategory::General),
        })
    }
}

fn non_empty_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    non_empty_cell(deserializer)?
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not a number")))
        })
        .transpose()
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    non_empty_cell(deserializer)?
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "'{raw}' is not a boolean (expected true/false or 1/0)"
            ))),
        })
        .transpose()
}

fn optional_category<'de, D>(deserializer: D) -> Result<Option<ProductCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    non_empty_cell(deserializer)?
        .map(|raw| raw.parse::<ProductCategory>().map_err(serde::de::Error::custom))
        .transpose()
}
