//! Conversion of external product listings (JSON bodies, CSV files) into validated
//! [`Product`](crate::nutriscore::Product) records.

pub mod bulk;
pub mod request;

pub use bulk::{BulkImportError, BulkProductImporter};
pub use request::{InputError, ProductRequest};
