//! Dataset loading
//!
//! The bundled address book is compiled into the binary. A JSON file with
//! the same shape can replace it through `--data` or `general.data_file`.

use crate::core::data::{Contact, ContactCollection};
use crate::core::traits::ContactSource;
use crate::utils::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::PathBuf;

const BUNDLED: &str = include_str!("../../data/contacts.json");

/// Either `{ "contacts": [...] }` or a bare array of records
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { contacts: Vec<Contact> },
    Bare(Vec<Contact>),
}

/// Parse dataset JSON into a collection with ids assigned
pub fn parse_dataset(content: &str) -> AppResult<ContactCollection> {
    let records = match serde_json::from_str::<DatasetFile>(content) {
        Ok(DatasetFile::Wrapped { contacts }) | Ok(DatasetFile::Bare(contacts)) => contacts,
        Err(e) => return Err(AppError::Data(format!("Failed to parse dataset: {}", e))),
    };
    ContactCollection::from_records(records)
}

/// The address book shipped with the binary
pub struct BundledDataset;

impl ContactSource for BundledDataset {
    fn load(&self) -> AppResult<ContactCollection> {
        let collection = parse_dataset(BUNDLED)?;
        tracing::info!(count = collection.len(), "loaded bundled dataset");
        Ok(collection)
    }

    fn describe(&self) -> String {
        "bundled dataset".to_string()
    }
}

/// A dataset read from disk
pub struct JsonFileDataset {
    pub path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContactSource for JsonFileDataset {
    fn load(&self) -> AppResult<ContactCollection> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::Io(format!("Failed to read data file {}: {}", self.path.display(), e))
        })?;
        let collection = parse_dataset(&content)?;
        tracing::info!(
            count = collection.len(),
            path = %self.path.display(),
            "loaded dataset"
        );
        Ok(collection)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
