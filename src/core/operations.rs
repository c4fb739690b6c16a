//! Core operations implementation
//!
//! `ContactOperations` ties configuration to the dataset and the display
//! layer, and is what the command handlers talk to.

use crate::cli::ListFormat;
use crate::config::Config;
use crate::core::{
    data::{Contact, ContactCollection},
    query::{ContactQuery, PageView},
    seed::{BundledDataset, JsonFileDataset},
    traits::{ContactDisplay, ContactSource},
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::DisplayFormatter;
use std::path::PathBuf;

pub struct ContactOperations {
    config: Config,
    data_override: Option<PathBuf>,
}

impl ContactOperations {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            data_override: None,
        }
    }

    /// Use `path` instead of the configured dataset
    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        self.data_override = path;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `--data` wins over `general.data_file`, which wins over the bundled set
    pub fn source(&self) -> Box<dyn ContactSource> {
        match self.data_override.as_ref().or(self.config.general.data_file.as_ref()) {
            Some(path) => Box::new(JsonFileDataset::new(path.clone())),
            None => Box::new(BundledDataset),
        }
    }

    pub fn load_collection(&self) -> AppResult<ContactCollection> {
        self.source().load()
    }

    /// Query seeded from the configured sort and page size
    pub fn default_query(&self) -> ContactQuery {
        ContactQuery {
            sort_field: self.config.general.sort_by,
            sort_order: self.config.general.sort_order,
            page_size: self.config.general.page_size,
            ..Default::default()
        }
    }

    pub fn find_contact(&self, identifier: &str) -> AppResult<Contact> {
        let collection = self.load_collection()?;
        collection
            .find(identifier)
            .cloned()
            .ok_or_else(|| AppError::NotFound {
                item_type: "Contact".to_string(),
                search_term: identifier.to_string(),
            })
    }

    pub fn tag_counts(&self) -> AppResult<Vec<(String, usize)>> {
        Ok(self.load_collection()?.tag_counts())
    }
}

impl ContactDisplay for ContactOperations {
    fn format_page(&self, page: &PageView<'_>, format: &ListFormat) -> AppResult<()> {
        DisplayFormatter::format_page(page, format, &self.config)
    }

    fn print_contact(&self, contact: &Contact) -> AppResult<()> {
        DisplayFormatter::print_contact(contact, &self.config)
    }

    fn print_tags(&self, tags: &[(String, usize)]) -> AppResult<()> {
        DisplayFormatter::print_tags(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{SortField, SortOrder};

    #[test]
    fn default_query_follows_config() {
        let mut config = Config::default();
        config.general.sort_by = SortField::Address;
        config.general.sort_order = SortOrder::Desc;
        let ops = ContactOperations::new(config);

        let query = ops.default_query();
        assert_eq!(query.sort_field, SortField::Address);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn data_override_beats_config() {
        let mut config = Config::default();
        config.general.data_file = Some(PathBuf::from("/from/config.json"));
        let ops = ContactOperations::new(config).with_data_file(Some(PathBuf::from("/from/flag.json")));
        assert_eq!(ops.source().describe(), "/from/flag.json");

        let ops = ContactOperations::new(Config::default());
        assert_eq!(ops.source().describe(), "bundled dataset");
    }

    #[test]
    fn find_reports_not_found() {
        let ops = ContactOperations::new(Config::default());
        assert!(ops.find_contact("contact-0").is_ok());
        assert!(matches!(
            ops.find_contact("no such person at all"),
            Err(AppError::NotFound { .. })
        ));
    }
}
