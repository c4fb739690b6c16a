//! Trait seams between the contact pipeline and the outside world

use crate::cli::ListFormat;
use crate::core::data::{Contact, ContactCollection};
use crate::core::query::PageView;
use crate::utils::error::AppResult;

/// Somewhere a contact collection can be loaded from
///
/// The address book is never written back, so there is no save half.
pub trait ContactSource {
    fn load(&self) -> AppResult<ContactCollection>;

    /// Human readable origin, used in logs and `config show`
    fn describe(&self) -> String;
}

/// Display formatting for the one-shot commands
pub trait ContactDisplay {
    /// Print one page of query output in the requested format
    fn format_page(&self, page: &PageView<'_>, format: &ListFormat) -> AppResult<()>;

    /// Print the full record for a single contact
    fn print_contact(&self, contact: &Contact) -> AppResult<()>;

    /// Print tag usage counts
    fn print_tags(&self, tags: &[(String, usize)]) -> AppResult<()>;
}
