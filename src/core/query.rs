//! Filter, sort and paginate pipeline
//!
//! `ContactQuery` holds every input of the pipeline except the collection
//! itself. Running it yields a `PageView`: the contacts on the requested
//! page together with the totals the header and pagination bar need.

use crate::core::data::Contact;
use crate::core::pagination::{self, PageSize};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Email,
    Tags,
    Address,
    Relation,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Email,
        SortField::Tags,
        SortField::Address,
        SortField::Relation,
    ];

    /// Parse a field name; anything unrecognised sorts by name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "name" => SortField::Name,
            "email" => SortField::Email,
            "tags" | "tag" => SortField::Tags,
            "address" => SortField::Address,
            "relation" => SortField::Relation,
            other => {
                tracing::warn!(field = other, "unknown sort field, sorting by name");
                SortField::Name
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Tags => "tags",
            SortField::Address => "address",
            SortField::Relation => "relation",
        }
    }

    /// Column heading used by the table view
    pub fn heading(&self) -> &'static str {
        match self {
            SortField::Name => "CONTACT NAME",
            SortField::Email => "CONTACT",
            SortField::Tags => "TAGS",
            SortField::Address => "ADDRESS",
            SortField::Relation => "RELATION",
        }
    }

    /// Lowercased value this field sorts on
    pub fn key(&self, contact: &Contact) -> String {
        match self {
            SortField::Name => contact.name.to_lowercase(),
            SortField::Email => contact.email.to_lowercase(),
            SortField::Tags => contact.first_tag().unwrap_or("").to_lowercase(),
            SortField::Address => contact.address.to_lowercase(),
            SortField::Relation => contact.relation_label().to_lowercase(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

/// Every pipeline input except the collection
#[derive(Debug, Clone, PartialEq)]
pub struct ContactQuery {
    pub search: String,
    pub tag: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            tag: None,
            sort_field: SortField::Name,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

/// One page of pipeline output
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub contacts: Vec<&'a Contact>,
    pub total_matches: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl PageView<'_> {
    /// The requested page lies past the end of a non-empty result
    pub fn is_past_end(&self) -> bool {
        self.contacts.is_empty() && self.total_matches > 0
    }
}

/// Search predicate: name or email case-insensitively, phone as typed
pub fn matches_search(contact: &Contact, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    contact.name.to_lowercase().contains(&needle)
        || contact.phone.contains(term)
        || contact.email.to_lowercase().contains(&needle)
}

/// Tag predicate: exact membership, or everything when unset
pub fn matches_tag(contact: &Contact, tag: Option<&str>) -> bool {
    match tag {
        None => true,
        Some(t) => contact.has_tag(t),
    }
}

/// Filter then stably sort; ties keep collection order in both directions
pub fn filter_and_sort<'a>(contacts: &'a [Contact], query: &ContactQuery) -> Vec<&'a Contact> {
    let tag = query.tag.as_deref().filter(|t| !t.is_empty());

    let mut keyed: Vec<(String, &Contact)> = contacts
        .iter()
        .filter(|c| matches_search(c, &query.search) && matches_tag(c, tag))
        .map(|c| (query.sort_field.key(c), c))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, query.sort_order));
    keyed.into_iter().map(|(_, c)| c).collect()
}

fn compare_keys(a: &str, b: &str, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => a.cmp(b),
        SortOrder::Desc => b.cmp(a),
    }
}

impl ContactQuery {
    /// Run the whole pipeline over `contacts`
    pub fn run<'a>(&self, contacts: &'a [Contact]) -> PageView<'a> {
        let matched = filter_and_sort(contacts, self);
        let total_matches = matched.len();
        let total_pages = pagination::total_pages(total_matches, self.page_size);
        let contacts = pagination::page_slice(&matched, self.page, self.page_size).to_vec();

        PageView {
            contacts,
            total_matches,
            total_pages,
            page: self.page,
        }
    }
}
