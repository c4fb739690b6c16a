//! Core data structures for contact management
//!
//! This module contains the contact record, the editable draft used by the
//! create/edit forms, and the in-memory collection every view reads from.

use crate::utils::error::{AppError, AppResult};
use crate::utils::format;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use uuid::Uuid;

/// How a contact relates to the owner of the address book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Family,
    Friend,
    Colleague,
    Business,
    Other,
}

impl Relation {
    pub const ALL: [Relation; 5] = [
        Relation::Family,
        Relation::Friend,
        Relation::Colleague,
        Relation::Business,
        Relation::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Relation::Family => "Family",
            Relation::Friend => "Friend",
            Relation::Colleague => "Colleague",
            Relation::Business => "Business",
            Relation::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Step through `None -> Family -> ... -> Other -> None`, as a select box does.
    pub fn cycle(current: Option<Relation>, forward: bool) -> Option<Relation> {
        let position = current.and_then(|r| Self::ALL.iter().position(|x| *x == r));
        let slots = Self::ALL.len() + 1;
        let index = position.map(|p| p + 1).unwrap_or(0);
        let next = if forward {
            (index + 1) % slots
        } else {
            (index + slots - 1) % slots
        };
        if next == 0 { None } else { Some(Self::ALL[next - 1]) }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single contact record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(
        default,
        serialize_with = "format::serialize_relation",
        deserialize_with = "format::deserialize_relation"
    )]
    pub relation: Option<Relation>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Contact {
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn relation_label(&self) -> &str {
        self.relation.as_ref().map(Relation::label).unwrap_or("")
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.phone)
    }
}

pub fn generate_id() -> String {
    format!("contact-{}", Uuid::new_v4().simple())
}

/// Editable form state for the create/edit modals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    /// Set when editing; `None` for a new contact
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub relation: Option<Relation>,
    /// Comma separated, as typed
    pub tags: String,
}

impl ContactDraft {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id.clone()),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
            relation: contact.relation,
            tags: format::format_tags_comma(&contact.tags),
        }
    }

    /// Name and phone are the only required fields
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "Name".to_string(),
            });
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::Validation {
                field: "Phone".to_string(),
            });
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Build the contact this draft describes, keeping the id when editing
    pub fn into_contact(self) -> AppResult<Contact> {
        self.validate()?;
        Ok(Contact {
            id: self.id.unwrap_or_else(generate_id),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            relation: self.relation,
            tags: format::parse_tags(&self.tags),
        })
    }
}

/// The in-memory contact collection
///
/// Mutations never patch the vector in place: each one builds the next
/// sequence and swaps it in whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactCollection {
    pub contacts: Vec<Contact>,
}

impl ContactCollection {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Build a collection from dataset records, assigning `contact-<index>`
    /// ids where missing and rejecting duplicates.
    pub fn from_records(records: Vec<Contact>) -> AppResult<Self> {
        let mut seen = BTreeSet::new();
        let mut contacts = Vec::with_capacity(records.len());

        for (index, mut contact) in records.into_iter().enumerate() {
            if contact.id.trim().is_empty() {
                contact.id = format!("contact-{}", index);
            }
            if !seen.insert(contact.id.clone()) {
                return Err(AppError::Data(format!("Duplicate contact id '{}'", contact.id)));
            }
            contacts.push(contact);
        }

        Ok(Self { contacts })
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Find by id, then exact name (case-insensitive), then a unique name substring
    pub fn find(&self, identifier: &str) -> Option<&Contact> {
        if let Some(contact) = self.find_by_id(identifier) {
            return Some(contact);
        }

        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(contact) = self
            .contacts
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
        {
            return Some(contact);
        }

        let mut partial = self
            .contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle));
        match (partial.next(), partial.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Append a contact
    pub fn add(&mut self, contact: Contact) {
        let mut next = self.contacts.clone();
        next.push(contact);
        self.contacts = next;
    }

    /// Replace the contact with the same id; returns false if none matched
    pub fn update(&mut self, contact: Contact) -> bool {
        if self.find_by_id(&contact.id).is_none() {
            return false;
        }
        self.contacts = self
            .contacts
            .iter()
            .map(|c| if c.id == contact.id { contact.clone() } else { c.clone() })
            .collect();
        true
    }

    /// Remove a contact by id
    pub fn delete(&mut self, id: &str) -> Option<Contact> {
        let removed = self.find_by_id(id).cloned()?;
        self.contacts = self.contacts.iter().filter(|c| c.id != id).cloned().collect();
        Some(removed)
    }

    /// Remove every contact whose id is in `ids`; returns how many went
    pub fn delete_many(&mut self, ids: &BTreeSet<String>) -> usize {
        let before = self.contacts.len();
        self.contacts = self
            .contacts
            .iter()
            .filter(|c| !ids.contains(&c.id))
            .cloned()
            .collect();
        before - self.contacts.len()
    }

    /// Every distinct tag, in first-seen order
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.contacts
            .iter()
            .flat_map(|c| c.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect()
    }

    /// Usage count per tag, sorted by count descending then name
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tag in self.contacts.iter().flat_map(|c| c.tags.iter()) {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }

        let mut sorted: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted
    }
}
