//! View state container for the interactive session
//!
//! `AppState` is the single owner of everything the screen shows. Input
//! handlers never touch it directly: they turn events into `Action`s and
//! hand them to `AppState::dispatch`, which applies each one to completion.
//!
//! Overlays stack in a fixed order (detail panel, then filter panel or
//! modal, then the row menu, then the go-to-page prompt) and
//! `Action::Dismiss` always closes the top-most one.

use crate::core::data::{Contact, ContactCollection, ContactDraft, Relation};
use crate::core::pagination::PageSize;
use crate::core::query::{ContactQuery, PageView, SortField, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Where typed characters go when no modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Contacts,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Address,
    Relation,
    Tags,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Address,
        FormField::Relation,
        FormField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name *",
            FormField::Phone => "Phone *",
            FormField::Email => "Email",
            FormField::Address => "Address",
            FormField::Relation => "Relation",
            FormField::Tags => "Tags",
        }
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub draft: ContactDraft,
    pub focus: FormField,
}

impl FormState {
    fn new(draft: ContactDraft) -> Self {
        Self {
            draft,
            focus: FormField::Name,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id.is_some()
    }

    /// Text buffer behind a field; the relation select has none
    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Phone => Some(&mut self.draft.phone),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Address => Some(&mut self.draft.address),
            FormField::Tags => Some(&mut self.draft.tags),
            FormField::Relation => None,
        }
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.draft.name.clone(),
            FormField::Phone => self.draft.phone.clone(),
            FormField::Email => self.draft.email.clone(),
            FormField::Address => self.draft.address.clone(),
            FormField::Relation => self
                .draft
                .relation
                .map(|r| r.label().to_string())
                .unwrap_or_else(|| "Select relation".to_string()),
            FormField::Tags => self.draft.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Single(String),
    Bulk,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Form(FormState),
    DeleteConfirm(DeleteTarget),
}

/// Tag filter panel; row 0 is "All Tags"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    pub options: Vec<String>,
    pub cursor: usize,
}

impl FilterPanel {
    pub fn selected_tag(&self) -> Option<String> {
        match self.cursor {
            0 => None,
            n => self.options.get(n - 1).cloned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMenuItem {
    Edit,
    Delete,
}

impl RowMenuItem {
    pub const ALL: [RowMenuItem; 2] = [RowMenuItem::Edit, RowMenuItem::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowMenuItem::Edit => "Edit",
            RowMenuItem::Delete => "Delete",
        }
    }
}

/// Per-contact dropdown menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMenu {
    pub contact_id: String,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FocusSearch,
    BlurSearch,
    SetSearch(String),
    SearchInput(char),
    SearchBackspace,
    SetTagFilter(Option<String>),
    ToggleSort(SortField),
    SetPageSize(PageSize),
    NextPageSize,
    PrevPageSize,
    GoToPage(usize),
    OpenPageJump,
    PageJumpInput(char),
    PageJumpBackspace,
    SubmitPageJump,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CursorUp,
    CursorDown,
    ToggleViewMode,
    ToggleDarkMode,
    OpenDetail(String),
    OpenDetailAtCursor,
    CloseDetail,
    ToggleSelectMode,
    ToggleSelected(String),
    ToggleSelectedAtCursor,
    SelectAllVisible,
    OpenFilterPanel,
    FilterPanelMove(bool),
    ClearFilterPanel,
    CloseFilterPanel,
    OpenRowMenu,
    RowMenuMove(bool),
    ActivateRowMenu,
    OpenAddForm,
    OpenEditForm(String),
    OpenEditAtCursor,
    OpenEditSelected,
    FormFocus(bool),
    FormInput(char),
    FormBackspace,
    FormCycleRelation(bool),
    SubmitForm,
    OpenDeleteConfirm(DeleteTarget),
    OpenDeleteAtCursor,
    ConfirmDelete,
    Dismiss,
    Quit,
}

/// Side effects the session must carry out after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SaveTheme { dark_mode: bool },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub contacts: ContactCollection,
    pub query: ContactQuery,
    pub view_mode: ViewMode,
    pub dark_mode: bool,
    pub focus: Focus,
    /// Index into the current page
    pub cursor: usize,
    pub select_mode: bool,
    pub selected: BTreeSet<String>,
    /// Id of the contact shown in the detail panel
    pub detail: Option<String>,
    pub filter_panel: Option<FilterPanel>,
    pub row_menu: Option<RowMenu>,
    /// Digits typed into the go-to-page prompt
    pub page_jump: Option<String>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(contacts: ContactCollection, query: ContactQuery, view_mode: ViewMode, dark_mode: bool) -> Self {
        Self {
            contacts,
            query,
            view_mode,
            dark_mode,
            focus: Focus::Contacts,
            cursor: 0,
            select_mode: false,
            selected: BTreeSet::new(),
            detail: None,
            filter_panel: None,
            row_menu: None,
            page_jump: None,
            modal: None,
            should_quit: false,
        }
    }

    /// Current page of the filter/sort/paginate pipeline
    pub fn page(&self) -> PageView<'_> {
        self.query.run(&self.contacts.contacts)
    }

    pub fn cursor_contact(&self) -> Option<&Contact> {
        self.page().contacts.get(self.cursor).copied()
    }

    pub fn detail_contact(&self) -> Option<&Contact> {
        self.detail.as_deref().and_then(|id| self.contacts.find_by_id(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    fn visible_ids(&self) -> Vec<String> {
        self.page().contacts.iter().map(|c| c.id.clone()).collect()
    }

    fn cursor_id(&self) -> Option<String> {
        self.cursor_contact().map(|c| c.id.clone())
    }

    pub fn all_visible_selected(&self) -> bool {
        self.visible_ids().iter().all(|id| self.selected.contains(id))
    }

    fn total_pages(&self) -> usize {
        self.page().total_pages
    }

    fn clamp_cursor(&mut self) {
        let len = self.page().contacts.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn reset_page(&mut self) {
        self.query.page = 1;
        self.cursor = 0;
    }

    fn set_page(&mut self, page: usize) {
        if page != self.query.page {
            self.query.page = page;
            self.cursor = 0;
        }
    }

    /// Apply one action to completion
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        tracing::debug!(?action, "dispatch");

        match action {
            Action::FocusSearch => {
                self.row_menu = None;
                self.focus = Focus::Search;
            }
            Action::BlurSearch => self.focus = Focus::Contacts,
            Action::SetSearch(term) => {
                if term != self.query.search {
                    self.query.search = term;
                    self.reset_page();
                }
            }
            Action::SearchInput(c) => {
                self.query.search.push(c);
                self.reset_page();
            }
            Action::SearchBackspace => {
                if self.query.search.pop().is_some() {
                    self.reset_page();
                }
            }
            Action::SetTagFilter(tag) => self.set_tag_filter(tag),
            Action::ToggleSort(field) => {
                if self.query.sort_field == field {
                    self.query.sort_order = self.query.sort_order.toggled();
                } else {
                    self.query.sort_field = field;
                    self.query.sort_order = SortOrder::Asc;
                }
                self.clamp_cursor();
            }
            Action::SetPageSize(size) => {
                self.query.page_size = size;
                self.reset_page();
            }
            Action::NextPageSize => {
                self.query.page_size = self.query.page_size.next_option();
                self.reset_page();
            }
            Action::PrevPageSize => {
                self.query.page_size = self.query.page_size.prev_option();
                self.reset_page();
            }
            Action::GoToPage(page) => {
                if (1..=self.total_pages()).contains(&page) {
                    self.set_page(page);
                }
            }
            Action::OpenPageJump => {
                self.row_menu = None;
                self.page_jump = Some(String::new());
            }
            Action::PageJumpInput(c) => {
                if let Some(input) = self.page_jump.as_mut()
                    && c.is_ascii_digit()
                    && input.len() < 6
                {
                    input.push(c);
                }
            }
            Action::PageJumpBackspace => {
                if let Some(input) = self.page_jump.as_mut() {
                    input.pop();
                }
            }
            Action::SubmitPageJump => {
                if let Some(page) = self.page_jump.take().and_then(|input| input.parse().ok()) {
                    return self.dispatch(Action::GoToPage(page));
                }
            }
            Action::NextPage => {
                if self.query.page < self.total_pages() {
                    self.set_page(self.query.page + 1);
                }
            }
            Action::PrevPage => {
                if self.query.page > 1 {
                    self.set_page(self.query.page - 1);
                }
            }
            Action::FirstPage => self.set_page(1),
            Action::LastPage => {
                let last = self.total_pages().max(1);
                self.set_page(last);
            }
            Action::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorDown => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            Action::ToggleViewMode => self.view_mode = self.view_mode.toggled(),
            Action::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                return Some(Effect::SaveTheme {
                    dark_mode: self.dark_mode,
                });
            }
            Action::OpenDetail(id) => {
                if self.contacts.find_by_id(&id).is_some() {
                    self.detail = Some(id);
                }
            }
            Action::OpenDetailAtCursor => {
                if self.select_mode {
                    return self.dispatch(Action::ToggleSelectedAtCursor);
                }
                self.detail = self.cursor_id();
            }
            Action::CloseDetail => self.detail = None,
            Action::ToggleSelectMode => {
                self.select_mode = !self.select_mode;
                self.selected.clear();
                self.row_menu = None;
            }
            Action::ToggleSelected(id) => self.toggle_selected(id),
            Action::ToggleSelectedAtCursor => {
                if self.select_mode
                    && let Some(id) = self.cursor_id()
                {
                    self.toggle_selected(id);
                }
            }
            Action::SelectAllVisible => {
                if self.select_mode {
                    if self.all_visible_selected() {
                        self.selected.clear();
                    } else {
                        self.selected = self.visible_ids().into_iter().collect();
                    }
                }
            }
            Action::OpenFilterPanel => {
                self.row_menu = None;
                let options = self.contacts.all_tags();
                let cursor = self
                    .query
                    .tag
                    .as_ref()
                    .and_then(|t| options.iter().position(|o| o == t))
                    .map(|p| p + 1)
                    .unwrap_or(0);
                self.filter_panel = Some(FilterPanel { options, cursor });
            }
            Action::FilterPanelMove(down) => {
                // Moving the highlight applies the tag immediately
                let tag = match self.filter_panel.as_mut() {
                    Some(panel) => {
                        let rows = panel.options.len() + 1;
                        panel.cursor = if down {
                            (panel.cursor + 1).min(rows - 1)
                        } else {
                            panel.cursor.saturating_sub(1)
                        };
                        panel.selected_tag()
                    }
                    None => return None,
                };
                self.set_tag_filter(tag);
            }
            Action::ClearFilterPanel => {
                self.set_tag_filter(None);
                self.filter_panel = None;
            }
            Action::CloseFilterPanel => self.filter_panel = None,
            Action::OpenRowMenu => {
                if !self.select_mode
                    && let Some(contact_id) = self.cursor_id()
                {
                    self.row_menu = Some(RowMenu { contact_id, cursor: 0 });
                }
            }
            Action::RowMenuMove(down) => {
                if let Some(menu) = self.row_menu.as_mut() {
                    let last = RowMenuItem::ALL.len() - 1;
                    menu.cursor = if down { (menu.cursor + 1).min(last) } else { menu.cursor.saturating_sub(1) };
                }
            }
            Action::ActivateRowMenu => {
                if let Some(menu) = self.row_menu.take() {
                    let next = match RowMenuItem::ALL.get(menu.cursor) {
                        Some(RowMenuItem::Edit) => Action::OpenEditForm(menu.contact_id),
                        Some(RowMenuItem::Delete) => {
                            Action::OpenDeleteConfirm(DeleteTarget::Single(menu.contact_id))
                        }
                        None => return None,
                    };
                    return self.dispatch(next);
                }
            }
            Action::OpenAddForm => self.open_modal(Modal::Form(FormState::new(ContactDraft::default()))),
            Action::OpenEditForm(id) => {
                if let Some(contact) = self.contacts.find_by_id(&id) {
                    let form = FormState::new(ContactDraft::from_contact(contact));
                    self.open_modal(Modal::Form(form));
                }
            }
            Action::OpenEditAtCursor => {
                if self.select_mode {
                    return self.dispatch(Action::OpenEditSelected);
                }
                if let Some(id) = self.detail.clone().or_else(|| self.cursor_id()) {
                    return self.dispatch(Action::OpenEditForm(id));
                }
            }
            Action::OpenEditSelected => {
                if self.selected.len() == 1
                    && let Some(id) = self.selected.iter().next().cloned()
                {
                    return self.dispatch(Action::OpenEditForm(id));
                }
            }
            Action::FormFocus(forward) => {
                if let Some(Modal::Form(form)) = self.modal.as_mut() {
                    form.focus = form.focus.step(forward);
                }
            }
            Action::FormInput(c) => {
                if let Some(Modal::Form(form)) = self.modal.as_mut()
                    && let Some(text) = form.text_mut()
                {
                    text.push(c);
                }
            }
            Action::FormBackspace => {
                if let Some(Modal::Form(form)) = self.modal.as_mut()
                    && let Some(text) = form.text_mut()
                {
                    text.pop();
                }
            }
            Action::FormCycleRelation(forward) => {
                if let Some(Modal::Form(form)) = self.modal.as_mut()
                    && form.focus == FormField::Relation
                {
                    form.draft.relation = Relation::cycle(form.draft.relation, forward);
                }
            }
            Action::SubmitForm => self.submit_form(),
            Action::OpenDeleteConfirm(target) => {
                let valid = match &target {
                    DeleteTarget::Single(id) => self.contacts.find_by_id(id).is_some(),
                    DeleteTarget::Bulk => !self.selected.is_empty(),
                };
                if valid {
                    self.open_modal(Modal::DeleteConfirm(target));
                }
            }
            Action::OpenDeleteAtCursor => {
                // The detail panel's delete button targets the contact it shows
                let target = if self.select_mode {
                    Some(DeleteTarget::Bulk)
                } else {
                    self.detail.clone().or_else(|| self.cursor_id()).map(DeleteTarget::Single)
                };
                if let Some(target) = target {
                    return self.dispatch(Action::OpenDeleteConfirm(target));
                }
            }
            Action::ConfirmDelete => self.confirm_delete(),
            Action::Dismiss => self.dismiss(),
            Action::Quit => self.should_quit = true,
        }

        None
    }

    fn set_tag_filter(&mut self, tag: Option<String>) {
        let tag = tag.filter(|t| !t.is_empty());
        if tag != self.query.tag {
            self.query.tag = tag;
            self.reset_page();
        }
    }

    fn toggle_selected(&mut self, id: String) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    fn open_modal(&mut self, modal: Modal) {
        self.row_menu = None;
        self.focus = Focus::Contacts;
        self.modal = Some(modal);
    }

    /// No-op while the draft is missing a required field
    fn submit_form(&mut self) {
        let Some(Modal::Form(form)) = self.modal.as_ref() else {
            return;
        };
        let is_edit = form.is_edit();
        let contact = match form.draft.clone().into_contact() {
            Ok(contact) => contact,
            Err(err) => {
                tracing::debug!(%err, "form submit ignored");
                return;
            }
        };

        if is_edit {
            if self.contacts.update(contact.clone()) {
                tracing::info!(id = %contact.id, name = %contact.name, "contact updated");
            }
        } else {
            tracing::info!(id = %contact.id, name = %contact.name, "contact added");
            self.contacts.add(contact);
        }
        self.modal = None;
        self.clamp_cursor();
    }

    fn confirm_delete(&mut self) {
        let Some(Modal::DeleteConfirm(target)) = self.modal.take() else {
            return;
        };

        match target {
            DeleteTarget::Single(id) => {
                if let Some(removed) = self.contacts.delete(&id) {
                    tracing::info!(id = %removed.id, name = %removed.name, "contact deleted");
                }
                self.selected.remove(&id);
                if self.detail.as_deref() == Some(id.as_str()) {
                    self.detail = None;
                }
            }
            DeleteTarget::Bulk => {
                let removed = self.contacts.delete_many(&self.selected);
                tracing::info!(count = removed, "contacts deleted");
                if self.detail.as_ref().is_some_and(|id| self.selected.contains(id)) {
                    self.detail = None;
                }
                self.selected.clear();
            }
        }
        self.clamp_cursor();
    }

    /// Close the top-most overlay
    fn dismiss(&mut self) {
        if self.page_jump.take().is_some() {
            return;
        }
        if self.row_menu.take().is_some() {
            return;
        }
        if self.modal.take().is_some() {
            return;
        }
        if self.filter_panel.take().is_some() {
            return;
        }
        if self.focus == Focus::Search {
            self.focus = Focus::Contacts;
            return;
        }
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, tags: &[&str]) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            phone: format!("555-{}", id),
            email: format!("{}@example.com", name.to_lowercase()),
            address: String::new(),
            relation: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn state_with(count: usize) -> AppState {
        let contacts = (0..count)
            .map(|i| {
                let tags: &[&str] = if i % 2 == 0 { &["Family"] } else { &["Job"] };
                contact(&format!("c{:02}", i), &format!("Person {:02}", i), tags)
            })
            .collect();
        AppState::new(
            ContactCollection::new(contacts),
            ContactQuery::default(),
            ViewMode::Grid,
            false,
        )
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.dispatch(Action::FormInput(c));
        }
    }

    #[test]
    fn search_and_tag_changes_reset_to_first_page() {
        let mut state = state_with(35);
        state.dispatch(Action::NextPage);
        state.dispatch(Action::NextPage);
        assert_eq!(state.query.page, 3);

        state.dispatch(Action::SearchInput('p'));
        assert_eq!(state.query.page, 1);

        state.dispatch(Action::LastPage);
        assert_eq!(state.query.page, 4);
        state.dispatch(Action::SetTagFilter(Some("Job".to_string())));
        assert_eq!(state.query.page, 1);
        assert_eq!(state.page().total_matches, 17);
    }

    #[test]
    fn page_navigation_stays_in_range() {
        let mut state = state_with(25);
        state.dispatch(Action::PrevPage);
        assert_eq!(state.query.page, 1);
        state.dispatch(Action::GoToPage(3));
        assert_eq!(state.query.page, 3);
        state.dispatch(Action::NextPage);
        assert_eq!(state.query.page, 3);
        state.dispatch(Action::GoToPage(9));
        assert_eq!(state.query.page, 3);
        assert_eq!(state.page().contacts.len(), 5);
    }

    #[test]
    fn page_jump_goes_to_a_typed_page() {
        let mut state = state_with(45);
        state.dispatch(Action::OpenPageJump);
        state.dispatch(Action::PageJumpInput('4'));
        state.dispatch(Action::PageJumpInput('x'));
        assert_eq!(state.page_jump.as_deref(), Some("4"));
        state.dispatch(Action::SubmitPageJump);
        assert_eq!(state.query.page, 4);
        assert!(state.page_jump.is_none());

        state.dispatch(Action::OpenPageJump);
        state.dispatch(Action::PageJumpInput('9'));
        state.dispatch(Action::SubmitPageJump);
        assert_eq!(state.query.page, 4);

        state.dispatch(Action::OpenPageJump);
        state.dispatch(Action::PageJumpInput('2'));
        state.dispatch(Action::PageJumpBackspace);
        state.dispatch(Action::PageJumpInput('1'));
        state.dispatch(Action::Dismiss);
        assert!(state.page_jump.is_none());
        assert_eq!(state.query.page, 4);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut state = state_with(30);
        state.dispatch(Action::LastPage);
        state.dispatch(Action::NextPageSize);
        assert_eq!(state.query.page_size.get(), 25);
        assert_eq!(state.query.page, 1);

        state.dispatch(Action::NextPage);
        state.dispatch(Action::SetPageSize(PageSize::from_option(50).unwrap()));
        assert_eq!(state.query.page, 1);
        assert_eq!(state.page().total_pages, 1);
    }

    #[test]
    fn replacing_the_search_term_only_resets_on_change() {
        let mut state = state_with(30);
        state.dispatch(Action::SetSearch("person 1".to_string()));
        assert_eq!(state.page().total_matches, 10);

        state.dispatch(Action::NextPage);
        assert_eq!(state.query.page, 1);
        state.dispatch(Action::SetSearch(String::new()));
        state.dispatch(Action::GoToPage(2));
        state.dispatch(Action::SetSearch(String::new()));
        assert_eq!(state.query.page, 2);
    }

    #[test]
    fn detail_panel_opens_only_for_known_contacts() {
        let mut state = state_with(3);
        state.dispatch(Action::OpenDetail("missing".to_string()));
        assert!(state.detail.is_none());

        state.dispatch(Action::OpenDetail("c01".to_string()));
        assert_eq!(state.detail_contact().map(|c| c.name.as_str()), Some("Person 01"));
        state.dispatch(Action::CloseDetail);
        assert!(state.detail.is_none());
    }

    #[test]
    fn toggling_the_same_sort_field_flips_direction() {
        let mut state = state_with(3);
        state.dispatch(Action::ToggleSort(SortField::Name));
        assert_eq!(state.query.sort_order, SortOrder::Desc);
        assert_eq!(state.page().contacts[0].name, "Person 02");

        state.dispatch(Action::ToggleSort(SortField::Email));
        assert_eq!(state.query.sort_field, SortField::Email);
        assert_eq!(state.query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn select_mode_toggle_clears_selection() {
        let mut state = state_with(5);
        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::ToggleSelectedAtCursor);
        assert_eq!(state.selected.len(), 1);

        state.dispatch(Action::ToggleSelectMode);
        assert!(!state.select_mode);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn select_all_toggles_the_visible_page() {
        let mut state = state_with(15);
        state.dispatch(Action::SelectAllVisible);
        assert!(state.selected.is_empty(), "ignored outside select mode");

        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::SelectAllVisible);
        assert_eq!(state.selected.len(), 10);

        state.dispatch(Action::SelectAllVisible);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn deleting_a_selected_contact_drops_it_from_the_selection() {
        let mut state = state_with(4);
        state.dispatch(Action::ToggleSelected("c01".to_string()));
        state.dispatch(Action::ToggleSelected("c02".to_string()));

        state.dispatch(Action::OpenDeleteConfirm(DeleteTarget::Single("c01".to_string())));
        state.dispatch(Action::ConfirmDelete);

        assert!(state.contacts.find_by_id("c01").is_none());
        assert!(!state.is_selected("c01"));
        assert!(state.is_selected("c02"));
        assert!(state.modal.is_none());
    }

    #[test]
    fn bulk_delete_clears_selection_and_detail() {
        let mut state = state_with(6);
        state.dispatch(Action::OpenDetail("c03".to_string()));
        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::ToggleSelected("c03".to_string()));
        state.dispatch(Action::ToggleSelected("c04".to_string()));

        state.dispatch(Action::OpenDeleteAtCursor);
        assert_eq!(state.modal, Some(Modal::DeleteConfirm(DeleteTarget::Bulk)));
        state.dispatch(Action::ConfirmDelete);

        assert_eq!(state.contacts.len(), 4);
        assert!(state.selected.is_empty());
        assert!(state.detail.is_none());
    }

    #[test]
    fn delete_from_the_detail_panel_targets_the_shown_contact() {
        let mut state = state_with(3);
        state.dispatch(Action::OpenDetail("c02".to_string()));
        state.dispatch(Action::OpenDeleteAtCursor);
        assert_eq!(
            state.modal,
            Some(Modal::DeleteConfirm(DeleteTarget::Single("c02".to_string())))
        );
        state.dispatch(Action::ConfirmDelete);
        assert!(state.detail.is_none());
        assert_eq!(state.contacts.len(), 2);
    }

    #[test]
    fn bulk_delete_needs_a_selection() {
        let mut state = state_with(3);
        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::OpenDeleteAtCursor);
        assert!(state.modal.is_none());
    }

    #[test]
    fn add_form_is_a_no_op_without_name_and_phone() {
        let mut state = state_with(2);
        state.dispatch(Action::OpenAddForm);
        type_text(&mut state, "Zed");
        state.dispatch(Action::SubmitForm);
        assert!(state.modal.is_some());
        assert_eq!(state.contacts.len(), 2);

        state.dispatch(Action::FormFocus(true));
        type_text(&mut state, "555-9999");
        state.dispatch(Action::SubmitForm);
        assert!(state.modal.is_none());
        assert_eq!(state.contacts.len(), 3);
        assert_eq!(state.contacts.contacts[2].name, "Zed");
    }

    #[test]
    fn editing_refreshes_the_open_detail_panel() {
        let mut state = state_with(3);
        state.dispatch(Action::OpenDetail("c01".to_string()));
        state.dispatch(Action::OpenEditForm("c01".to_string()));

        // Name field has focus; clear it and retype
        for _ in 0.."Person 01".len() {
            state.dispatch(Action::FormBackspace);
        }
        type_text(&mut state, "Renamed");
        state.dispatch(Action::FormFocus(true));
        state.dispatch(Action::FormFocus(true));
        state.dispatch(Action::FormFocus(true));
        state.dispatch(Action::FormFocus(true));
        assert!(matches!(&state.modal, Some(Modal::Form(f)) if f.focus == FormField::Relation));
        state.dispatch(Action::FormCycleRelation(true));
        state.dispatch(Action::SubmitForm);

        let shown = state.detail_contact().unwrap();
        assert_eq!(shown.name, "Renamed");
        assert_eq!(shown.relation, Some(Relation::Family));
        assert_eq!(state.contacts.len(), 3);
    }

    #[test]
    fn edit_from_selection_requires_exactly_one() {
        let mut state = state_with(3);
        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::ToggleSelected("c00".to_string()));
        state.dispatch(Action::ToggleSelected("c01".to_string()));
        state.dispatch(Action::OpenEditAtCursor);
        assert!(state.modal.is_none());

        state.dispatch(Action::ToggleSelected("c01".to_string()));
        state.dispatch(Action::OpenEditAtCursor);
        assert!(matches!(&state.modal, Some(Modal::Form(f)) if f.draft.id.as_deref() == Some("c00")));
    }

    #[test]
    fn filter_panel_applies_on_move_and_clears() {
        let mut state = state_with(4);
        state.dispatch(Action::OpenFilterPanel);
        assert_eq!(state.filter_panel.as_ref().unwrap().options, vec!["Family", "Job"]);

        state.dispatch(Action::FilterPanelMove(true));
        assert_eq!(state.query.tag.as_deref(), Some("Family"));
        state.dispatch(Action::Dismiss);
        assert!(state.filter_panel.is_none());
        assert_eq!(state.query.tag.as_deref(), Some("Family"));

        state.dispatch(Action::OpenFilterPanel);
        assert_eq!(state.filter_panel.as_ref().unwrap().cursor, 1);
        state.dispatch(Action::ClearFilterPanel);
        assert!(state.query.tag.is_none());
        assert!(state.filter_panel.is_none());
    }

    #[test]
    fn row_menu_opens_edit_and_delete() {
        let mut state = state_with(3);
        state.dispatch(Action::CursorDown);
        state.dispatch(Action::OpenRowMenu);
        assert_eq!(state.row_menu.as_ref().unwrap().contact_id, "c01");

        state.dispatch(Action::RowMenuMove(true));
        state.dispatch(Action::ActivateRowMenu);
        assert!(state.row_menu.is_none());
        assert_eq!(
            state.modal,
            Some(Modal::DeleteConfirm(DeleteTarget::Single("c01".to_string())))
        );
    }

    #[test]
    fn dismiss_closes_the_top_most_overlay_first() {
        let mut state = state_with(3);
        state.dispatch(Action::OpenDetailAtCursor);
        state.dispatch(Action::OpenRowMenu);
        assert!(state.detail.is_some() && state.row_menu.is_some());

        state.dispatch(Action::Dismiss);
        assert!(state.row_menu.is_none());
        assert!(state.detail.is_some());

        state.dispatch(Action::OpenAddForm);
        state.dispatch(Action::Dismiss);
        assert!(state.modal.is_none());
        assert!(state.detail.is_some());

        state.dispatch(Action::Dismiss);
        assert!(state.detail.is_none());
    }

    #[test]
    fn opening_a_modal_closes_the_row_menu() {
        let mut state = state_with(2);
        state.dispatch(Action::OpenRowMenu);
        state.dispatch(Action::OpenAddForm);
        assert!(state.row_menu.is_none());
        assert!(state.modal.is_some());
    }

    #[test]
    fn dark_mode_toggle_requests_a_save() {
        let mut state = state_with(1);
        assert_eq!(
            state.dispatch(Action::ToggleDarkMode),
            Some(Effect::SaveTheme { dark_mode: true })
        );
        assert_eq!(state.dispatch(Action::ToggleViewMode), None);
        assert_eq!(state.view_mode, ViewMode::List);
    }

    #[test]
    fn cursor_stays_on_the_page() {
        let mut state = state_with(3);
        for _ in 0..10 {
            state.dispatch(Action::CursorDown);
        }
        assert_eq!(state.cursor, 2);
        state.dispatch(Action::OpenDeleteAtCursor);
        state.dispatch(Action::ConfirmDelete);
        assert_eq!(state.cursor, 1);
    }
}
