//! Compose a full frame from the view state
//!
//! Layout, top to bottom: title bar, search/filter line, summary, bulk bar,
//! body, pagination bar, key hints. The body shows the open overlay when
//! there is one (modal, then filter panel, then detail panel) and the
//! contact table or grid otherwise.

use crate::core::state::{AppState, DeleteTarget, FilterPanel, Focus, FormField, FormState, Modal, RowMenuItem, ViewMode};
use crate::ui::views::{self, CARD_HEIGHT, RowMarks, TABLE_HEADER_LINES, TABLE_ROW_LINES};
use crate::utils::format::{fit_width, pluralize};
use crate::utils::output::{OutputStyle, Theme};
use colored::Colorize;

const FORM_LABEL_WIDTH: usize = 10;
const FORM_VALUE_WIDTH: usize = 40;

pub fn render(state: &AppState, width: usize, height: usize) -> Vec<String> {
    let theme = Theme::new(state.dark_mode);
    let page = state.page();

    let mut top = vec![title_line(state, &theme), search_line(state, &theme)];
    let mut summary = views::summary_line(&page, &theme);
    summary.push_str(&format!(
        "   {}",
        theme.muted(&format!(
            "{} per page · sorted by {} {}",
            state.query.page_size,
            state.query.sort_field,
            state.query.sort_order.arrow()
        ))
    ));
    top.push(summary);
    if state.select_mode {
        let bar = views::bulk_bar(state.selected.len(), &theme)
            .unwrap_or_else(|| theme.muted("Select mode: Space toggles, a selects the page").to_string());
        top.push(bar);
    }
    top.push(String::new());

    let mut bottom = Vec::new();
    if let Some(input) = &state.page_jump {
        bottom.push(format!(
            "{} {}",
            theme.muted(&format!("Go to page (1-{}):", page.total_pages.max(1))),
            theme.highlight(&format!("{}▏", input))
        ));
    }
    if let Some(menu) = row_menu_line(state, &theme) {
        bottom.push(menu);
    }
    if let Some(bar) = views::pagination_line(page.total_pages, page.page, &theme) {
        bottom.push(bar);
    }
    bottom.push(hint_line(state, &theme));

    let available = height.saturating_sub(top.len() + bottom.len() + 1).max(1);
    let (body, focus_line) = body_lines(state, &theme, width);
    let body = viewport(body, focus_line, available);

    let mut frame = top;
    frame.extend(body);
    frame.push(String::new());
    frame.extend(bottom);
    frame
}

fn title_line(state: &AppState, theme: &Theme) -> String {
    let view = match state.view_mode {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    };
    let mode = if state.dark_mode { "dark" } else { "light" };
    format!(
        "{} {}   {}",
        OutputStyle::title("📇 Contacts"),
        theme.muted(&format!("({})", state.contacts.len())),
        theme.muted(&format!("{} view · {} theme", view, mode))
    )
}

fn search_line(state: &AppState, theme: &Theme) -> String {
    let focused = state.focus == Focus::Search;
    let term = if state.query.search.is_empty() && !focused {
        theme.muted("Search contacts...").to_string()
    } else if focused {
        theme.highlight(&format!("{}▏", state.query.search)).to_string()
    } else {
        theme.text(&state.query.search).to_string()
    };
    let tag = match &state.query.tag {
        Some(tag) => OutputStyle::tag_badge(tag).to_string(),
        None => theme.muted("All Tags").to_string(),
    };
    format!("🔍 {}   {} {}", term, theme.muted("Tag:"), tag)
}

/// Body content and the line the viewport should keep visible
fn body_lines(state: &AppState, theme: &Theme, width: usize) -> (Vec<String>, usize) {
    match &state.modal {
        Some(Modal::Form(form)) => return (form_lines(form, theme), 0),
        Some(Modal::DeleteConfirm(target)) => return (delete_lines(state, target, theme), 0),
        None => {}
    }
    if let Some(panel) = &state.filter_panel {
        return (filter_lines(panel, theme), panel.cursor + 2);
    }
    if let Some(contact) = state.detail_contact() {
        let mut lines = views::detail_lines(contact, theme);
        lines.push(String::new());
        lines.push(theme.muted("e edit · d delete · Esc close").to_string());
        return (lines, 0);
    }

    let page = state.page();
    if let Some(message) = views::empty_state(&page) {
        return (vec![theme.muted(message).to_string()], 0);
    }

    let marks = RowMarks::interactive(state.cursor, state.select_mode, &state.selected);
    match state.view_mode {
        ViewMode::List => {
            let sort = Some((state.query.sort_field, state.query.sort_order));
            let lines = views::table_lines(&page.contacts, sort, &marks, theme);
            let focus = TABLE_HEADER_LINES + state.cursor * TABLE_ROW_LINES + 1;
            (lines, focus)
        }
        ViewMode::Grid => {
            let columns = views::grid_columns(width);
            let lines = views::grid_lines(&page.contacts, &marks, theme, width);
            let focus = (state.cursor / columns) * CARD_HEIGHT + CARD_HEIGHT - 1;
            (lines, focus)
        }
    }
}

/// Slice `lines` to `height`, scrolled so `focus` stays on screen
fn viewport(lines: Vec<String>, focus: usize, height: usize) -> Vec<String> {
    if lines.len() <= height {
        return lines;
    }
    let start = (focus + 1).saturating_sub(height).min(lines.len() - height);
    lines.into_iter().skip(start).take(height).collect()
}

fn form_lines(form: &FormState, theme: &Theme) -> Vec<String> {
    let title = if form.is_edit() { "Edit Contact" } else { "Add New Contact" };
    let mut lines = vec![OutputStyle::title(title).to_string(), theme.border(&"─".repeat(52)).to_string()];

    for field in FormField::ORDER {
        let focused = form.focus == field;
        let mut value = form.value(field);
        if field == FormField::Relation {
            value = format!("◀ {} ▶", value);
        } else if focused {
            value.push('▏');
        }
        let label = fit_width(field.label(), FORM_LABEL_WIDTH);
        let value = fit_width(&value, FORM_VALUE_WIDTH);
        let value = if focused {
            theme.highlight(&value).to_string()
        } else {
            theme.text(&value).to_string()
        };
        let marker = if focused { "›" } else { " " };
        lines.push(format!("{} {} {}", theme.accent(marker), OutputStyle::label(&label), value));
    }

    lines.push(String::new());
    lines.push(theme.muted("Tags are comma separated, e.g. Family, Friends").to_string());
    let submit = if form.is_edit() { "Update Contact" } else { "Add Contact" };
    if form.draft.can_submit() {
        lines.push(format!("{} {}", theme.accent(&format!("[Enter] {}", submit)), theme.muted("[Esc] Cancel")));
    } else {
        lines.push(format!(
            "{} {}",
            theme.muted(&format!("[Enter] {} (name and phone required)", submit)),
            theme.muted("[Esc] Cancel")
        ));
    }
    lines
}

/// Confirmation text for a pending delete
pub fn delete_message(state: &AppState, target: &DeleteTarget) -> String {
    match target {
        DeleteTarget::Bulk => format!(
            "Are you sure you want to delete {}?",
            pluralize(state.selected.len(), "contact")
        ),
        DeleteTarget::Single(id) => match state.contacts.find_by_id(id) {
            Some(contact) => format!("Are you sure you want to delete {}?", contact.name),
            None => "Are you sure you want to delete this contact?".to_string(),
        },
    }
}

fn delete_lines(state: &AppState, target: &DeleteTarget, theme: &Theme) -> Vec<String> {
    let title = match target {
        DeleteTarget::Bulk if state.selected.len() > 1 => "Delete Contacts",
        _ => "Delete Contact",
    };
    vec![
        OutputStyle::error(title).bold().to_string(),
        theme.border(&"─".repeat(52)).to_string(),
        theme.text(&delete_message(state, target)).to_string(),
        OutputStyle::warning("This action cannot be undone.").to_string(),
        String::new(),
        format!("{}  {}", OutputStyle::error("[y] Delete"), theme.muted("[n/Esc] Cancel")),
    ]
}

fn filter_lines(panel: &FilterPanel, theme: &Theme) -> Vec<String> {
    let mut lines = vec![
        OutputStyle::title("Filter by tag").to_string(),
        theme.border(&"─".repeat(30)).to_string(),
    ];
    let options = std::iter::once("All Tags".to_string()).chain(panel.options.iter().cloned());
    for (index, option) in options.enumerate() {
        let selected = index == panel.cursor;
        let label = if index == 0 {
            theme.text(&option).to_string()
        } else {
            OutputStyle::tag_badge(&option).to_string()
        };
        let marker = if selected { theme.accent("●") } else { theme.muted("○") };
        lines.push(format!("  {} {}", marker, label));
    }
    lines.push(String::new());
    lines.push(theme.muted("↑↓ choose · Enter apply · c clear · Esc close").to_string());
    lines
}

fn row_menu_line(state: &AppState, theme: &Theme) -> Option<String> {
    let menu = state.row_menu.as_ref()?;
    let name = state
        .contacts
        .find_by_id(&menu.contact_id)
        .map(|c| c.name.as_str())
        .unwrap_or("contact");
    let items: Vec<String> = RowMenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == menu.cursor {
                theme.highlight(&format!(" {} ", item.label())).to_string()
            } else {
                theme.text(&format!(" {} ", item.label())).to_string()
            }
        })
        .collect();
    Some(format!("{} {}", theme.muted(&format!("{}:", name)), items.join(" ")))
}

fn hint_line(state: &AppState, theme: &Theme) -> String {
    let hint = if state.page_jump.is_some() {
        "type a page number · Enter go · Esc cancel"
    } else if state.focus == Focus::Search {
        "type to search · Enter/Esc done"
    } else if state.select_mode {
        "Space select · a all · e edit · d delete · x exit select · q quit"
    } else {
        "/ search · 1-5 sort · ←→ page · g go to · +/- size · f filter · v view · t theme · n new · m menu · x select · q quit"
    };
    theme.muted(hint).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Contact, ContactCollection};
    use crate::core::query::ContactQuery;
    use crate::core::state::Action;

    fn state(count: usize) -> AppState {
        let contacts = (0..count)
            .map(|i| Contact {
                id: format!("c{}", i),
                name: format!("Person {:02}", i),
                phone: format!("555-{:04}", i),
                email: String::new(),
                address: String::new(),
                relation: None,
                tags: vec![],
            })
            .collect();
        AppState::new(ContactCollection::new(contacts), ContactQuery::default(), ViewMode::List, false)
    }

    #[test]
    fn viewport_keeps_focus_visible() {
        let lines: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(viewport(lines.clone(), 3, 5), vec!["0", "1", "2", "3", "4"]);
        assert_eq!(viewport(lines.clone(), 12, 5), vec!["8", "9", "10", "11", "12"]);
        assert_eq!(viewport(lines, 19, 5).last().map(String::as_str), Some("19"));
    }

    #[test]
    fn frame_fits_the_terminal_height() {
        let state = state(100);
        let frame = render(&state, 120, 30);
        assert!(frame.len() <= 30);
    }

    #[test]
    fn delete_messages() {
        let mut state = state(3);
        assert_eq!(
            delete_message(&state, &DeleteTarget::Single("c1".to_string())),
            "Are you sure you want to delete Person 01?"
        );

        state.dispatch(Action::ToggleSelectMode);
        state.dispatch(Action::ToggleSelected("c0".to_string()));
        state.dispatch(Action::ToggleSelected("c2".to_string()));
        assert_eq!(
            delete_message(&state, &DeleteTarget::Bulk),
            "Are you sure you want to delete 2 contacts?"
        );
    }

    #[test]
    fn delete_modal_shows_title_and_warning() {
        let mut state = state(3);
        state.dispatch(Action::OpenDeleteAtCursor);
        let (body, _) = body_lines(&state, &Theme::default(), 120);
        assert!(body[0].contains("Delete Contact"));
        assert!(body[2].contains("Are you sure you want to delete Person 00?"));
        assert!(body[3].contains("This action cannot be undone."));
    }

    #[test]
    fn page_prompt_sits_above_the_pagination_bar() {
        let mut state = state(30);
        state.dispatch(Action::OpenPageJump);
        state.dispatch(Action::PageJumpInput('2'));
        let frame = render(&state, 120, 40);
        assert!(frame.iter().any(|line| line.contains("Go to page (1-3):")));
        assert!(frame.len() <= 40);
    }

    #[test]
    fn modal_replaces_the_body() {
        let mut state = state(3);
        state.dispatch(Action::OpenAddForm);
        let (body, _) = body_lines(&state, &Theme::default(), 120);
        assert!(body[0].contains("Add New Contact"));
        assert_eq!(body.len(), 2 + FormField::ORDER.len() + 3);
    }
}
