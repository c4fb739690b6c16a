//! Line renderers shared by the interactive screen and the one-shot commands
//!
//! Every function returns plain `String` lines with ANSI styling already
//! applied. Widths are computed on the unstyled text.

use crate::core::data::Contact;
use crate::core::pagination::{PageItem, PageWindow};
use crate::core::query::{PageView, SortField, SortOrder};
use crate::utils::format::{fit_width, pluralize, truncate_string};
use crate::utils::output::{OutputStyle, Theme, tag_color};
use std::collections::BTreeSet;

pub const TABLE_HEADER_LINES: usize = 2;
pub const TABLE_ROW_LINES: usize = 2;
pub const CARD_HEIGHT: usize = 7;
const CARD_WIDTH: usize = 36;
const CARD_GAP: usize = 2;
const ADDRESS_PREVIEW: usize = 30;

// name column includes the 4-wide avatar and a space
const COL_NAME: usize = 26;
const COL_CONTACT: usize = 30;
const COL_TAG: usize = 14;
const COL_ADDRESS: usize = 34;
const COL_RELATION: usize = 10;

/// Cursor and selection markers for a rendered page
pub struct RowMarks<'a> {
    pub cursor: Option<usize>,
    pub select_mode: bool,
    pub selected: Option<&'a BTreeSet<String>>,
}

impl<'a> RowMarks<'a> {
    pub fn none() -> Self {
        Self {
            cursor: None,
            select_mode: false,
            selected: None,
        }
    }

    pub fn interactive(cursor: usize, select_mode: bool, selected: &'a BTreeSet<String>) -> Self {
        Self {
            cursor: Some(cursor),
            select_mode,
            selected: Some(selected),
        }
    }

    fn is_cursor(&self, index: usize) -> bool {
        self.cursor == Some(index)
    }

    fn checkbox(&self, id: &str) -> &'static str {
        if !self.select_mode {
            return "";
        }
        match self.selected {
            Some(set) if set.contains(id) => "[x] ",
            _ => "[ ] ",
        }
    }

    fn pointer(&self, index: usize) -> &'static str {
        match self.cursor {
            Some(_) if self.is_cursor(index) => "▶ ",
            Some(_) => "  ",
            None => "",
        }
    }
}

/// Pad already-styled text whose visible width is `visible` out to `width`
fn pad_styled(styled: String, visible: usize, width: usize) -> String {
    format!("{}{}", styled, " ".repeat(width.saturating_sub(visible)))
}

/// "Showing N of M results (Page X of Y)"
pub fn summary_line(page: &PageView<'_>, theme: &Theme) -> String {
    let mut line = format!(
        "Showing {} of {} results",
        page.contacts.len(),
        page.total_matches
    );
    if page.total_matches > 0 {
        line.push_str(&format!(" (Page {} of {})", page.page, page.total_pages));
    }
    theme.muted(&line).to_string()
}

/// Message for an empty page, if the page is empty
pub fn empty_state(page: &PageView<'_>) -> Option<&'static str> {
    if !page.contacts.is_empty() {
        return None;
    }
    if page.is_past_end() {
        Some("No contacts on this page. Try going to page 1.")
    } else {
        Some("No contacts found matching your search.")
    }
}

fn heading(field: SortField, width: usize, sort: Option<(SortField, SortOrder)>, theme: &Theme) -> String {
    let text = match sort {
        Some((active, order)) if active == field => format!("{} {}", field.heading(), order.arrow()),
        _ => field.heading().to_string(),
    };
    let cell = fit_width(&text, width);
    match sort {
        Some((active, _)) if active == field => theme.accent(&cell).to_string(),
        _ => OutputStyle::header(&cell).to_string(),
    }
}

/// List view: a header plus two lines per contact
pub fn table_lines(
    contacts: &[&Contact],
    sort: Option<(SortField, SortOrder)>,
    marks: &RowMarks<'_>,
    theme: &Theme,
) -> Vec<String> {
    let lead_pad = " ".repeat(marks.pointer(usize::MAX).chars().count() + marks.checkbox("").chars().count());

    let mut lines = Vec::with_capacity(TABLE_HEADER_LINES + contacts.len() * TABLE_ROW_LINES);
    lines.push(format!(
        "{}{} {} {} {} {}",
        lead_pad,
        heading(SortField::Name, COL_NAME, sort, theme),
        heading(SortField::Email, COL_CONTACT, sort, theme),
        heading(SortField::Tags, COL_TAG, sort, theme),
        heading(SortField::Address, COL_ADDRESS, sort, theme),
        heading(SortField::Relation, COL_RELATION, sort, theme),
    ));
    let rule_width = COL_NAME + COL_CONTACT + COL_TAG + COL_ADDRESS + COL_RELATION + 4;
    lines.push(format!("{}{}", lead_pad, theme.border(&"─".repeat(rule_width))));

    for (index, contact) in contacts.iter().enumerate() {
        let prefix = format!("{}{}", marks.pointer(index), marks.checkbox(&contact.id));
        let cursor = marks.is_cursor(index);
        let paint = |text: &str| {
            if cursor {
                theme.highlight(text).to_string()
            } else {
                theme.text(text).to_string()
            }
        };

        let name = fit_width(&contact.name, COL_NAME - 5);
        let email = fit_width(&contact.email, COL_CONTACT);
        let badge_text = fit_width(contact.first_tag().unwrap_or("General"), COL_TAG - 2);
        let badge = match contact.first_tag() {
            Some(tag) => OutputStyle::badge(badge_text.trim_end(), tag_color(tag)).to_string(),
            None => OutputStyle::first_tag_badge(contact).to_string(),
        };
        let badge_width = badge_text.trim_end().chars().count() + 2;
        let address = fit_width(&truncate_string(&contact.address, ADDRESS_PREVIEW), COL_ADDRESS);
        let relation = fit_width(contact.relation_label(), COL_RELATION);

        lines.push(format!(
            "{}{} {} {} {} {} {}",
            prefix,
            OutputStyle::avatar(&contact.name),
            paint(&name),
            paint(&email),
            pad_styled(badge, badge_width, COL_TAG),
            paint(&address),
            theme.muted(&relation),
        ));

        let indent = " ".repeat(prefix.chars().count() + COL_NAME + 1);
        lines.push(format!(
            "{}{}",
            indent,
            theme.muted(&fit_width(&contact.phone, COL_CONTACT))
        ));
    }

    lines
}

/// How many cards fit side by side
pub fn grid_columns(width: usize) -> usize {
    ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1)
}

/// Grid view: cards laid out left to right
pub fn grid_lines(contacts: &[&Contact], marks: &RowMarks<'_>, theme: &Theme, width: usize) -> Vec<String> {
    let columns = grid_columns(width);
    let mut lines = Vec::new();

    for (row, chunk) in contacts.chunks(columns).enumerate() {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .enumerate()
            .map(|(col, contact)| card_lines(contact, row * columns + col, marks, theme))
            .collect();

        for line in 0..CARD_HEIGHT {
            let joined: Vec<&str> = cards.iter().map(|card| card[line].as_str()).collect();
            lines.push(joined.join(&" ".repeat(CARD_GAP)));
        }
    }

    lines
}

fn card_lines(contact: &Contact, index: usize, marks: &RowMarks<'_>, theme: &Theme) -> Vec<String> {
    let inner = CARD_WIDTH - 4;
    let cursor = marks.is_cursor(index);
    let border = |text: &str| {
        if cursor {
            theme.accent(text).to_string()
        } else {
            theme.border(text).to_string()
        }
    };
    let row = |styled: String, visible: usize| {
        format!("{} {} {}", border("│"), pad_styled(styled, visible, inner), border("│"))
    };

    let checkbox = marks.checkbox(&contact.id);
    let name_width = inner - 5 - checkbox.chars().count();
    let name = fit_width(&contact.name, name_width);
    let title = format!(
        "{} {}{}",
        OutputStyle::avatar(&contact.name),
        OutputStyle::header(&name),
        checkbox.trim_end()
    );
    let title_width = 5 + name_width + checkbox.trim_end().chars().count();

    let relation = fit_width(contact.relation_label(), inner - 5);
    let phone = fit_width(&format!("☎ {}", contact.phone), inner);
    let email = fit_width(&format!("✉ {}", contact.email), inner);

    let mut badges = String::new();
    let mut badge_width = 0;
    for tag in &contact.tags {
        let w = tag.chars().count() + 2;
        let sep = if badge_width == 0 { 0 } else { 1 };
        if badge_width + sep + w > inner {
            break;
        }
        if sep == 1 {
            badges.push(' ');
        }
        badges.push_str(&OutputStyle::tag_badge(tag).to_string());
        badge_width += sep + w;
    }
    if contact.tags.is_empty() {
        badges = OutputStyle::first_tag_badge(contact).to_string();
        badge_width = " General ".len();
    }

    vec![
        border(&format!("┌{}┐", "─".repeat(CARD_WIDTH - 2))),
        row(title, title_width),
        row(format!("     {}", theme.muted(&relation)), inner),
        row(theme.text(&phone).to_string(), inner),
        row(theme.text(&email).to_string(), inner),
        row(badges, badge_width),
        border(&format!("└{}┘", "─".repeat(CARD_WIDTH - 2))),
    ]
}

/// Full record for the detail panel and `show`
pub fn detail_lines(contact: &Contact, theme: &Theme) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", OutputStyle::avatar(&contact.name), OutputStyle::title(&contact.name)),
    ];
    if contact.relation.is_some() {
        lines.push(format!("     {}", theme.muted(contact.relation_label())));
    }
    lines.push(OutputStyle::header_separator());

    let field = |label: &str, value: &str| {
        let value = if value.is_empty() { "-" } else { value };
        format!("{:>12}: {}", OutputStyle::label(label), theme.text(value))
    };
    lines.push(field("Phone", &contact.phone));
    lines.push(field("Email", &contact.email));
    lines.push(field("Address", &contact.address));

    let tags = if contact.tags.is_empty() {
        theme.muted("none").to_string()
    } else {
        contact
            .tags
            .iter()
            .map(|t| OutputStyle::tag_badge(t).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    lines.push(format!("{:>12}: {}", OutputStyle::label("Tags"), tags));
    lines.push(format!("{:>12}: {}", OutputStyle::label("ID"), theme.muted(&contact.id)));

    lines
}

/// Prev, page buttons with ellipses, Next; `None` for a single page
pub fn pagination_line(total_pages: usize, page: usize, theme: &Theme) -> Option<String> {
    let window = PageWindow::compute(total_pages, page)?;

    let mut parts = Vec::new();
    parts.push(if window.has_prev() {
        theme.text("‹ Prev").to_string()
    } else {
        theme.muted("‹ Prev").to_string()
    });
    for item in window.items() {
        parts.push(match item {
            PageItem::Page { number, current: true } => theme.accent(&format!("[{}]", number)).to_string(),
            PageItem::Page { number, .. } => theme.text(&number.to_string()).to_string(),
            PageItem::Ellipsis => theme.muted("…").to_string(),
        });
    }
    parts.push(if window.has_next() {
        theme.text("Next ›").to_string()
    } else {
        theme.muted("Next ›").to_string()
    });

    Some(parts.join(" "))
}

/// Bulk actions bar text; edit is only offered for a single selection
pub fn bulk_bar(count: usize, theme: &Theme) -> Option<String> {
    if count == 0 {
        return None;
    }
    let mut line = format!("{} selected", theme.accent(&pluralize(count, "contact")));
    if count == 1 {
        line.push_str(&format!("   {}", theme.text("[e] Edit")));
    }
    line.push_str(&format!("   {}", OutputStyle::error("[d] Delete")));
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn contact(name: &str, tags: &[&str]) -> Contact {
        Contact {
            id: format!("id-{}", name),
            name: name.to_string(),
            phone: "555-0100".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: "1234 Extremely Long Boulevard Name, Springfield".to_string(),
            relation: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn view<'a>(contacts: Vec<&'a Contact>, total_matches: usize, page: usize) -> PageView<'a> {
        PageView {
            contacts,
            total_matches,
            total_pages: total_matches.div_ceil(10),
            page,
        }
    }

    #[test]
    fn empty_states_distinguish_no_match_from_past_end() {
        assert_eq!(
            empty_state(&view(vec![], 0, 1)),
            Some("No contacts found matching your search.")
        );
        assert_eq!(
            empty_state(&view(vec![], 12, 5)),
            Some("No contacts on this page. Try going to page 1.")
        );
        let ann = contact("Ann", &[]);
        assert_eq!(empty_state(&view(vec![&ann], 1, 1)), None);
    }

    #[test]
    fn summary_mentions_page_only_with_results() {
        let theme = Theme::default();
        assert_eq!(strip_ansi(&summary_line(&view(vec![], 0, 1), &theme)), "Showing 0 of 0 results");
        let ann = contact("Ann", &[]);
        assert_eq!(
            strip_ansi(&summary_line(&view(vec![&ann], 11, 2), &theme)),
            "Showing 1 of 11 results (Page 2 of 2)"
        );
    }

    #[test]
    fn table_rows_truncate_address_and_fall_back_to_general() {
        let ann = contact("Ann Lee", &[]);
        let lines = table_lines(&[&ann], None, &RowMarks::none(), &Theme::default());
        let row = strip_ansi(&lines[TABLE_HEADER_LINES]);

        assert!(row.contains("AL"));
        assert!(row.contains("General"));
        assert!(row.contains("1234 Extremely Long Boulevard ..."));
        assert_eq!(lines.len(), TABLE_HEADER_LINES + TABLE_ROW_LINES);
    }

    #[test]
    fn active_sort_column_shows_direction() {
        let header = strip_ansi(
            &table_lines(&[], Some((SortField::Email, SortOrder::Desc)), &RowMarks::none(), &Theme::default())[0],
        );
        assert!(header.contains("CONTACT ▼"));
        assert!(!header.contains("CONTACT NAME ▼"));
    }

    #[test]
    fn grid_wraps_cards_by_width() {
        let a = contact("Ann", &["Job"]);
        let b = contact("Ben", &["Family", "Sports"]);
        let c = contact("Cid", &[]);
        let contacts = vec![&a, &b, &c];

        assert_eq!(grid_columns(80), 2);
        assert_eq!(grid_columns(10), 1);
        let lines = grid_lines(&contacts, &RowMarks::none(), &Theme::default(), 80);
        assert_eq!(lines.len(), 2 * CARD_HEIGHT);
    }

    #[test]
    fn selection_marks_render_checkboxes() {
        let ann = contact("Ann", &[]);
        let selected: BTreeSet<String> = [ann.id.clone()].into_iter().collect();
        let marks = RowMarks::interactive(0, true, &selected);
        let lines = table_lines(&[&ann], None, &marks, &Theme::default());
        assert!(strip_ansi(&lines[TABLE_HEADER_LINES]).starts_with("▶ [x] "));
    }

    #[test]
    fn pagination_bar_marks_current_page() {
        let theme = Theme::default();
        assert!(pagination_line(1, 1, &theme).is_none());
        let bar = strip_ansi(&pagination_line(10, 6, &theme).unwrap());
        assert_eq!(bar, "‹ Prev 1 … 4 5 [6] 7 8 … 10 Next ›");
    }

    #[test]
    fn bulk_bar_offers_edit_for_one() {
        let theme = Theme::default();
        assert!(bulk_bar(0, &theme).is_none());
        let one = strip_ansi(&bulk_bar(1, &theme).unwrap());
        assert!(one.starts_with("1 contact selected") && one.contains("Edit"));
        let many = strip_ansi(&bulk_bar(3, &theme).unwrap());
        assert!(many.starts_with("3 contacts selected") && !many.contains("Edit"));
    }
}
