use crate::cli::ListFormat;
use crate::config::Config;
use crate::core::data::Contact;
use crate::core::query::PageView;
use crate::ui::views::{self, RowMarks};
use crate::utils::error::{AppError, AppResult, FlowResult, handle_flow};
use crate::utils::interactive::screen_size;
use crate::utils::pagination::page_or_print;
use colored::*;

/// Badge colors for the well-known tags
const TAG_COLORS: [(&str, &str); 7] = [
    ("Family", "#10B981"),
    ("Friends", "#7C3AED"),
    ("Job", "#F59E0B"),
    ("Sports", "#06B6D4"),
    ("Gaming", "#EC4899"),
    ("Developers", "#8B5CF6"),
    ("Designers", "#A78BFA"),
];

pub const DEFAULT_TAG_COLOR: &str = "#CBD5E1";

const AVATAR_PALETTE: [&str; 7] = [
    "#7C3AED", "#A78BFA", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4",
];

const ACCENT: &str = "#7C3AED";

pub fn tag_color(tag: &str) -> &'static str {
    TAG_COLORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TAG_COLOR)
}

/// Palette entry picked by the first character's code point
pub fn avatar_color(name: &str) -> &'static str {
    let code = name.chars().next().map(u32::from).unwrap_or(0) as usize;
    AVATAR_PALETTE[code % AVATAR_PALETTE.len()]
}

/// `#RRGGBB` to components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Light or dark tones for the interactive screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn text(&self, text: &str) -> ColoredString {
        if self.dark {
            OutputStyle::hex(text, "#E5E7EB")
        } else {
            OutputStyle::hex(text, "#1F2937")
        }
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        if self.dark {
            OutputStyle::hex(text, "#9CA3AF")
        } else {
            OutputStyle::hex(text, "#6B7280")
        }
    }

    pub fn border(&self, text: &str) -> ColoredString {
        if self.dark {
            OutputStyle::hex(text, "#374151")
        } else {
            OutputStyle::hex(text, "#D1D5DB")
        }
    }

    /// Cursor row
    pub fn highlight(&self, text: &str) -> ColoredString {
        let (r, g, b) = if self.dark { (55, 48, 90) } else { (237, 233, 254) };
        self.text(text).on_truecolor(r, g, b)
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        OutputStyle::hex(text, ACCENT).bold()
    }
}

pub struct OutputStyle;

impl OutputStyle {
    pub fn title(text: &str) -> ColoredString {
        Self::hex(text, ACCENT).bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Foreground in a `#RRGGBB` color; plain text if the hex is malformed
    pub fn hex(text: &str, hex: &str) -> ColoredString {
        match hex_to_rgb(hex) {
            Some((r, g, b)) => text.truecolor(r, g, b),
            None => text.normal(),
        }
    }

    /// Dark label on a `#RRGGBB` background
    pub fn badge(label: &str, hex: &str) -> ColoredString {
        let (r, g, b) = hex_to_rgb(hex).unwrap_or((203, 213, 225));
        format!(" {} ", label).black().on_truecolor(r, g, b)
    }

    pub fn tag_badge(tag: &str) -> ColoredString {
        Self::badge(tag, tag_color(tag))
    }

    /// Badge of the first tag, or a neutral "General" badge
    pub fn first_tag_badge(contact: &Contact) -> ColoredString {
        match contact.first_tag() {
            Some(tag) => Self::tag_badge(tag),
            None => Self::badge("General", DEFAULT_TAG_COLOR),
        }
    }

    /// Initials on the contact's avatar color
    pub fn avatar(name: &str) -> ColoredString {
        let (r, g, b) = hex_to_rgb(avatar_color(name)).unwrap_or((124, 58, 237));
        let initials = crate::utils::format::initials(name);
        format!(" {:<2} ", initials).white().bold().on_truecolor(r, g, b)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }
}

/// Display formatter for the one-shot commands
pub struct DisplayFormatter;

impl DisplayFormatter {
    /// Print one page of contacts in the requested format
    pub fn format_page(page: &PageView<'_>, format: &ListFormat, config: &Config) -> AppResult<()> {
        if let ListFormat::Json = format {
            return Self::print_json_page(page);
        }

        if let Some(message) = views::empty_state(page) {
            println!("{}", OutputStyle::muted(message));
            return Ok(());
        }

        let theme = Theme::new(config.general.dark_mode);
        let marks = RowMarks::none();
        let mut lines = vec![views::summary_line(page, &theme)];
        lines.push(String::new());
        match format {
            ListFormat::Table => lines.extend(views::table_lines(&page.contacts, None, &marks, &theme)),
            _ => lines.extend(views::grid_lines(&page.contacts, &marks, &theme, screen_size().0)),
        }
        if let Some(bar) = views::pagination_line(page.total_pages, page.page, &theme) {
            lines.push(String::new());
            lines.push(bar);
        }

        page_or_print(&lines.join("\n"))
    }

    /// Print the detail panel for one contact
    pub fn print_contact(contact: &Contact, config: &Config) -> AppResult<()> {
        let theme = Theme::new(config.general.dark_mode);
        page_or_print(&views::detail_lines(contact, &theme).join("\n"))
    }

    /// Print tag usage with a color swatch per tag
    pub fn print_tags(tags: &[(String, usize)]) -> AppResult<()> {
        if tags.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "tags".to_string(),
            });
            return Ok(());
        }

        println!("{}", OutputStyle::title(&format!("🏷️  Tags ({})", tags.len())));
        println!("{}", OutputStyle::header_separator());
        for (tag, count) in tags {
            println!(
                "  {} {} {}",
                OutputStyle::tag_badge(tag),
                OutputStyle::muted(tag_color(tag)),
                crate::utils::format::pluralize(*count, "contact")
            );
        }

        Ok(())
    }

    fn print_json_page(page: &PageView<'_>) -> AppResult<()> {
        let payload = serde_json::json!({
            "page": page.page,
            "total_pages": page.total_pages,
            "total_matches": page.total_matches,
            "contacts": page.contacts,
        });
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|e| AppError::Data(format!("Failed to serialize contacts to JSON: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_have_fixed_colors() {
        assert_eq!(tag_color("Family"), "#10B981");
        assert_eq!(tag_color("Designers"), "#A78BFA");
        assert_eq!(tag_color("family"), DEFAULT_TAG_COLOR);
        assert_eq!(tag_color("Book Club"), DEFAULT_TAG_COLOR);
    }

    #[test]
    fn avatar_color_uses_first_code_point() {
        // 'A' is 65, 65 % 7 == 2
        assert_eq!(avatar_color("Ada"), "#10B981");
        // 'B' is 66, 66 % 7 == 3
        assert_eq!(avatar_color("Bob"), "#F59E0B");
        assert_eq!(avatar_color(""), "#7C3AED");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#10B981"), Some((0x10, 0xB9, 0x81)));
        assert_eq!(hex_to_rgb("10B981"), None);
        assert_eq!(hex_to_rgb("#XYZXYZ"), None);
    }
}
