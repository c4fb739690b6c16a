use crate::core::data::Relation;
use crate::core::query::SortField;
use serde::{self, Deserialize, Deserializer, Serializer, de::Error};
use std::path::PathBuf;

/// Serialize an unset relation as an empty string
pub fn serialize_relation<S>(relation: &Option<Relation>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match relation {
        Some(r) => serializer.serialize_str(r.label()),
        None => serializer.serialize_str(""),
    }
}

/// Deserialize an empty or missing relation as None
pub fn deserialize_relation<'de, D>(deserializer: D) -> Result<Option<Relation>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if s.trim().is_empty() {
        return Ok(None);
    }
    Relation::from_label(&s)
        .map(Some)
        .ok_or_else(|| Error::custom(format!("unknown relation '{}'", s)))
}

/// Deserialize an empty path string as None
pub fn deserialize_option_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

/// Read a sort field leniently; unknown names fall back to name
pub fn deserialize_sort_field<'de, D>(deserializer: D) -> Result<SortField, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SortField::from_name(&s))
}

/// Split a comma separated tag list, dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_tags_comma(tags: &[String]) -> String {
    tags.join(", ")
}

/// Truncate to `max_len` characters, appending "..." when cut
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let cut: String = s.chars().take(max_len).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

/// Pad or cut to exactly `width` characters
pub fn fit_width(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        if width <= 1 {
            return s.chars().take(width).collect();
        }
        let cut: String = s.chars().take(width - 1).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", s, " ".repeat(width - count))
    }
}

/// Up to two uppercase initials, one per space separated word
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .filter_map(|c| c.to_uppercase().next())
        .collect()
}

pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("ßtefan Lee"), "SL");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_string("short", 30), "short");
        let long = "1234 Long Street Name, Springfield, Some State";
        assert_eq!(truncate_string(long, 30), format!("{}...", &long[..30]));
    }

    #[test]
    fn fit_width_pads_and_cuts() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
    }

    #[test]
    fn parse_tags_drops_blanks() {
        assert_eq!(parse_tags(" Job ,, Family,"), vec!["Job", "Family"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(1, "contact"), "1 contact");
        assert_eq!(pluralize(3, "contact"), "3 contacts");
    }
}
