use crate::utils::error::{AppError, AppResult};
use crossterm::terminal::size;

/// Get terminal size (rows, columns)
pub fn get_terminal_size() -> AppResult<(u16, u16)> {
    size()
        .map(|(width, height)| (height, width))
        .map_err(|e| AppError::Terminal(format!("Failed to get terminal size: {}", e)))
}

/// Check if content should be paginated based on terminal height
pub fn should_paginate(content: &str, terminal_height: u16) -> bool {
    let line_count = content.lines().count();
    // Page when content exceeds 2/3 of terminal height
    line_count > usize::from(terminal_height) * 2 / 3
}

/// Display content using minus pager for static content
pub fn paginate_static_content(content: &str) -> AppResult<()> {
    let pager = minus::Pager::new();
    pager
        .push_str(content)
        .map_err(|e| AppError::Terminal(format!("Failed to push content to pager: {}", e)))?;

    if let Err(e) = minus::page_all(pager) {
        // Quitting the pager early is not a failure
        if e.to_string().to_lowercase().contains("abort") {
            return Ok(());
        }
        return Err(AppError::Terminal(format!("Failed to run pager: {}", e)));
    }

    Ok(())
}

/// Page long output when attached to a terminal, print it otherwise
pub fn page_or_print(content: &str) -> AppResult<()> {
    match get_terminal_size() {
        Ok((height, _)) if should_paginate(content, height) => paginate_static_content(content),
        _ => {
            println!("{}", content);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_past_two_thirds_of_the_screen() {
        let short = "a\nb\nc";
        let long = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");

        assert!(!should_paginate(short, 24));
        assert!(should_paginate(&long, 24));
        assert!(should_paginate(short, 3));
    }
}
