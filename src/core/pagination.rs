//! Page slicing and the page-number window shown by the pagination bar

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes offered by the page-size select
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Most page-number buttons shown at once
const MAX_VISIBLE: usize = 5;

/// A non-zero number of contacts per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        (size > 0).then_some(Self(size))
    }

    /// Accept only the sizes the page-size select offers
    pub fn from_option(size: usize) -> AppResult<Self> {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(AppError::Config(format!(
                "Page size must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, size
            )))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Next larger option, wrapping to the smallest
    pub fn next_option(&self) -> Self {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|s| *s > self.0)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        Self(next)
    }

    /// Next smaller option, wrapping to the largest
    pub fn prev_option(&self) -> Self {
        let prev = PAGE_SIZE_OPTIONS
            .iter()
            .rev()
            .copied()
            .find(|s| *s < self.0)
            .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1]);
        Self(prev)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(PAGE_SIZE_OPTIONS[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = AppError;

    fn try_from(size: usize) -> AppResult<Self> {
        Self::new(size).ok_or_else(|| AppError::Config("Page size must be positive".to_string()))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ceil(total / size)
pub fn total_pages(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.get())
}

/// Items on 1-based `page`; empty when the page is out of range
pub fn page_slice<T>(items: &[T], page: usize, size: PageSize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(size.get());
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size.get()).min(items.len());
    &items[start..end]
}

/// One element of the rendered pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// The page-number buttons around the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: usize,
    pub total: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// `None` when there is at most one page; `current` is clamped to the valid range
    pub fn compute(total: usize, current: usize) -> Option<Self> {
        if total <= 1 {
            return None;
        }
        let current = current.clamp(1, total);
        let half = MAX_VISIBLE / 2;

        let mut start = current.saturating_sub(half).max(1);
        let end = (start + MAX_VISIBLE - 1).min(total);
        if end - start + 1 < MAX_VISIBLE {
            start = (end + 1).saturating_sub(MAX_VISIBLE).max(1);
        }

        Some(Self {
            current,
            total,
            start,
            end,
        })
    }

    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }

    pub fn show_first(&self) -> bool {
        self.start > 1
    }

    pub fn leading_ellipsis(&self) -> bool {
        self.start > 2
    }

    pub fn trailing_ellipsis(&self) -> bool {
        self.end + 1 < self.total
    }

    pub fn show_last(&self) -> bool {
        self.end < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Buttons in display order, including the first/last jumps and ellipses
    pub fn items(&self) -> Vec<PageItem> {
        let mut items = Vec::with_capacity(MAX_VISIBLE + 4);

        if self.show_first() {
            items.push(PageItem::Page {
                number: 1,
                current: false,
            });
            if self.leading_ellipsis() {
                items.push(PageItem::Ellipsis);
            }
        }

        items.extend(self.pages().map(|number| PageItem::Page {
            number,
            current: number == self.current,
        }));

        if self.show_last() {
            if self.trailing_ellipsis() {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: self.total,
                current: false,
            });
        }

        items
    }
}
