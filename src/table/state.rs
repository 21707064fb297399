//! Sort, filter and page state values

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator for the active sort column
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort: column key plus direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// `None` means unsorted (input order)
pub type SortState = Option<SortSpec>;

/// Sort state exposed per sortable column for assistive output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaSort {
    Ascending,
    Descending,
    None,
}

impl AriaSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            AriaSort::Ascending => "ascending",
            AriaSort::Descending => "descending",
            AriaSort::None => "none",
        }
    }
}

impl fmt::Display for AriaSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows per page offered by the page size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Fifteen,
    Twenty,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Fifteen,
        PageSize::Twenty,
        PageSize::TwentyFive,
    ];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Fifteen => 15,
            PageSize::Twenty => 20,
            PageSize::TwentyFive => 25,
        }
    }

    /// Next size in the selector, wrapping from 25 back to 5
    pub fn cycle(&self) -> Self {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::Fifteen,
            PageSize::Fifteen => PageSize::Twenty,
            PageSize::Twenty => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Five,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(TableError::InvalidPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl std::str::FromStr for PageSize {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| TableError::InvalidPageSize(0))?;
        PageSize::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Current page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: PageSize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PageSize::Five,
        }
    }
}

impl PageState {
    pub fn new(current_page: usize, page_size: PageSize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size,
        }
    }

    /// Number of pages for `item_count` items, 0 when there are none
    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size.get())
    }

    /// Clamp the current page into `[1, max(total_pages, 1)]`
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_parsing() {
        assert_eq!(PageSize::try_from(15), Ok(PageSize::Fifteen));
        assert_eq!(PageSize::try_from(7), Err(TableError::InvalidPageSize(7)));
        assert_eq!("25".parse::<PageSize>(), Ok(PageSize::TwentyFive));
        assert!("abc".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_page_size_cycle_wraps() {
        let mut size = PageSize::Five;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(size.get());
            size = size.cycle();
        }
        assert_eq!(seen, vec![5, 10, 15, 20, 25]);
        assert_eq!(size, PageSize::Five);
    }

    #[test]
    fn test_total_pages() {
        let page = PageState::default();
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(5), 1);
        assert_eq!(page.total_pages(12), 3);
    }

    #[test]
    fn test_clamp_to() {
        let mut page = PageState::new(3, PageSize::Ten);
        page.clamp_to(2);
        assert_eq!(page.current_page, 2);
        page.clamp_to(0);
        assert_eq!(page.current_page, 1);
    }
}
