//! Page selection for listing endpoints.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::errors::{FieldErrors, Result};

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page_number: i64,
    page_size: i64,
}

impl Pagination {
    /// Builds a page request, rejecting page numbers or sizes below 1.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self> {
        let mut errors = FieldErrors::default();
        if page_number < 1 {
            errors.add("pageNumber", "Page number must be greater than 0.");
        }
        if page_size < 1 {
            errors.add("pageSize", "Page size must be greater than 0.");
        }
        errors.into_result()?;
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// Builds a page request from optional query values, applying defaults.
    pub fn from_query(page_number: Option<i64>, page_size: Option<i64>) -> Result<Self> {
        Self::new(
            page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Applies the page to an in-memory, already ordered list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        items.iter().skip(start).take(size).cloned().collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ValidationError};

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = Pagination::from_query(None, None).unwrap();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let page = Pagination::new(3, 25).unwrap();
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn rejects_zero_and_negative_values() {
        match Pagination::new(0, -5) {
            Err(Error::Validation(ValidationError::Fields(errors))) => {
                assert!(errors.get("pageNumber").is_some());
                assert!(errors.get("pageSize").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn slice_returns_requested_window() {
        let items: Vec<i32> = (1..=12).collect();
        assert_eq!(Pagination::new(2, 5).unwrap().slice(&items), vec![6, 7, 8, 9, 10]);
        assert_eq!(Pagination::new(3, 5).unwrap().slice(&items), vec![11, 12]);
        assert!(Pagination::new(4, 5).unwrap().slice(&items).is_empty());
    }
}
