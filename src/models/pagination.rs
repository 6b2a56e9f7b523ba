//! Offset/size pagination shared by list endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

pub const DEFAULT_FROM: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Index of the first element (default 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Number of elements per page (default 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// Validated LIMIT/OFFSET pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl PageQuery {
    pub fn new(from: Option<i64>, size: Option<i64>) -> Self {
        Self { from, size }
    }

    /// Resolve to a page. `from` is rounded down to the start of the page
    /// that contains it.
    pub fn page(&self) -> AppResult<Page> {
        let from = self.from.unwrap_or(DEFAULT_FROM);
        let size = self.size.unwrap_or(DEFAULT_SIZE);

        if from < 0 {
            return Err(AppError::Validation(
                "Pagination parameter 'from' must not be negative".to_string(),
            ));
        }
        if size <= 0 {
            return Err(AppError::Validation(
                "Pagination parameter 'size' must be positive".to_string(),
            ));
        }

        Ok(Page {
            limit: size,
            offset: (from / size) * size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageQuery::default().page().unwrap();
        assert_eq!(page, Page { limit: 10, offset: 0 });
    }

    #[test]
    fn test_offset_is_page_aligned() {
        let page = PageQuery::new(Some(5), Some(2)).page().unwrap();
        assert_eq!(page, Page { limit: 2, offset: 4 });

        let page = PageQuery::new(Some(3), Some(10)).page().unwrap();
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_rejects_negative_from_and_non_positive_size() {
        assert!(matches!(
            PageQuery::new(Some(-1), Some(10)).page(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            PageQuery::new(Some(0), Some(0)).page(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            PageQuery::new(Some(0), Some(-3)).page(),
            Err(AppError::Validation(_))
        ));
    }
}
