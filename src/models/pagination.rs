//! Estructuras de paginación compartidas por los listados del panel

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.map(|p| p as i64),
            page_size: per_page.map(|p| p as i64),
        }
    }

    pub fn get_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn get_page_size(&self) -> i64 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }

    pub fn get_offset(&self) -> i64 {
        (self.get_page() - 1) * self.get_page_size()
    }

    pub fn get_limit(&self) -> i64 {
        self.get_page_size()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            data,
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams::new(None, None);
        assert_eq!(params.get_page(), 1);
        assert_eq!(params.get_page_size(), 20);
        assert_eq!(params.get_offset(), 0);
    }

    #[test]
    fn test_pagination_params_offset() {
        let params = PaginationParams::new(Some(3), Some(10));
        assert_eq!(params.get_offset(), 20);
        assert_eq!(params.get_limit(), 10);
    }

    #[test]
    fn test_paginated_response_total_pages() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 1, 10, 25);
        assert_eq!(page.total_pages, 3);

        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 1, 10, 0);
        assert_eq!(empty.total_pages, 1);
    }
}
