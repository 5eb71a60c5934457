//! Page request / page result types shared by stores and services.

use std::str::FromStr;

use super::errors::{DomainError, DomainResult};

/// Sort direction for a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// One sort key, e.g. `title DESC`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder<P> {
    pub property: P,
    pub direction: SortDirection,
}

impl<P> SortOrder<P>
where
    P: FromStr<Err = DomainError>,
{
    /// Parse sort text of the form `prop[,prop...][,asc|desc]`.
    ///
    /// Several groups may be joined with `;` (`title,desc;postId`), each group
    /// carrying its own direction. Blank input yields no sort keys.
    pub fn parse_all(text: &str) -> DomainResult<Vec<Self>> {
        let mut orders = Vec::new();

        for group in text.split(';') {
            let mut tokens: Vec<&str> = group
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }

            let direction = match tokens.last().and_then(|t| SortDirection::parse(t)) {
                Some(direction) => {
                    tokens.pop();
                    direction
                }
                None => SortDirection::Asc,
            };

            if tokens.is_empty() {
                return Err(DomainError::Validation(format!(
                    "sort '{}' names no property",
                    group.trim()
                )));
            }

            for token in tokens {
                orders.push(SortOrder {
                    property: token.parse()?,
                    direction,
                });
            }
        }

        Ok(orders)
    }
}

/// Largest number of items a page request may skip
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Requested slice of a collection. `page_index` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<P> {
    pub page_index: u64,
    pub page_size: u64,
    pub sort: Vec<SortOrder<P>>,
}

impl<P> PageRequest<P> {
    pub fn new(page_index: u64, page_size: u64, sort: Vec<SortOrder<P>>) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::Validation(
                "page size must be at least 1".to_string(),
            ));
        }
        // SQL drivers bind OFFSET as a signed 64-bit integer.
        match page_index.checked_mul(page_size) {
            Some(offset) if offset <= MAX_OFFSET => {}
            _ => {
                return Err(DomainError::Validation(format!(
                    "page {} of size {} is out of range",
                    page_index, page_size
                )))
            }
        }
        Ok(Self {
            page_index,
            page_size,
            sort,
        })
    }

    /// Unsorted request for `page_index` / `page_size`
    pub fn of(page_index: u64, page_size: u64) -> DomainResult<Self> {
        Self::new(page_index, page_size, Vec::new())
    }

    /// Number of items to skip before this page
    pub fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// Page of results plus metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_index: u64, page_size: u64, total_elements: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_elements.div_ceil(page_size)
        };
        Self {
            items,
            page_index,
            page_size,
            total_elements,
            total_pages,
        }
    }

    /// Map every item, keeping the page metadata unchanged
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
