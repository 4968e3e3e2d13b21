//! Paged collections: a count, a page size and a way to fetch a slice.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Failure to produce a requested page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("That page number is less than 1")]
    LessThanOne,

    #[error("That page contains no results")]
    NoResults,

    /// The underlying collection failed.
    #[error(transparent)]
    Source(#[from] AppError),
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::LessThanOne | PageError::NoResults => AppError::NotFound("Page".to_string()),
            PageError::Source(e) => e,
        }
    }
}

/// A collection that can be split into numbered pages of `per_page` items.
///
/// Implementors provide the item count and slice access; page validation,
/// page ranges and [`Page`] construction come from the provided methods.
/// There is always at least one page, which is empty when the collection is.
#[async_trait]
pub trait PagedCollection: Send + Sync {
    type Item: Send;

    /// Total number of items.
    async fn count(&self) -> AppResult<u64>;

    /// Items per page, at least 1.
    fn per_page(&self) -> u64;

    /// Load up to `limit` items starting at `offset`.
    async fn fetch(&self, offset: u64, limit: u64) -> AppResult<Vec<Self::Item>>;

    async fn num_pages(&self) -> AppResult<u64> {
        let count = self.count().await?;
        Ok(num_pages_for(count, self.per_page()))
    }

    /// All valid page numbers, ascending from 1.
    async fn page_range(&self) -> AppResult<Vec<i64>> {
        let num_pages = self.num_pages().await?;
        Ok((1..=num_pages as i64).collect())
    }

    async fn validate_number(&self, number: i64) -> Result<i64, PageError> {
        if number < 1 {
            return Err(PageError::LessThanOne);
        }
        if number as u64 > self.num_pages().await? {
            return Err(PageError::NoResults);
        }
        Ok(number)
    }

    async fn page(&self, number: i64) -> Result<Page<Self::Item>, PageError> {
        let number = self.validate_number(number).await?;
        let per_page = self.per_page().max(1);
        let count = self.count().await?;
        let offset = (number as u64 - 1) * per_page;
        let object_list = self.fetch(offset, per_page).await?;

        Ok(Page {
            object_list,
            number,
            per_page,
            count,
            num_pages: num_pages_for(count, per_page),
        })
    }
}

fn num_pages_for(count: u64, per_page: u64) -> u64 {
    count.div_ceil(per_page.max(1)).max(1)
}

/// One page of a [`PagedCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub object_list: Vec<T>,
    /// 1-based page number.
    pub number: i64,
    per_page: u64,
    count: u64,
    num_pages: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        (self.number as u64) < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<i64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<i64> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 for an empty collection.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.per_page * (self.number as u64 - 1) + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> u64 {
        if self.number as u64 == self.num_pages {
            self.count
        } else {
            self.number as u64 * self.per_page
        }
    }

    /// Convert the items, keeping the page position.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            object_list: self.object_list.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
        }
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            start_index: self.start_index(),
            end_index: self.end_index(),
        }
    }
}

/// Page position metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub number: i64,
    pub per_page: u64,
    /// Total items across all pages.
    pub count: u64,
    pub num_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub start_index: u64,
    pub end_index: u64,
}

/// In-memory paged collection.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: u64,
}

impl<T> Paginator<T> {
    /// A `per_page` of 0 is treated as 1.
    pub fn new(items: Vec<T>, per_page: u64) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }
}

#[async_trait]
impl<T> PagedCollection for Paginator<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    async fn count(&self) -> AppResult<u64> {
        Ok(self.items.len() as u64)
    }

    fn per_page(&self) -> u64 {
        self.per_page
    }

    async fn fetch(&self, offset: u64, limit: u64) -> AppResult<Vec<T>> {
        Ok(self
            .items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(n: usize) -> Paginator<char> {
        Paginator::new(('a'..='z').take(n).collect(), 3)
    }

    #[actix_rt::test]
    async fn test_num_pages_rounds_up() {
        assert_eq!(letters(9).num_pages().await.unwrap(), 3);
        assert_eq!(letters(10).num_pages().await.unwrap(), 4);
        assert_eq!(letters(1).num_pages().await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn test_empty_collection_has_one_page() {
        let paginator = letters(0);

        assert_eq!(paginator.num_pages().await.unwrap(), 1);
        assert_eq!(paginator.page_range().await.unwrap(), vec![1]);

        let page = paginator.page(1).await.unwrap();
        assert!(page.object_list.is_empty());
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[actix_rt::test]
    async fn test_last_page_is_partial() {
        let page = letters(10).page(4).await.unwrap();

        assert_eq!(page.object_list, vec!['j']);
        assert_eq!(page.start_index(), 10);
        assert_eq!(page.end_index(), 10);
        assert_eq!(page.previous_page_number(), Some(3));
        assert_eq!(page.next_page_number(), None);
    }

    #[actix_rt::test]
    async fn test_middle_page_navigation() {
        let page = letters(10).page(2).await.unwrap();

        assert_eq!(page.object_list, vec!['d', 'e', 'f']);
        assert_eq!(page.start_index(), 4);
        assert_eq!(page.end_index(), 6);

        let meta = page.meta();
        assert_eq!(meta.count, 10);
        assert_eq!(meta.num_pages, 4);
        assert!(meta.has_next);
        assert!(meta.has_previous);
    }

    #[actix_rt::test]
    async fn test_invalid_page_numbers() {
        let paginator = letters(10);

        assert!(matches!(paginator.page(0).await, Err(PageError::LessThanOne)));
        assert!(matches!(paginator.page(-7).await, Err(PageError::LessThanOne)));
        assert!(matches!(paginator.page(5).await, Err(PageError::NoResults)));
    }

    #[test]
    fn test_page_errors_map_to_not_found() {
        assert!(matches!(
            AppError::from(PageError::NoResults),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(PageError::Source(AppError::Database("down".into()))),
            AppError::Database(_)
        ));
    }

    #[actix_rt::test]
    async fn test_zero_per_page_is_one() {
        let paginator = Paginator::new(vec![1, 2, 3], 0);

        assert_eq!(paginator.per_page(), 1);
        assert_eq!(paginator.num_pages().await.unwrap(), 3);
    }

    #[actix_rt::test]
    async fn test_map_keeps_position() {
        let page = letters(10).page(2).await.unwrap().map(|c| c.to_ascii_uppercase());

        assert_eq!(page.object_list, vec!['D', 'E', 'F']);
        assert_eq!(page.number, 2);
        assert!(page.has_next());
    }
}
