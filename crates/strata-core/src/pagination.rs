//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
///
/// Always normalized: `page >= 1` and `1 <= size <= MAX_SIZE`, whether built
/// with [`PageRequest::new`] or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: usize,
    size: usize,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: usize,
    #[serde(default)]
    size: usize,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.size)
    }
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 20;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request.
    ///
    /// A page of 0 is treated as the first page and a size of 0 as the
    /// default size; sizes above [`Self::MAX_SIZE`] are clamped.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        let size = if size == 0 { Self::DEFAULT_SIZE } else { size };
        Self {
            page: page.max(1),
            size: size.min(Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// The page number (1-indexed).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the offset for storage queries, saturating for huge pages.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Returns the limit for storage queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The current page number (1-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
    /// The number of items on this page.
    pub number_of_elements: usize,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(page: usize, size: usize, total_elements: u64, number_of_elements: usize) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(size as u64)
        } else {
            0
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page <= 1,
            last: page as u64 >= total_pages,
            number_of_elements,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: u64) -> Self {
        let number_of_elements = content.len();
        Self {
            content,
            info: PageInfo::new(page, size, total_elements, number_of_elements),
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(page: usize, size: usize) -> Self {
        Self::new(Vec::new(), page, size, 0)
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.info.total_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_page_request_normalization() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.size(), PageRequest::DEFAULT_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_page_request_max_size() {
        let req = PageRequest::new(1, 1000);
        assert_eq!(req.size(), PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let req = PageRequest::new(usize::MAX, 100);
        assert_eq!(req.offset(), usize::MAX);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let req: PageRequest = serde_json::from_str(r#"{"page":0,"size":20}"#).unwrap();
        assert_eq!(req, PageRequest::new(1, 20));
        assert_eq!(req.offset(), 0);

        let req: PageRequest = serde_json::from_str(r#"{"page":2,"size":5000}"#).unwrap();
        assert_eq!(req.size(), PageRequest::MAX_SIZE);

        let req: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, PageRequest::first());
    }

    #[test]
    fn test_page_info() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 1, 10, 25);
        assert!(page.info.first);
        assert!(!page.info.last);
        assert_eq!(page.info.total_pages, 3);
    }

    #[test]
    fn test_page_info_last_page() {
        let page: Page<i32> = Page::new(vec![1, 2], 3, 10, 22);
        assert!(!page.info.first);
        assert!(page.info.last);
    }

    #[test]
    fn test_page_empty() {
        let page: Page<i32> = Page::empty(1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 0);
        assert_eq!(page.info.total_pages, 0);
        assert!(page.info.last);
    }
}
