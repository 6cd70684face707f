//! Pagination contract for collection-valued endpoints.
//!
//! Every list endpoint speaks the same convention: `page` (1-based) and
//! `per_page` query parameters on the way out, RFC 5988 `Link` headers on the
//! way back. [`PageRequest`] describes a bounded window over a remote
//! collection ("starting at page `start_page`, fetch up to `page_count`
//! pages of `page_size` items each"); [`Page`] is the concatenated result,
//! whose items begin at remote position `(start_page - 1) * page_size`.
//!
//! A request for a page past the end of the collection yields an empty
//! [`Page`], never an error. Fetches within one call are strictly
//! sequential.

use crate::errors::{ForgeError, ForgeResult};
use reqwest::header::HeaderMap;

/// Default page size applied by the server when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Pagination links parsed from the `Link` header.
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    /// URL for the next page.
    pub next: Option<String>,
    /// URL for the previous page.
    pub prev: Option<String>,
    /// URL for the first page.
    pub first: Option<String>,
    /// URL for the last page.
    pub last: Option<String>,
}

impl PageLinks {
    /// Parses pagination links from a `Link` header value (RFC 5988).
    pub fn from_header(header_value: &str) -> Self {
        let mut links = Self::default();

        for part in header_value.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if segment.starts_with('<') && segment.ends_with('>') {
                    url = Some(segment[1..segment.len() - 1].to_string());
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"').to_string());
                }
            }

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel.as_str() {
                    "next" => links.next = Some(url),
                    "prev" => links.prev = Some(url),
                    "first" => links.first = Some(url),
                    "last" => links.last = Some(url),
                    _ => {}
                }
            }
        }

        links
    }

    /// Parses pagination links from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Returns true if the server reported a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if the server reported a previous page.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    /// Gets the total page count from the last link.
    pub fn total_pages(&self) -> Option<u32> {
        self.last.as_deref().and_then(extract_page_number)
    }
}

/// A bounded window over a remote collection.
///
/// Immutable value, constructed per call and never persisted. Construction
/// cannot fail; the one constraint violation (any zero field) is reported as
/// an [`InvalidParameter`](crate::ForgeErrorKind::InvalidParameter) error
/// when the request is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_size: u32,
    page_count: u32,
    start_page: u32,
}

impl Default for PageRequest {
    /// One page of the server-conventional size, starting at page 1.
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_count: 1,
            start_page: 1,
        }
    }
}

impl PageRequest {
    /// Creates a request for a single page of `page_size` items, starting at
    /// page 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            page_count: 1,
            start_page: 1,
        }
    }

    /// Sets how many sequential pages to fetch.
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    /// Sets the 1-based page to start from.
    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }

    /// Items per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of sequential pages to fetch.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// First page to fetch (1-based).
    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    /// Checks the contract constraints (`page_size > 0`, `page_count >= 1`,
    /// `start_page >= 1`).
    pub fn validate(&self) -> ForgeResult<()> {
        if self.page_size == 0 {
            return Err(ForgeError::invalid_parameter("page_size must be positive"));
        }
        if self.page_count == 0 {
            return Err(ForgeError::invalid_parameter("page_count must be at least 1"));
        }
        if self.start_page == 0 {
            return Err(ForgeError::invalid_parameter(
                "start_page is 1-based and must be at least 1",
            ));
        }
        Ok(())
    }

    /// Page numbers this request covers, in fetch order.
    pub fn pages(&self) -> std::ops::Range<u32> {
        self.start_page..self.start_page.saturating_add(self.page_count)
    }

    /// Query parameters for one page of this request.
    pub fn query_for(&self, page: u32) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), self.page_size.to_string()),
        ]
    }
}

/// A page of results: the items from up to `page_count` sequential fetches,
/// concatenated in server order.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items, in server-reported order.
    pub items: Vec<T>,
    /// Pagination links from the last fetched page.
    pub links: PageLinks,
    /// First page number fetched (1-based, if known).
    pub start_page: Option<u32>,
    /// Requested items per page (if known).
    pub page_size: Option<u32>,
    /// Sequential fetches actually performed.
    pub pages_fetched: u32,
    /// Total count (if the endpoint envelope reported one).
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, links: PageLinks) -> Self {
        Self {
            items,
            links,
            start_page: None,
            page_size: None,
            pages_fetched: 0,
            total_count: None,
        }
    }

    /// Sets the first fetched page number.
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = Some(page);
        self
    }

    /// Sets the requested page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the number of fetches performed.
    pub fn with_pages_fetched(mut self, pages: u32) -> Self {
        self.pages_fetched = pages;
        self
    }

    /// Sets the server-reported total count.
    pub fn with_total_count(mut self, count: u64) -> Self {
        self.total_count = Some(count);
        self
    }

    /// Returns true if the server reported more data past this page.
    pub fn has_next(&self) -> bool {
        self.links.has_next()
    }

    /// Returns the URL for the next page.
    pub fn next_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Maps the items in this page.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            links: self.links,
            start_page: self.start_page,
            page_size: self.page_size,
            pages_fetched: self.pages_fetched,
            total_count: self.total_count,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Extracts the `page` query parameter from a URL.
pub fn extract_page_number(url: &str) -> Option<u32> {
    url::Url::parse(url).ok().and_then(|u| {
        u.query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_link_header() {
        let header = r#"<https://api.forge.test/repos?page=2>; rel="next", <https://api.forge.test/repos?page=5>; rel="last""#;
        let links = PageLinks::from_header(header);

        assert_eq!(
            links.next,
            Some("https://api.forge.test/repos?page=2".to_string())
        );
        assert_eq!(
            links.last,
            Some("https://api.forge.test/repos?page=5".to_string())
        );
        assert!(links.prev.is_none());
        assert!(links.first.is_none());
    }

    #[test]
    fn test_parse_full_link_header() {
        let header = r#"<https://api.forge.test/repos?page=1>; rel="first", <https://api.forge.test/repos?page=2>; rel="prev", <https://api.forge.test/repos?page=4>; rel="next", <https://api.forge.test/repos?page=5>; rel="last""#;
        let links = PageLinks::from_header(header);

        assert!(links.first.is_some());
        assert!(links.prev.is_some());
        assert!(links.next.is_some());
        assert!(links.last.is_some());
    }

    #[test]
    fn test_total_pages() {
        let header = r#"<https://api.forge.test/repos?page=2>; rel="next", <https://api.forge.test/repos?page=10>; rel="last""#;
        let links = PageLinks::from_header(header);

        assert_eq!(links.total_pages(), Some(10));
    }

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.page_count(), 1);
        assert_eq!(request.start_page(), 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_page_request_covers_expected_pages() {
        let request = PageRequest::new(10).with_page_count(3).with_start_page(4);
        assert_eq!(request.pages().collect::<Vec<_>>(), vec![4, 5, 6]);

        let query = request.query_for(5);
        assert!(query.contains(&("page".to_string(), "5".to_string())));
        assert!(query.contains(&("per_page".to_string(), "10".to_string())));
    }

    #[test_case(0, 1, 1; "zero page size")]
    #[test_case(5, 0, 1; "zero page count")]
    #[test_case(5, 1, 0; "zero start page")]
    fn test_page_request_rejects_zero_fields(size: u32, count: u32, start: u32) {
        let request = PageRequest::new(size)
            .with_page_count(count)
            .with_start_page(start);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_page_operations() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], PageLinks::default())
            .with_start_page(1)
            .with_page_size(30)
            .with_pages_fetched(1)
            .with_total_count(100);

        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.start_page, Some(1));
        assert_eq!(page.page_size, Some(30));
        assert_eq!(page.pages_fetched, 1);
        assert_eq!(page.total_count, Some(100));

        let doubled = page.map(|n| n * 2);
        assert_eq!(doubled.items, vec![2, 4, 6]);
    }

    #[test]
    fn test_extract_page_number() {
        assert_eq!(
            extract_page_number("https://api.forge.test/repos?per_page=5&page=7"),
            Some(7)
        );
        assert_eq!(extract_page_number("https://api.forge.test/repos"), None);
    }
}
