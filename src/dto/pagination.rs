use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::media::MediaBase;

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Row offset of the page, `None` when it does not fit in `i64`.
    pub fn offset(&self) -> Option<i64> {
        (self.page - 1).checked_mul(self.per_page)
    }

    /// Page 1 always exists; any later page must hold at least one row.
    /// Returns the offset to query with.
    pub fn ensure_in_range(&self, total: i64) -> Result<i64> {
        match self.offset() {
            Some(offset) if self.page == 1 || offset < total => Ok(offset),
            _ => Err(Error::NotFound("Invalid page.".to_string())),
        }
    }
}

pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: PageRequest,
}

impl<T> Listing<T> {
    pub fn has_next(&self) -> bool {
        self.page
            .page
            .checked_mul(self.page.per_page)
            .map_or(false, |seen| seen < self.total)
    }
}

/// Paginated envelope: `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn from_listing<S>(
        listing: Listing<S>,
        links: &PageLinks,
        map: impl FnMut(S) -> T,
    ) -> Self {
        let page = listing.page.page;
        let next = listing.has_next().then(|| links.link(page + 1));
        let previous = (page > 1).then(|| links.link(page - 1));
        Self {
            count: listing.total,
            next,
            previous,
            results: listing.items.into_iter().map(map).collect(),
        }
    }
}

/// Rebuilds the request URL with a different `page` parameter.
pub struct PageLinks {
    origin: Option<String>,
    path: String,
    params: Vec<(String, String)>,
}

impl PageLinks {
    pub fn new(media: &MediaBase, uri: &Uri) -> Self {
        let params = uri
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .filter(|(key, _)| key != "page")
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            origin: media.0.clone(),
            path: uri.path().to_string(),
            params,
        }
    }

    pub fn link(&self, page: i64) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            query.append_pair(key, value);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
        let query = query.finish();

        let mut link = format!("{}{}", self.origin.as_deref().unwrap_or(""), self.path);
        if !query.is_empty() {
            link.push('?');
            link.push_str(&query);
        }
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(uri: &str) -> PageLinks {
        PageLinks::new(
            &MediaBase(Some("http://localhost:8000".into())),
            &uri.parse::<Uri>().unwrap(),
        )
    }

    #[test]
    fn page_request_clamps_values() {
        let req = PageRequest::new(Some(0), 1000);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 100);
        assert_eq!(PageRequest::new(Some(3), 10).offset(), Some(20));
    }

    #[test]
    fn out_of_range_page_is_not_found() {
        let req = PageRequest::new(Some(3), 10);
        assert!(req.ensure_in_range(20).is_err());
        assert!(req.ensure_in_range(21).is_ok());
        assert!(PageRequest::new(None, 10).ensure_in_range(0).is_ok());
    }

    #[test]
    fn huge_page_number_is_not_found() {
        let req = PageRequest::new(Some(i64::MAX), 10);
        assert_eq!(req.offset(), None);
        assert!(matches!(req.ensure_in_range(5), Err(Error::NotFound(_))));

        let listing = Listing::<i64> {
            items: vec![],
            total: 5,
            page: req,
        };
        assert!(!listing.has_next());
    }

    #[test]
    fn links_keep_filters_and_replace_page() {
        let links = links("/api/news?search=suv&page=2");
        assert_eq!(links.link(3), "http://localhost:8000/api/news?search=suv&page=3");
        assert_eq!(links.link(1), "http://localhost:8000/api/news?search=suv");
    }

    #[test]
    fn envelope_sets_next_and_previous() {
        let listing = Listing {
            items: vec![1, 2],
            total: 5,
            page: PageRequest::new(Some(2), 2),
        };
        let page = Page::from_listing(listing, &links("/api/banners?page=2"), |n| n * 10);
        assert_eq!(page.count, 5);
        assert_eq!(page.results, vec![10, 20]);
        assert_eq!(page.next.as_deref(), Some("http://localhost:8000/api/banners?page=3"));
        assert_eq!(page.previous.as_deref(), Some("http://localhost:8000/api/banners"));
    }
}
