//! URL collaborators: [`Permalinks`] resolves item permalinks and
//! [`PageLinks`] produces next/previous page URLs for pagination. Each comes
//! with an implementation based on a base URL ([`PostUrls`] and
//! [`IndexPages`]).

use crate::error::Result;
use crate::item::ContentItem;
use url::Url;

/// Resolves the permalink of a [`ContentItem`]. `Ok(None)` means the item has
/// no permalink, which renders as an empty `href`; `Err` means the resolver
/// itself failed.
pub trait Permalinks {
    fn permalink(&self, item: &ContentItem) -> Result<Option<Url>>;
}

/// Produces the URLs of the pages adjacent to the current one.
pub trait PageLinks {
    /// The URL of the next page, given the total number of pages.
    fn next_page_url(&self, total_pages: usize) -> Result<Option<Url>>;

    /// The URL of the previous page.
    fn previous_page_url(&self) -> Result<Option<Url>>;
}

/// Resolves permalinks as `{posts_url}/{slug}.html`.
pub struct PostUrls {
    /// The prefix for item URLs (e.g., `https://example.org/posts/`). This
    /// should end in a trailing slash, otherwise its last path segment is
    /// replaced when joining.
    pub posts_url: Url,
}

impl PostUrls {
    pub fn new(posts_url: Url) -> PostUrls {
        PostUrls { posts_url }
    }
}

impl Permalinks for PostUrls {
    fn permalink(&self, item: &ContentItem) -> Result<Option<Url>> {
        if item.slug.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.posts_url.join(&format!("{}.html", item.slug))?))
    }
}

/// Produces index page URLs: the first page lives at
/// `{index_url}/index.html`, the second at `{index_url}/1.html`, the third
/// at `{index_url}/2.html`, and so on.
pub struct IndexPages {
    /// The base URL for index pages. Like [`PostUrls::posts_url`], it should
    /// end in a trailing slash.
    pub index_url: Url,

    /// The 1-based number of the page being rendered.
    pub current_page: usize,
}

impl IndexPages {
    pub fn new(index_url: Url, current_page: usize) -> IndexPages {
        IndexPages {
            index_url,
            current_page: current_page.max(1),
        }
    }

    /// Returns the URL of the 1-based page `page`.
    pub fn page_url(&self, page: usize) -> Result<Url> {
        Ok(match page {
            0 | 1 => self.index_url.join("index.html")?,
            _ => self.index_url.join(&format!("{}.html", page - 1))?,
        })
    }
}

impl PageLinks for IndexPages {
    fn next_page_url(&self, total_pages: usize) -> Result<Option<Url>> {
        let next = self.current_page + 1;
        match next <= total_pages {
            false => Ok(None),
            true => Ok(Some(self.page_url(next)?)),
        }
    }

    fn previous_page_url(&self) -> Result<Option<Url>> {
        match self.current_page {
            0 | 1 => Ok(None),
            page => Ok(Some(self.page_url(page - 1)?)),
        }
    }
}
