//! Renders previous/next page navigation.

use crate::error::Result;
use crate::html::encode_bare_ampersands;
use crate::links::PageLinks;
use serde::Deserialize;
use url::Url;

/// Reports whether a page follows `current` among `total` pages, i.e.
/// whether `current + 1 <= total`.
pub fn has_next(current: usize, total: usize) -> bool {
    current < total
}

/// Reports whether a page precedes `current`.
pub fn has_previous(current: usize) -> bool {
    current > 1
}

/// The link labels of the pager.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub previous: String,
    pub next: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            previous: String::from("&lsaquo; PREV"),
            next: String::from("NEXT &rsaquo;"),
        }
    }
}

/// The page counters of a query result plus the pager labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    /// The 1-based current page. A current page of 0 is treated as 1.
    pub current: usize,

    pub total: usize,

    pub labels: Labels,
}

impl Pagination {
    pub fn new(current: usize, total: usize) -> Pagination {
        Pagination {
            current: current.max(1),
            total,
            labels: Labels::default(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Pagination {
        self.labels = labels;
        self
    }

    pub fn has_next(&self) -> bool {
        has_next(self.current, self.total)
    }

    pub fn has_previous(&self) -> bool {
        has_previous(self.current)
    }

    /// Renders the pager, taking page URLs from `links`. Renders nothing when
    /// there is at most one page. A side whose page doesn't exist, or whose
    /// URL `links` can't provide, renders as a disabled placeholder.
    pub fn to_html(&self, links: &dyn PageLinks) -> Result<String> {
        if self.total <= 1 {
            return Ok(String::new());
        }

        let previous = match self.has_previous() {
            true => links.previous_page_url()?,
            false => None,
        };
        let next = match self.has_next() {
            true => links.next_page_url(self.total)?,
            false => None,
        };

        Ok(format!(
            r#"<nav id="post-nav"><ul class="pager">{}{}</ul></nav>"#,
            pager_item("previous", &self.labels.previous, previous.as_ref()),
            pager_item("next", &self.labels.next, next.as_ref()),
        ))
    }
}

// Only linked labels have their bare ampersands encoded; disabled labels are
// written as configured.
fn pager_item(class: &str, label: &str, url: Option<&Url>) -> String {
    match url {
        Some(url) => format!(
            r#"<li class="{}"><a href="{}">{}</a></li>"#,
            class,
            url,
            encode_bare_ampersands(label)
        ),
        None => format!(r#"<li class="{} disabled"><a>{}</a></li>"#, class, label),
    }
}
