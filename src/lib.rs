//! The library code for `postkit`, which renders the markup a
//! content-managed site needs around its posts: excerpts, classified and
//! chunked post lists, previous/next pagination, and sub-navigation menus.
//!
//! Rendering is driven by a [`context::Context`] that borrows the
//! collaborators supplied by the host system:
//!
//! 1. a [`filter::ContentFilter`] for the content, title, and author hooks
//!    ([`markdown::MarkdownFilter`] renders Markdown bodies)
//! 2. a [`links::Permalinks`] resolver for item URLs
//! 3. a [`store::ContentStore`] for item, child, and author lookups
//! 4. a [`registry::Registry`] of named tests, partials, formats, and chunk
//!    wrappers
//!
//! Items can be loaded from Markdown files with [`parser::Parser`] and
//! rendering settings from a `postkit.yaml` file with [`config::Config`].
//! Nothing here installs a logger; diagnostics go through the [`log`] facade.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod chunk;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod excerpt;
pub mod filter;
pub mod html;
pub mod item;
pub mod links;
pub mod list;
pub mod markdown;
pub mod pagination;
pub mod parser;
pub mod post;
pub mod registry;
pub mod store;
pub mod subnav;
pub mod template;
pub mod truncate;

pub use crate::context::Context;
pub use crate::error::{Error, Result};
pub use crate::excerpt::{Excerpt, ExcerptConfig};
pub use crate::item::{ContentItem, QueryResult};
pub use crate::list::{ListOptions, PostList};
pub use crate::pagination::Pagination;
pub use crate::registry::Registry;

use crate::links::PageLinks;
use crate::post::Post;

/// Renders the excerpt paragraph of `item` with the context's
/// [`ExcerptConfig`].
pub fn build_excerpt(
    context: &Context<'_>,
    item: &ContentItem,
) -> Result<String> {
    Post::new(item, context).excerpt_html()
}

/// Renders `query` as a wrapped list.
pub fn render_list(
    context: &Context<'_>,
    query: &QueryResult,
    options: ListOptions,
) -> Result<String> {
    PostList::new(query, options).to_html(context, true)
}

/// Renders the pager for page `current` of `total`. Empty when `total` is at
/// most 1.
pub fn render_pagination(
    current: usize,
    total: usize,
    links: &dyn PageLinks,
) -> Result<String> {
    Pagination::new(current, total).to_html(links)
}
