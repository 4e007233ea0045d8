//! Defines the [`Registry`] of named tests, partials, formats, and chunk
//! wrappers, plus the built-in formats registered by
//! [`Registry::with_builtins`].
//!
//! A registry is populated before rendering starts. Renders only ever borrow
//! it immutably through [`crate::context::Context`].

use crate::error::Result;
use crate::post::{Post, RenderItem};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The name under which the default format is stored.
pub const DEFAULT_FORMAT: &str = "default";

/// A named predicate over a post.
pub type TestFn = Box<dyn Fn(&Post<'_>) -> bool>;

/// A named markup fragment rendered from a post.
pub type PartialFn = Box<dyn Fn(&Post<'_>) -> Result<String>>;

/// Renders one list item. Formats are reference counted so the default
/// format can share its function with its named entry.
pub type FormatFn = Rc<dyn Fn(&RenderItem<'_>) -> Result<String>>;

/// Wraps the markup of one chunk, given its zero-based index.
pub type ChunkWrapperFn = Box<dyn Fn(&str, usize) -> String>;

#[derive(Default)]
pub struct Registry {
    tests: HashMap<String, TestFn>,
    partials: HashMap<String, PartialFn>,
    formats: HashMap<String, FormatFn>,
    chunk_wrappers: HashMap<String, ChunkWrapperFn>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Creates a registry holding the built-in formats and chunk wrappers:
    ///
    /// * `linked_title`: the title linked to the permalink
    /// * `linked_title_and_date`: plus the publish date in a `<span>`
    /// * `linked_title_and_content`: plus the filtered body
    /// * `linked_title_and_excerpt`: plus the excerpt paragraph (the default)
    /// * `row` (chunk wrapper): `<div class="row row-{index}">…</div>`
    ///
    /// Every built-in format wraps its output in an `<li>` carrying the
    /// item's unnamed classes.
    pub fn with_builtins() -> Registry {
        let mut registry = Registry::new();
        registry.register_format(
            "linked_title",
            |item| list_item(item, item.linked_title()?),
            false,
        );
        registry.register_format(
            "linked_title_and_date",
            |item| {
                let date = item.item().published.format("%Y-%m-%d %H:%M:%S");
                list_item(item, format!("{}<span>{}</span>", item.linked_title()?, date))
            },
            false,
        );
        registry.register_format(
            "linked_title_and_content",
            |item| {
                list_item(
                    item,
                    format!("{}<div>{}</div>", item.linked_title()?, item.content()?),
                )
            },
            false,
        );
        registry.register_format(
            "linked_title_and_excerpt",
            |item| {
                let title = item.linked_title()?;
                list_item(item, format!("{}{}", title, item.excerpt_html()?))
            },
            true,
        );
        registry.register_chunk_wrapper("row", |inner, index| {
            format!(r#"<div class="row row-{}">{}</div>"#, index, inner)
        });
        registry
    }

    pub fn register_test<F>(&mut self, name: &str, f: F) -> &mut Registry
    where
        F: Fn(&Post<'_>) -> bool + 'static,
    {
        self.tests.insert(name.to_owned(), Box::new(f));
        self
    }

    pub fn register_partial<F>(&mut self, name: &str, f: F) -> &mut Registry
    where
        F: Fn(&Post<'_>) -> Result<String> + 'static,
    {
        self.partials.insert(name.to_owned(), Box::new(f));
        self
    }

    /// Registers a format. With `default` set, the format is also stored as
    /// [`DEFAULT_FORMAT`], replacing any previous default.
    pub fn register_format<F>(
        &mut self,
        name: &str,
        f: F,
        default: bool,
    ) -> &mut Registry
    where
        F: Fn(&RenderItem<'_>) -> Result<String> + 'static,
    {
        let f: FormatFn = Rc::new(f);
        if default {
            self.formats.insert(DEFAULT_FORMAT.to_owned(), Rc::clone(&f));
        }
        self.formats.insert(name.to_owned(), f);
        self
    }

    pub fn register_chunk_wrapper<F>(
        &mut self,
        name: &str,
        f: F,
    ) -> &mut Registry
    where
        F: Fn(&str, usize) -> String + 'static,
    {
        self.chunk_wrappers.insert(name.to_owned(), Box::new(f));
        self
    }

    pub fn test(&self, name: &str) -> Option<&TestFn> {
        self.tests.get(name)
    }

    pub fn partial(&self, name: &str) -> Option<&PartialFn> {
        self.partials.get(name)
    }

    pub fn format(&self, name: &str) -> Option<&FormatFn> {
        self.formats.get(name)
    }

    /// Resolves the format to render with: `name` if it is registered,
    /// otherwise the default format, if any.
    pub fn resolve_format(&self, name: Option<&str>) -> Option<&FormatFn> {
        name.and_then(|name| self.format(name))
            .or_else(|| self.format(DEFAULT_FORMAT))
    }

    pub fn chunk_wrapper(&self, name: &str) -> Option<&ChunkWrapperFn> {
        self.chunk_wrappers.get(name)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn names<V>(m: &HashMap<String, V>) -> Vec<&str> {
            let mut names: Vec<&str> = m.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }
        f.debug_struct("Registry")
            .field("tests", &names(&self.tests))
            .field("partials", &names(&self.partials))
            .field("formats", &names(&self.formats))
            .field("chunk_wrappers", &names(&self.chunk_wrappers))
            .finish()
    }
}

fn list_item(item: &RenderItem<'_>, inner: String) -> Result<String> {
    Ok(format!("<li{}>{}</li>", item.class_attr(), inner))
}
