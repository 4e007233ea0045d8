//! Defines [`Post`], a decorator over a [`ContentItem`] with memoized
//! accessors and registry dispatch, and [`RenderItem`], a [`Post`] carrying
//! the classes and options assigned to it during a list render.

use crate::classify::{Assigned, Slot};
use crate::context::Context;
use crate::error::Result;
use crate::excerpt::{Excerpt, ExcerptConfig};
use crate::html::escape;
use crate::item::{Author, ContentItem, Term};
use once_cell::unsync::OnceCell;
use std::ops::Deref;
use url::Url;

/// Wraps a [`ContentItem`] with accessors that go through the collaborators
/// of a [`Context`]. The permalink and the excerpt are computed at most once
/// per [`Post`].
pub struct Post<'a> {
    item: &'a ContentItem,
    context: &'a Context<'a>,
    permalink: OnceCell<Option<Url>>,
    excerpt: OnceCell<Excerpt>,
}

impl<'a> Post<'a> {
    pub fn new(item: &'a ContentItem, context: &'a Context<'a>) -> Post<'a> {
        Post {
            item,
            context,
            permalink: OnceCell::new(),
            excerpt: OnceCell::new(),
        }
    }

    /// Creates a post whose permalink is already known.
    pub fn with_permalink(
        item: &'a ContentItem,
        context: &'a Context<'a>,
        permalink: Option<Url>,
    ) -> Post<'a> {
        let post = Post::new(item, context);
        // the cell was just created, so this can't fail
        let _ = post.permalink.set(permalink);
        post
    }

    /// The wrapped item.
    pub fn item(&self) -> &'a ContentItem {
        self.item
    }

    pub fn context(&self) -> &'a Context<'a> {
        self.context
    }

    pub fn id(&self) -> u64 {
        self.item.id
    }

    /// Returns the item's permalink, resolving it on first use.
    pub fn permalink(&self) -> Result<Option<&Url>> {
        self.permalink
            .get_or_try_init(|| self.context.permalinks.permalink(self.item))
            .map(Option::as_ref)
    }

    /// Returns the permalink as a string, empty when the item has none.
    pub fn href(&self) -> Result<String> {
        Ok(self.permalink()?.map(Url::to_string).unwrap_or_default())
    }

    /// Returns the title after the title filter hook.
    pub fn title(&self) -> Result<String> {
        self.context.filter.filter_title(&self.item.title)
    }

    /// Returns the body after the content filter hook.
    pub fn content(&self) -> Result<String> {
        self.context.filter.filter_content(&self.item.body)
    }

    pub fn author_record(&self) -> Option<&'a Author> {
        self.context.store.author(self.item.author)
    }

    /// Returns the author's display name after the author filter hook, or
    /// `None` when the author is unknown.
    pub fn author(&self) -> Result<Option<String>> {
        match self.author_record() {
            None => Ok(None),
            Some(author) => Ok(Some(
                self.context.filter.filter_author(&author.display_name)?,
            )),
        }
    }

    /// Renders the featured image as an `<img>` tag, or `None` when the item
    /// has no featured image.
    pub fn thumbnail(&self, class: &str) -> Option<String> {
        let src = self.item.thumbnail.as_deref()?;
        let title = escape(&self.item.title);
        Some(format!(
            r#"<img src="{}" class="{}" alt="{}" title="{}">"#,
            escape(src),
            escape(class),
            title,
            title,
        ))
    }

    /// Returns the item's terms in `taxonomy`.
    pub fn terms<'t>(
        &self,
        taxonomy: &'t str,
    ) -> impl Iterator<Item = &'a Term> + 't
    where
        'a: 't,
    {
        let item: &'a ContentItem = self.item;
        item.terms.iter().filter(move |t| t.taxonomy == taxonomy)
    }

    pub fn meta(&self, key: &str) -> Option<&'a str> {
        self.item.meta.get(key).map(String::as_str)
    }

    /// Returns the excerpt built with the context's [`ExcerptConfig`].
    pub fn excerpt(&self) -> Result<&Excerpt> {
        self.excerpt_with(&self.context.excerpt)
    }

    /// Returns the excerpt built with `config`. The first excerpt built for a
    /// post is kept: later calls return it whatever their `config`.
    pub fn excerpt_with(&self, config: &ExcerptConfig) -> Result<&Excerpt> {
        self.excerpt.get_or_try_init(|| {
            let permalink = match config.show_more_link {
                true => self.permalink()?,
                false => None,
            };
            Excerpt::build(self.item, permalink, self.context.filter, config)
        })
    }

    /// Renders the excerpt paragraph.
    pub fn excerpt_html(&self) -> Result<String> {
        Ok(self.excerpt()?.to_html())
    }

    /// Renders `<a href="…" title="…">title</a>`.
    pub fn linked_title(&self) -> Result<String> {
        let title = self.title()?;
        Ok(format!(
            r#"<a href="{}" title="{}">{}</a>"#,
            escape(&self.href()?),
            escape(&title),
            title,
        ))
    }

    /// Runs the registered test `name` against this post, or returns `None`
    /// when no such test is registered.
    pub fn test(&self, name: &str) -> Option<bool> {
        self.context.registry.test(name).map(|test| test(self))
    }

    /// Renders the registered partial `name`, or returns `None` when no such
    /// partial is registered.
    pub fn partial(&self, name: &str) -> Option<Result<String>> {
        self.context.registry.partial(name).map(|partial| partial(self))
    }
}

/// A [`Post`] being rendered as part of a list, along with its position in
/// the list and the classes and options assigned to it. Render items are
/// created fresh for every render pass.
pub struct RenderItem<'a> {
    post: Post<'a>,
    position: usize,
    classes: Assigned,
    options: Assigned,
}

impl<'a> RenderItem<'a> {
    pub fn new(post: Post<'a>, position: usize) -> RenderItem<'a> {
        RenderItem {
            post,
            position,
            classes: Assigned::default(),
            options: Assigned::default(),
        }
    }

    /// The zero-based position of the item across the whole render pass.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn post(&self) -> &Post<'a> {
        &self.post
    }

    /// Returns the classes for `context`: [`crate::classify::ALL`] joins the
    /// unnamed classes, anything else names a context. `None` means the
    /// context was never assigned.
    pub fn classes(&self, context: &str) -> Option<String> {
        self.classes.get(context)
    }

    /// Returns the unnamed options in assignment order.
    pub fn options(&self) -> &[String] {
        self.options.unnamed()
    }

    /// Returns a named option.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.named(name)
    }

    /// Returns ` class="…"` holding all unnamed classes, or an empty string
    /// when there are none.
    pub fn class_attr(&self) -> String {
        match self.classes.unnamed() {
            [] => String::new(),
            _ => format!(r#" class="{}""#, escape(&self.classes.joined())),
        }
    }

    pub(crate) fn assigned_mut(&mut self, slot: Slot) -> &mut Assigned {
        match slot {
            Slot::Classes => &mut self.classes,
            Slot::Options => &mut self.options,
        }
    }

    /// Renders the item with the registered format `format`, falling back to
    /// the `default` format. Returns `None` when neither is registered.
    pub fn to_html(&self, format: Option<&str>) -> Option<Result<String>> {
        self.post
            .context
            .registry
            .resolve_format(format)
            .map(|format| format(self))
    }
}

impl<'a> Deref for RenderItem<'a> {
    type Target = Post<'a>;

    fn deref(&self) -> &Post<'a> {
        &self.post
    }
}
