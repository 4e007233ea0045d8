//! Renders sub-navigation menus: either the children of the current item's
//! top-most ancestor, or an explicit list of items.

use crate::context::Context;
use crate::error::Result;
use crate::html::escape;
use crate::item::ContentItem;
use crate::post::Post;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Where the entries of a [`SubNav`] come from.
pub enum NavSource<'s> {
    /// The children of the current item's top-most ancestor, by menu order.
    ChildPages,

    /// A given list of items, in order.
    Items(Vec<&'s ContentItem>),
}

impl NavSource<'_> {
    fn list_class(&self) -> &'static str {
        match self {
            NavSource::ChildPages => "nav sidebar-nav",
            NavSource::Items(_) => "nav subnav",
        }
    }
}

/// An extra entry placed before or after the source's entries.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEntry {
    /// The item with this identifier.
    Item(u64),

    /// The top-most ancestor of the current item.
    TopParent,
}

/// A sub-navigation menu around the item currently being viewed.
pub struct SubNav<'s> {
    current: &'s ContentItem,
    source: NavSource<'s>,
    before: Vec<NavEntry>,
    after: Vec<NavEntry>,
    appendments: HashMap<u64, String>,
    class_additions: HashMap<u64, String>,
    home: Option<Url>,
}

impl<'s> SubNav<'s> {
    pub fn new(current: &'s ContentItem, source: NavSource<'s>) -> SubNav<'s> {
        SubNav {
            current,
            source,
            before: Vec::new(),
            after: Vec::new(),
            appendments: HashMap::new(),
            class_additions: HashMap::new(),
            home: None,
        }
    }

    pub fn before(mut self, entries: Vec<NavEntry>) -> SubNav<'s> {
        self.before = entries;
        self
    }

    pub fn after(mut self, entries: Vec<NavEntry>) -> SubNav<'s> {
        self.after = entries;
        self
    }

    /// Appends raw markup after the link of item `id`.
    pub fn append(mut self, id: u64, markup: &str) -> SubNav<'s> {
        self.appendments.insert(id, markup.to_owned());
        self
    }

    /// Adds extra classes to the entry of item `id`.
    pub fn add_class(mut self, id: u64, class: &str) -> SubNav<'s> {
        self.class_additions.insert(id, class.to_owned());
        self
    }

    /// Sets the site's home URL. Links to another origin open in a new tab.
    pub fn home(mut self, home: Url) -> SubNav<'s> {
        self.home = Some(home);
        self
    }

    /// Walks up the parent chain of the current item. The walk stops at an
    /// item without a parent, at a parent missing from the store, or when an
    /// item repeats.
    pub fn top_parent<'c>(&self, context: &Context<'c>) -> &'c ContentItem
    where
        's: 'c,
    {
        let mut top: &'c ContentItem = self.current;
        let mut seen = HashSet::new();
        seen.insert(top.id);
        while let Some(parent) =
            top.parent.and_then(|id| context.store.item(id))
        {
            if !seen.insert(parent.id) {
                log::warn!("parent chain of item {} has a cycle", self.current.id);
                break;
            }
            top = parent;
        }
        top
    }

    /// Renders the menu as a `<ul>`.
    pub fn to_html(&self, context: &Context<'_>) -> Result<String> {
        let mut out = String::new();
        for entry in &self.before {
            self.push_entry(&mut out, context, entry)?;
        }
        match &self.source {
            NavSource::ChildPages => {
                let top = self.top_parent(context);
                for item in context.store.children(top.id) {
                    self.push_item(&mut out, context, item)?;
                }
            }
            NavSource::Items(items) => {
                for item in items {
                    self.push_item(&mut out, context, item)?;
                }
            }
        }
        for entry in &self.after {
            self.push_entry(&mut out, context, entry)?;
        }
        Ok(format!(
            r#"<ul class="{}">{}</ul>"#,
            self.source.list_class(),
            out
        ))
    }

    fn push_entry(
        &self,
        out: &mut String,
        context: &Context<'_>,
        entry: &NavEntry,
    ) -> Result<()> {
        let item = match entry {
            NavEntry::TopParent => Some(self.top_parent(context)),
            NavEntry::Item(id) => context.store.item(*id),
        };
        match item {
            Some(item) => self.push_item(out, context, item),
            None => {
                log::warn!("sub-navigation entry {:?} not found", entry);
                Ok(())
            }
        }
    }

    fn push_item(
        &self,
        out: &mut String,
        context: &Context<'_>,
        item: &ContentItem,
    ) -> Result<()> {
        let post = Post::new(item, context);
        let href = post.href()?;
        let title = escape(&post.title()?);
        let active = match item.id == self.current.id {
            true => "active",
            false => "",
        };
        let extra = self
            .class_additions
            .get(&item.id)
            .map(String::as_str)
            .unwrap_or_default();
        let target = match self.is_external(post.permalink()?) {
            true => r#" target="_blank""#,
            false => "",
        };
        let append = self
            .appendments
            .get(&item.id)
            .map(String::as_str)
            .unwrap_or_default();

        out.push_str(&format!(
            r#"<li class="{} {}"><a href="{}" title="{}"{}>{}</a>{}</li>"#,
            active,
            escape(extra),
            escape(&href),
            title,
            target,
            title,
            append,
        ));
        Ok(())
    }

    fn is_external(&self, link: Option<&Url>) -> bool {
        match (&self.home, link) {
            (Some(home), Some(link)) => home.origin() != link.origin(),
            _ => false,
        }
    }
}
