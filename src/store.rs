//! The [`ContentStore`] seam for looking up items and authors, plus an
//! in-memory implementation ([`MemoryStore`]).

use crate::item::{Author, ContentItem};
use std::collections::HashMap;

/// Read-only lookups against the content-management system.
pub trait ContentStore {
    /// Returns the item with identifier `id`.
    fn item(&self, id: u64) -> Option<&ContentItem>;

    /// Returns the direct children of `parent`, ordered by
    /// [`ContentItem::menu_order`] ascending.
    fn children(&self, parent: u64) -> Vec<&ContentItem>;

    /// Returns the author with identifier `id`.
    fn author(&self, id: u64) -> Option<&Author>;
}

/// A [`ContentStore`] over items and authors held in memory.
#[derive(Default)]
pub struct MemoryStore {
    items: Vec<ContentItem>,
    index: HashMap<u64, usize>,
    authors: HashMap<u64, Author>,
}

impl MemoryStore {
    pub fn new(items: Vec<ContentItem>, authors: Vec<Author>) -> MemoryStore {
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id, i))
            .collect();
        MemoryStore {
            items,
            index,
            authors: authors.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }
}

impl ContentStore for MemoryStore {
    fn item(&self, id: u64) -> Option<&ContentItem> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    fn children(&self, parent: u64) -> Vec<&ContentItem> {
        let mut children: Vec<&ContentItem> = self
            .items
            .iter()
            .filter(|item| item.parent == Some(parent))
            .collect();
        // stable, so items with equal order keep their insertion order
        children.sort_by_key(|item| item.menu_order);
        children
    }

    fn author(&self, id: u64) -> Option<&Author> {
        self.authors.get(&id)
    }
}
