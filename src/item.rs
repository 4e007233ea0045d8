//! Defines the content model consumed by the renderers: [`ContentItem`],
//! [`Term`], [`Author`], and [`QueryResult`].

use chrono::NaiveDateTime;
use gtmpl::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

/// The marker separating an item's preview from the rest of its body.
pub const MORE_MARKER: &str = "<!--more-->";

/// A single content item supplied by the content-management system. The
/// renderers never mutate items; they only borrow them.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    /// The unique, stable identifier of the item.
    pub id: u64,

    /// The URL-safe name of the item, used by [`crate::links::PostUrls`] to
    /// build permalinks. An empty slug means the item has no permalink.
    pub slug: String,

    pub title: String,

    /// The raw body. It may contain [`MORE_MARKER`].
    pub body: String,

    /// The explicit excerpt. Empty (or whitespace-only) means "not set".
    pub excerpt: String,

    /// The identifier of the parent item, if any.
    pub parent: Option<u64>,

    pub published: NaiveDateTime,

    /// The identifier of the item's author.
    pub author: u64,

    /// Sort key among siblings; lower values come first.
    pub menu_order: i64,

    pub terms: Vec<Term>,

    /// The URL of the item's featured image, if it has one.
    pub thumbnail: Option<String>,

    pub meta: BTreeMap<String, String>,
}

impl ContentItem {
    /// Creates an item with the given identifier and title and every other
    /// field empty.
    pub fn new(id: u64, title: &str) -> ContentItem {
        ContentItem {
            id,
            slug: String::default(),
            title: title.to_owned(),
            body: String::default(),
            excerpt: String::default(),
            parent: None,
            published: NaiveDateTime::default(),
            author: 0,
            menu_order: 0,
            terms: Vec::new(),
            thumbnail: None,
            meta: BTreeMap::new(),
        }
    }

    /// Returns the explicit excerpt, if one is set.
    pub fn explicit_excerpt(&self) -> Option<&str> {
        match self.excerpt.trim() {
            "" => None,
            excerpt => Some(excerpt),
        }
    }

    /// Returns the part of the body before [`MORE_MARKER`], if the body has
    /// the marker. A marker at offset 0 still counts, giving an empty preview
    /// instead of falling back to the whole body.
    pub fn before_more(&self) -> Option<&str> {
        self.body.find(MORE_MARKER).map(|i| &self.body[..i])
    }
}

/// A taxonomy term attached to a [`ContentItem`]. Term names are slugified so
/// e.g., `macOS` and `MacOS` resolve to the same term, and so the name can be
/// dropped into a CSS class or URL.
#[derive(Clone, Debug)]
pub struct Term {
    /// The slugified term name.
    pub name: String,

    /// The taxonomy the term belongs to (e.g., `tag` or `category`).
    pub taxonomy: String,
}

impl Term {
    /// Creates a term, slugifying `name`.
    pub fn new(taxonomy: &str, name: &str) -> Term {
        Term {
            name: slug::slugify(name),
            taxonomy: taxonomy.to_owned(),
        }
    }
}

impl Hash for Term {
    /// Implements [`Hash`] for [`Term`] by delegating to the taxonomy and
    /// name fields.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.taxonomy.hash(state);
        self.name.hash(state);
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.taxonomy == other.taxonomy && self.name == other.name
    }
}
impl Eq for Term {}

impl From<&Term> for Value {
    /// Converts [`Term`]s into [`Value`]s for templating.
    fn from(t: &Term) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("name".to_owned(), Value::String(t.name.clone()));
        m.insert("taxonomy".to_owned(), Value::String(t.taxonomy.clone()));
        Value::Object(m)
    }
}

/// An author record, looked up through [`crate::store::ContentStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Author {
    pub id: u64,
    pub display_name: String,
    pub nicename: String,
    pub email: String,
    pub url: String,
    pub description: String,
}

/// One page of query results: the items on the page plus the page counters
/// needed for pagination.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub items: Vec<ContentItem>,

    /// The 1-based number of this page.
    pub current_page: usize,

    pub total_pages: usize,
}

impl QueryResult {
    /// Wraps a single page holding all of `items`.
    pub fn single(items: Vec<ContentItem>) -> QueryResult {
        QueryResult {
            total_pages: if items.is_empty() { 0 } else { 1 },
            items,
            current_page: 1,
        }
    }

    /// Splits `items` into pages of `page_size` items. An empty item list
    /// still yields one (empty) page so there is always something to render.
    pub fn paginate(
        items: &[ContentItem],
        page_size: usize,
    ) -> Vec<QueryResult> {
        let page_size = page_size.max(1);
        let total_pages = match items.len() % page_size {
            0 => items.len() / page_size,
            _ => items.len() / page_size + 1,
        };

        if total_pages == 0 {
            return vec![QueryResult::single(Vec::new())];
        }

        items
            .chunks(page_size)
            .enumerate()
            .map(|(i, chunk)| QueryResult {
                items: chunk.to_vec(),
                current_page: i + 1,
                total_pages,
            })
            .collect()
    }
}
