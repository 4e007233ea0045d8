//! Defines [`Context`], the bundle of collaborators every render borrows.

use crate::excerpt::ExcerptConfig;
use crate::filter::ContentFilter;
use crate::links::Permalinks;
use crate::registry::Registry;
use crate::store::ContentStore;

/// The collaborators and settings shared by all items of a render pass. A
/// context only holds shared borrows, so the registry and the collaborators
/// can't change while anything is being rendered.
pub struct Context<'a> {
    /// The content, title, and author filter hooks.
    pub filter: &'a dyn ContentFilter,

    pub permalinks: &'a dyn Permalinks,

    pub store: &'a dyn ContentStore,

    /// The registered tests, partials, formats, and chunk wrappers.
    pub registry: &'a Registry,

    /// The excerpt settings used by [`crate::post::Post::excerpt`].
    pub excerpt: ExcerptConfig,
}

impl<'a> Context<'a> {
    pub fn new(
        filter: &'a dyn ContentFilter,
        permalinks: &'a dyn Permalinks,
        store: &'a dyn ContentStore,
        registry: &'a Registry,
    ) -> Context<'a> {
        Context {
            filter,
            permalinks,
            store,
            registry,
            excerpt: ExcerptConfig::default(),
        }
    }

    pub fn with_excerpt(mut self, excerpt: ExcerptConfig) -> Context<'a> {
        self.excerpt = excerpt;
        self
    }
}
