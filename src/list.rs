//! Renders a [`QueryResult`] as a list: each item is classified, formatted
//! with a registered format, and the results are optionally chunked and
//! wrapped in a list container.

use crate::chunk::{chunks, ChunkSpec};
use crate::classify::{assign, Rules};
use crate::context::Context;
use crate::error::Result;
use crate::html::{close_tag, open_tag};
use crate::item::{ContentItem, QueryResult};
use crate::links::PageLinks;
use crate::pagination::{Labels, Pagination};
use crate::post::{Post, RenderItem};
use crate::registry::DEFAULT_FORMAT;
use serde::Deserialize;

/// Settings for rendering a [`PostList`].
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// The registered format used for every item. `None` uses the default
    /// format.
    pub post_format: Option<String>,

    /// The tag of the list container.
    pub list_tag: String,

    pub list_class: Option<String>,

    pub list_id: Option<String>,

    /// Whether an empty list renders [`ListOptions::no_posts_message`]
    /// instead of nothing.
    pub show_no_posts_message: bool,

    pub no_posts_message: String,

    /// Chunking, if any.
    pub chunk: Option<ChunkSpec>,

    /// Rules assigning CSS classes to items.
    pub post_classes: Rules,

    /// Rules assigning options to items.
    pub post_options: Rules,

    /// The pager labels.
    pub pagination: Labels,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            post_format: None,
            list_tag: String::from("ul"),
            list_class: None,
            list_id: None,
            show_no_posts_message: false,
            no_posts_message: String::from("No items could be found."),
            chunk: None,
            post_classes: Rules::default(),
            post_options: Rules::default(),
            pagination: Labels::default(),
        }
    }
}

impl ListOptions {
    /// Merges fixed and callback class rules into the list's class rules.
    pub fn set_post_classes(&mut self, rules: Rules) -> &mut ListOptions {
        self.post_classes.merge(rules);
        self
    }

    /// Adds a callback class rule; see [`Rules::callback`].
    pub fn set_variable_post_class<F>(
        &mut self,
        name: Option<&str>,
        f: F,
    ) -> &mut ListOptions
    where
        F: Fn(&RenderItem<'_>) -> String + 'static,
    {
        self.post_classes.callback(name, f);
        self
    }

    /// Merges option rules into the list's option rules.
    pub fn set_post_options(&mut self, rules: Rules) -> &mut ListOptions {
        self.post_options.merge(rules);
        self
    }
}

/// A list of content items ready to render.
pub struct PostList<'q> {
    query: &'q QueryResult,
    options: ListOptions,
}

impl<'q> PostList<'q> {
    pub fn new(query: &'q QueryResult, options: ListOptions) -> PostList<'q> {
        PostList { query, options }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ListOptions {
        &mut self.options
    }

    pub fn have_posts(&self) -> bool {
        !self.query.items.is_empty()
    }

    pub fn max_num_pages(&self) -> usize {
        self.query.total_pages
    }

    /// The pagination state of the underlying query.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.query.current_page, self.query.total_pages)
            .with_labels(self.options.pagination.clone())
    }

    /// Renders the pager for the underlying query.
    pub fn pagination_to_html(&self, links: &dyn PageLinks) -> Result<String> {
        self.pagination().to_html(links)
    }

    /// Renders the list. With `wrapper` set, items are placed in the list
    /// container; when chunking, every chunk gets its own container before
    /// the chunk wrapper is applied.
    ///
    /// Positions used by `post<N>` rules count items across the whole list,
    /// so they are unaffected by chunk boundaries.
    pub fn to_html(
        &self,
        context: &Context<'_>,
        wrapper: bool,
    ) -> Result<String> {
        let items = &self.query.items;
        if items.is_empty() {
            log::debug!("rendering empty list");
            return Ok(self.no_posts_message());
        }

        log::debug!(
            "rendering {} items with format `{}`",
            items.len(),
            self.options.post_format.as_deref().unwrap_or(DEFAULT_FORMAT)
        );

        let mut position = 0;
        match &self.options.chunk {
            None => {
                self.list_to_html(context, items, &mut position, wrapper)
            }
            Some(spec) => {
                let mut out = String::new();
                for (index, chunk) in chunks(items, spec.size) {
                    log::debug!(
                        "rendering chunk {} ({} items)",
                        index,
                        chunk.len()
                    );
                    let inner = self.list_to_html(
                        context,
                        chunk,
                        &mut position,
                        wrapper,
                    )?;
                    out.push_str(&spec.wrap(context.registry, inner, index));
                }
                Ok(out)
            }
        }
    }

    fn list_to_html(
        &self,
        context: &Context<'_>,
        items: &[ContentItem],
        position: &mut usize,
        wrapper: bool,
    ) -> Result<String> {
        let items = self.list_items_to_html(context, items, position)?;
        if !wrapper {
            return Ok(items);
        }
        Ok(format!(
            "{}{}{}",
            open_tag(
                &self.options.list_tag,
                self.options.list_class.as_deref(),
                self.options.list_id.as_deref(),
            ),
            items,
            close_tag(&self.options.list_tag),
        ))
    }

    fn list_items_to_html(
        &self,
        context: &Context<'_>,
        items: &[ContentItem],
        position: &mut usize,
    ) -> Result<String> {
        let mut out = String::new();
        for item in items {
            let mut render_item =
                RenderItem::new(Post::new(item, context), *position);
            assign(
                &mut render_item,
                &self.options.post_classes,
                &self.options.post_options,
            );
            log::trace!("item {} at position {}", item.id, position);

            match render_item.to_html(self.options.post_format.as_deref()) {
                Some(html) => out.push_str(&html?),
                None => log::warn!(
                    "no format `{}` and no default format registered; \
                     item {} renders empty",
                    self.options
                        .post_format
                        .as_deref()
                        .unwrap_or(DEFAULT_FORMAT),
                    item.id,
                ),
            }
            *position += 1;
        }
        Ok(out)
    }

    fn no_posts_message(&self) -> String {
        match self.options.show_no_posts_message {
            true => format!(
                r#"<div class="alert">{}</div>"#,
                self.options.no_posts_message
            ),
            false => String::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classify::ALL;
    use crate::context::test_support::Fixture;
    use crate::error::Error;
    use crate::registry::Registry;
    use std::num::NonZeroUsize;

    fn items(n: u64) -> Vec<ContentItem> {
        (0..n).map(|i| ContentItem::new(i, &format!("Item {}", i))).collect()
    }

    /// A registry whose default format renders `<li class="…">id</li>`.
    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_format(
            "ids",
            |item| Ok(format!("<li{}>{}</li>", item.class_attr(), item.id())),
            true,
        );
        registry
    }

    fn render(
        query: &QueryResult,
        options: ListOptions,
        wrapper: bool,
    ) -> Result<String> {
        let fixture = Fixture::with_registry(Vec::new(), registry());
        let context = fixture.context();
        PostList::new(query, options).to_html(&context, wrapper)
    }

    #[test]
    fn test_empty_list_silent() -> Result<()> {
        let query = QueryResult::single(Vec::new());
        assert_eq!("", render(&query, ListOptions::default(), true)?);
        Ok(())
    }

    #[test]
    fn test_empty_list_message() -> Result<()> {
        let options = ListOptions {
            show_no_posts_message: true,
            no_posts_message: String::from("Nothing here"),
            ..ListOptions::default()
        };
        assert_eq!(
            r#"<div class="alert">Nothing here</div>"#,
            render(&QueryResult::single(Vec::new()), options, true)?
        );
        let options = ListOptions {
            show_no_posts_message: true,
            ..ListOptions::default()
        };
        assert_eq!(
            r#"<div class="alert">No items could be found.</div>"#,
            render(&QueryResult::single(Vec::new()), options, false)?
        );
        Ok(())
    }

    #[test]
    fn test_wrapped_list() -> Result<()> {
        let options = ListOptions {
            list_tag: String::from("ol"),
            list_class: Some(String::from("posts")),
            list_id: Some(String::from("recent")),
            ..ListOptions::default()
        };
        assert_eq!(
            r#"<ol class="posts" id="recent"><li>0</li><li>1</li></ol>"#,
            render(&QueryResult::single(items(2)), options, true)?
        );
        Ok(())
    }

    #[test]
    fn test_unwrapped_list() -> Result<()> {
        assert_eq!(
            "<li>0</li><li>1</li>",
            render(
                &QueryResult::single(items(2)),
                ListOptions::default(),
                false
            )?
        );
        Ok(())
    }

    #[test]
    fn test_positional_classes() -> Result<()> {
        let mut options = ListOptions::default();
        let mut classes = Rules::new();
        classes.push("entry").set("post0", "first").set("post2", "third");
        options.set_post_classes(classes);
        assert_eq!(
            r#"<ul><li class="entry first">0</li><li class="entry">1</li><li class="entry third">2</li></ul>"#,
            render(&QueryResult::single(items(3)), options, true)?
        );
        Ok(())
    }

    #[test]
    fn test_chunked_positions_are_global() -> Result<()> {
        let mut options = ListOptions {
            chunk: Some(ChunkSpec::new(
                NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN),
                Some("row"),
            )),
            ..ListOptions::default()
        };
        let mut classes = Rules::new();
        classes.set("post2", "third");
        options.set_post_classes(classes);

        let mut registry = registry();
        registry.register_chunk_wrapper("row", |inner, i| {
            format!("<div data-chunk=\"{}\">{}</div>", i, inner)
        });
        let fixture = Fixture::with_registry(Vec::new(), registry);
        let context = fixture.context();
        let query = QueryResult::single(items(5));

        assert_eq!(
            "<div data-chunk=\"0\"><ul><li>0</li><li>1</li></ul></div>\
             <div data-chunk=\"1\"><ul><li class=\"third\">2</li><li>3</li></ul></div>\
             <div data-chunk=\"2\"><ul><li>4</li></ul></div>",
            PostList::new(&query, options).to_html(&context, true)?
        );
        Ok(())
    }

    #[test]
    fn test_variable_classes_and_options() -> Result<()> {
        let mut options = ListOptions::default();
        options.set_variable_post_class(None, |item| match item.position() % 2 {
            0 => String::from("even"),
            _ => String::from("odd"),
        });
        let mut option_rules = Rules::new();
        option_rules.set("post1", "highlight");
        options.set_post_options(option_rules);

        let mut registry = Registry::new();
        registry.register_format(
            "opts",
            |item| {
                Ok(format!(
                    "[{}|{}]",
                    item.classes(ALL).unwrap_or_default(),
                    item.options().join(",")
                ))
            },
            false,
        );
        options.post_format = Some(String::from("opts"));
        let fixture = Fixture::with_registry(Vec::new(), registry);
        let context = fixture.context();
        let query = QueryResult::single(items(3));

        assert_eq!(
            "[even|][odd|highlight][even|]",
            PostList::new(&query, options).to_html(&context, false)?
        );
        Ok(())
    }

    #[test]
    fn test_unresolved_format_renders_empty_items() -> Result<()> {
        let fixture = Fixture::new(Vec::new());
        let context = fixture.context();
        let query = QueryResult::single(items(2));
        let options = ListOptions {
            post_format: Some(String::from("missing")),
            ..ListOptions::default()
        };
        assert_eq!("<ul></ul>", PostList::new(&query, options).to_html(&context, true)?);
        Ok(())
    }

    #[test]
    fn test_format_failure_aborts_render() {
        let mut registry = Registry::new();
        registry.register_format(
            "broken",
            |_| Err(Error::Filter(String::from("hook"))),
            true,
        );
        let fixture = Fixture::with_registry(Vec::new(), registry);
        let context = fixture.context();
        let query = QueryResult::single(items(2));
        assert!(PostList::new(&query, ListOptions::default())
            .to_html(&context, true)
            .is_err());
    }

    #[test]
    fn test_render_passes_are_independent() -> Result<()> {
        let fixture = Fixture::with_registry(Vec::new(), registry());
        let context = fixture.context();
        let query = QueryResult::single(items(2));
        let mut options = ListOptions::default();
        let mut classes = Rules::new();
        classes.set("post0", "first");
        options.set_post_classes(classes);
        let list = PostList::new(&query, options);

        let first = list.to_html(&context, true)?;
        assert_eq!(first, list.to_html(&context, true)?);
        Ok(())
    }

    #[test]
    fn test_pagination() {
        let pages = QueryResult::paginate(&items(5), 2);
        let list = PostList::new(&pages[1], ListOptions::default());
        let pagination = list.pagination();
        assert_eq!(3, list.max_num_pages());
        assert!(pagination.has_next());
        assert!(pagination.has_previous());
    }

    #[test]
    fn test_options_from_yaml() -> std::result::Result<(), serde_yaml::Error> {
        let options: ListOptions = serde_yaml::from_str(
            "post_format: linked_title\n\
             list_class: posts\n\
             chunk:\n  size: 3\n  wrapper: row\n\
             post_classes:\n  0: entry\n  post0: first\n\
             pagination:\n  next: Older\n",
        )?;
        assert_eq!(Some("linked_title"), options.post_format.as_deref());
        assert_eq!("ul", options.list_tag);
        assert_eq!(Some("posts"), options.list_class.as_deref());
        assert_eq!(3, options.chunk.map(|c| c.size.get()).unwrap_or_default());
        assert_eq!(2, options.post_classes.fixed().len());
        assert_eq!("Older", options.pagination.next);
        assert_eq!("&lsaquo; PREV", options.pagination.previous);
        Ok(())
    }
}
