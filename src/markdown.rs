//! Implements [`MarkdownFilter`], a [`ContentFilter`] that renders Markdown
//! item bodies into HTML.

use crate::error::Result;
use crate::filter::{ContentFilter, Shortcodes};
use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Renders item bodies from Markdown to HTML.
pub struct MarkdownFilter {
    /// The number of levels by which headings are demoted. Headings in an item
    /// body usually need to be subordinate to the site title and the item
    /// title, so with an offset of 2 `#` becomes `<h3>`. Levels are capped at
    /// 6.
    pub heading_offset: u32,

    /// The shortcodes stripped before excerpt text is rendered.
    pub shortcodes: Shortcodes,
}

impl Default for MarkdownFilter {
    fn default() -> Self {
        MarkdownFilter {
            heading_offset: 0,
            shortcodes: Shortcodes::default(),
        }
    }
}

impl MarkdownFilter {
    pub fn with_heading_offset(heading_offset: u32) -> Self {
        MarkdownFilter {
            heading_offset,
            ..MarkdownFilter::default()
        }
    }

    fn convert_tag<'a>(&self, tag: Tag<'a>) -> Tag<'a> {
        match tag {
            Tag::Heading(level) => {
                Tag::Heading((level + self.heading_offset).min(6))
            }
            _ => tag,
        }
    }

    // Both the start and end events need converting, otherwise the renderer
    // closes a demoted heading with the original level.
    fn convert<'a>(&self, ev: Event<'a>) -> Event<'a> {
        match ev {
            Event::Start(tag) => Event::Start(self.convert_tag(tag)),
            Event::End(tag) => Event::End(self.convert_tag(tag)),
            _ => ev,
        }
    }
}

impl ContentFilter for MarkdownFilter {
    fn filter_content(&self, text: &str) -> Result<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(
            &mut out,
            Parser::new_ext(text, options).map(|ev| self.convert(ev)),
        );
        Ok(out)
    }

    fn shortcodes(&self) -> &Shortcodes {
        &self.shortcodes
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::filter_excerpt;

    #[test]
    fn test_renders_markdown() -> Result<()> {
        assert_eq!(
            "<p>Hello <em>world</em></p>\n",
            MarkdownFilter::default().filter_content("Hello *world*")?
        );
        Ok(())
    }

    #[test]
    fn test_demotes_headings() -> Result<()> {
        assert_eq!(
            "<h3>Title</h3>\n",
            MarkdownFilter::with_heading_offset(2).filter_content("# Title")?
        );
        assert_eq!(
            "<h6>Deep</h6>\n",
            MarkdownFilter::with_heading_offset(2).filter_content("##### Deep")?
        );
        Ok(())
    }

    #[test]
    fn test_excerpt_text_is_plain() -> Result<()> {
        assert_eq!(
            "Title\nSome strong text.\n",
            filter_excerpt(
                &MarkdownFilter::default(),
                "# Title\n\nSome **strong** text."
            )?
        );
        Ok(())
    }
}
