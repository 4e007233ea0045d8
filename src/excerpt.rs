//! Builds [`Excerpt`]s: short previews of a [`ContentItem`] with an optional
//! "read more" link.
//!
//! The excerpt text comes from one of three sources, in order of preference:
//!
//! 1. The item's explicit excerpt, used as written.
//! 2. The body text before [`crate::item::MORE_MARKER`], filtered.
//! 3. The whole body, filtered and always truncated.
//!
//! The first two are only truncated when
//! [`ExcerptConfig::limit_explicit_excerpt_length`] is set.

use crate::error::Result;
use crate::filter::{filter_excerpt, ContentFilter};
use crate::html::fill_slots;
use crate::item::ContentItem;
use crate::truncate::truncate;
use serde::Deserialize;
use url::Url;

/// Settings for the "read more" link. `template` has four `%s` slots filled
/// with the class, the permalink, the title, and the text, in that order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoreLink {
    pub text: String,
    pub title: String,
    pub template: String,
    pub class: String,
}

impl Default for MoreLink {
    fn default() -> Self {
        MoreLink {
            text: String::from("continue reading &raquo;"),
            title: String::from("Continue Reading"),
            template: String::from("<a class='%s' href='%s' title='%s'>%s</a>"),
            class: String::from("more-link"),
        }
    }
}

impl MoreLink {
    /// Renders the link for `permalink`. A missing permalink renders as an
    /// empty `href`. Single quotes in the permalink are percent-encoded
    /// since the default template quotes `href` with them.
    pub fn to_html(&self, permalink: Option<&Url>) -> String {
        let href = permalink
            .map(|url| url.as_str().replace('\'', "%27"))
            .unwrap_or_default();
        fill_slots(
            &self.template,
            &[&self.class, &href, &self.title, &self.text],
        )
    }
}

/// Settings for building an [`Excerpt`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExcerptConfig {
    pub more_link: MoreLink,

    /// The maximum number of words in the excerpt.
    pub length: usize,

    /// Whether explicit excerpts and text before the more marker are also
    /// held to `length`.
    pub limit_explicit_excerpt_length: bool,

    pub show_more_link: bool,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        ExcerptConfig {
            more_link: MoreLink::default(),
            length: 55,
            limit_explicit_excerpt_length: true,
            show_more_link: true,
        }
    }
}

/// Where an excerpt's text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The item's explicit excerpt.
    Explicit,

    /// The body text before the more marker.
    Marker,

    /// The whole body, truncated.
    Body,
}

/// A computed excerpt. Excerpts are immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Excerpt {
    /// The excerpt text, free of markup unless it came from an explicit
    /// excerpt.
    pub text: String,

    /// Whether words were dropped to fit the word budget.
    pub truncated: bool,

    /// The rendered "read more" link, if shown.
    pub more_link: Option<String>,

    pub source: Source,
}

impl Excerpt {
    /// Builds the excerpt for `item`. `permalink` is the target of the more
    /// link; it is only used when the link is shown. The only failures are
    /// those of the `filter` hook.
    pub fn build(
        item: &ContentItem,
        permalink: Option<&Url>,
        filter: &dyn ContentFilter,
        config: &ExcerptConfig,
    ) -> Result<Excerpt> {
        let (text, source, mut truncated) = match item.explicit_excerpt() {
            Some(explicit) => (explicit.to_owned(), Source::Explicit, false),
            None => match item.before_more() {
                Some(before) => {
                    (filter_excerpt(filter, before)?, Source::Marker, false)
                }
                None => {
                    let filtered = filter_excerpt(filter, &item.body)?;
                    let (text, truncated) = truncate(&filtered, config.length);
                    (text, Source::Body, truncated)
                }
            },
        };

        let text = match source {
            Source::Explicit | Source::Marker
                if config.limit_explicit_excerpt_length =>
            {
                let (text, cut) = truncate(&text, config.length);
                truncated |= cut;
                text
            }
            _ => text,
        };

        Ok(Excerpt {
            text,
            truncated,
            more_link: match config.show_more_link {
                true => Some(config.more_link.to_html(permalink)),
                false => None,
            },
            source,
        })
    }

    /// Renders the excerpt as a paragraph: the text, an ellipsis when
    /// truncated, and the more link.
    pub fn to_html(&self) -> String {
        format!(
            "<p>{}{}{}</p>",
            self.text,
            match self.truncated {
                true => "... ",
                false => " ",
            },
            self.more_link.as_deref().unwrap_or_default(),
        )
    }
}
