//! The content-filter hook seam ([`ContentFilter`]) and the filtering
//! pipeline applied to excerpt source text ([`filter_excerpt`]).

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Text-transform hooks supplied by the content-management system. Only
/// [`ContentFilter::filter_content`] is required; title and author filters
/// default to passing text through unchanged.
pub trait ContentFilter {
    /// Transforms an item body (e.g., expanding embeds or rendering Markdown).
    fn filter_content(&self, text: &str) -> Result<String>;

    /// Transforms an item title before display.
    fn filter_title(&self, title: &str) -> Result<String> {
        Ok(title.to_owned())
    }

    /// Transforms an author name before display.
    fn filter_author(&self, author: &str) -> Result<String> {
        Ok(author.to_owned())
    }

    /// The shortcodes to strip from text before it is filtered.
    fn shortcodes(&self) -> &Shortcodes {
        &NO_SHORTCODES
    }
}

static NO_SHORTCODES: Lazy<Shortcodes> = Lazy::new(Shortcodes::default);

/// A [`ContentFilter`] that leaves all text unchanged.
#[derive(Default)]
pub struct Passthrough {
    pub shortcodes: Shortcodes,
}

impl ContentFilter for Passthrough {
    fn filter_content(&self, text: &str) -> Result<String> {
        Ok(text.to_owned())
    }

    fn shortcodes(&self) -> &Shortcodes {
        &self.shortcodes
    }
}

/// Matches `[name attrs]`, `[name /]`, and `[/name]` shortcode tags.
static SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(/?)([A-Za-z][\w-]*)([^\]]*)\]").expect("shortcode pattern")
});

/// Matches HTML comments and tags. A tag starts with `<` followed by a name,
/// `/`, `!` or `?`, so a lone `<` in text (as in `3 < 5`) is kept.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!?][^>]*>").expect("tag pattern")
});

/// The set of registered shortcode names. Only registered shortcodes are
/// stripped so that ordinary bracketed text (like Markdown link labels)
/// survives.
#[derive(Clone, Debug, Default)]
pub struct Shortcodes(HashSet<String>);

impl Shortcodes {
    pub fn new<I, S>(names: I) -> Shortcodes
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shortcodes(names.into_iter().map(Into::into).collect())
    }

    pub fn register(&mut self, name: &str) {
        self.0.insert(name.to_owned());
    }

    /// Removes registered shortcodes from `text`. An opening shortcode with a
    /// matching closing tag is removed together with the enclosed content.
    pub fn strip(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(caps) = SHORTCODE.captures(rest) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => break,
            };
            out.push_str(&rest[..whole.start()]);
            let after = &rest[whole.end()..];

            let name = &caps[2];
            if !self.0.contains(name) {
                out.push_str(whole.as_str());
                rest = after;
                continue;
            }

            let opening =
                caps[1].is_empty() && !caps[3].trim_end().ends_with('/');
            let closing = format!("[/{}]", name);
            rest = match after.find(&closing) {
                Some(i) if opening => &after[i + closing.len()..],
                _ => after,
            };
        }
        out.push_str(rest);
        out
    }
}

/// Strips all HTML tags and comments from `text`.
pub fn strip_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Prepares raw body text for use as an excerpt: strips registered
/// shortcodes, runs the content filter hook, escapes the CDATA terminator,
/// and strips the markup the hook produced.
pub fn filter_excerpt(
    filter: &dyn ContentFilter,
    text: &str,
) -> Result<String> {
    let text = filter.shortcodes().strip(text);
    let text = filter.filter_content(&text)?;
    let text = text.replace("]]>", "]]&gt;");
    Ok(strip_tags(&text))
}
