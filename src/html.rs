//! Small markup helpers shared by the renderers.

use once_cell::sync::Lazy;
use pulldown_cmark::escape::escape_html;
use regex::{Captures, Regex};

/// Escapes `&`, `<`, `>`, and `"` so `s` can be used as text or as a
/// double-quoted attribute value.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // writing into a String can't fail
    let _ = escape_html(&mut out, s);
    out
}

/// Renders an opening tag. Attributes are written class first, then id, and
/// each only when present.
pub fn open_tag(tag: &str, class: Option<&str>, id: Option<&str>) -> String {
    let mut out = format!("<{}", tag);
    if let Some(class) = class {
        out.push_str(&format!(r#" class="{}""#, escape(class)));
    }
    if let Some(id) = id {
        out.push_str(&format!(r#" id="{}""#, escape(id)));
    }
    out.push('>');
    out
}

pub fn close_tag(tag: &str) -> String {
    format!("</{}>", tag)
}

/// Fills the `%s` slots of `template` with `args` in order, and turns `%%`
/// into a literal `%`. Slots without a matching argument are left empty;
/// extra arguments are ignored.
pub fn fill_slots(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('%', Some('s')) => {
                chars.next();
                out.push_str(args.next().copied().unwrap_or_default());
            }
            ('%', Some('%')) => {
                chars.next();
                out.push('%');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Matches an ampersand plus the character after it, unless that is a `#`.
static BARE_AMPERSAND: Lazy<Regex> =
    Lazy::new(|| Regex::new("&([^#])").expect("ampersand pattern"));

/// Encodes ampersands as `&#038;` unless they start a numeric reference
/// (`&#8250;`) or a named entity of up to nine letters (`&lsaquo;`). A
/// trailing `&` is left as is.
pub fn encode_bare_ampersands(s: &str) -> String {
    BARE_AMPERSAND
        .replace_all(s, |caps: &Captures| {
            let end = caps.get(0).map_or(s.len(), |m| m.end());
            match ends_entity_name(&s[end..]) {
                true => caps[0].to_owned(),
                false => format!("&#038;{}", &caps[1]),
            }
        })
        .into_owned()
}

/// Reports whether `rest` starts with 1 to 8 letters and a `;`.
fn ends_entity_name(rest: &str) -> bool {
    let letters = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    (1..=8).contains(&letters) && rest[letters..].starts_with(';')
}
