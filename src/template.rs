//! Defines [`TemplateFormat`], a list item format written as a gtmpl
//! template instead of a Rust closure.

use crate::classify::ALL;
use crate::error::{Error, Result};
use crate::post::RenderItem;
use crate::registry::Registry;
use gtmpl::{Template, Value};
use std::collections::HashMap;

/// A parsed template that renders one list item. The template sees an object
/// with these fields:
///
/// * `id`, `title`, `permalink` (empty when unresolvable), `date`
///   (`%Y-%m-%d %H:%M:%S`), `position`
/// * `classes`: the unnamed classes joined by spaces
/// * `excerpt`: the rendered excerpt paragraph
/// * `content`: the filtered body
/// * `terms`: a list of `{name, taxonomy}` objects
/// * `options`: the unnamed options
pub struct TemplateFormat {
    template: Template,
}

impl TemplateFormat {
    /// Parses `source` into a format.
    pub fn parse(source: &str) -> Result<TemplateFormat> {
        let mut template = Template::default();
        template.parse(source)?;
        Ok(TemplateFormat { template })
    }

    /// Renders `item` with the template.
    pub fn render(&self, item: &RenderItem<'_>) -> Result<String> {
        let context = gtmpl::Context::from(to_value(item)?)?;
        let mut out: Vec<u8> = Vec::new();
        self.template.execute(&mut out, &context)?;
        String::from_utf8(out).map_err(|err| Error::Template(err.to_string()))
    }
}

/// Builds the template value for `item`.
pub fn to_value(item: &RenderItem<'_>) -> Result<Value> {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("id".to_owned(), Value::from(item.id()));
    m.insert("title".to_owned(), Value::String(item.title()?));
    m.insert("permalink".to_owned(), Value::String(item.href()?));
    m.insert(
        "date".to_owned(),
        Value::String(item.item().published.format("%Y-%m-%d %H:%M:%S").to_string()),
    );
    m.insert("position".to_owned(), Value::from(item.position() as u64));
    m.insert(
        "classes".to_owned(),
        Value::String(item.classes(ALL).unwrap_or_default()),
    );
    m.insert("excerpt".to_owned(), Value::String(item.excerpt_html()?));
    m.insert("content".to_owned(), Value::String(item.content()?));
    m.insert(
        "terms".to_owned(),
        Value::Array(item.item().terms.iter().map(Value::from).collect()),
    );
    m.insert(
        "options".to_owned(),
        Value::Array(
            item.options()
                .iter()
                .map(|option| Value::String(option.clone()))
                .collect(),
        ),
    );
    Ok(Value::Object(m))
}

impl Registry {
    /// Parses `source` as a [`TemplateFormat`] and registers it as format
    /// `name`; see [`Registry::register_format`].
    pub fn register_template_format(
        &mut self,
        name: &str,
        source: &str,
        default: bool,
    ) -> Result<&mut Registry> {
        let format = TemplateFormat::parse(source)?;
        Ok(self.register_format(name, move |item| format.render(item), default))
    }
}
