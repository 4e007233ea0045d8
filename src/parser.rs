//! Defines the [`Parser`] and [`Error`] types: the logic for loading
//! [`ContentItem`]s from Markdown source files with YAML frontmatter.

use crate::item::{ContentItem, Term};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{read_dir, File};
use std::path::Path;

const MARKDOWN_EXTENSION: &str = "md";

/// Loads [`ContentItem`]s from a directory of source files.
#[derive(Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Parser {
        Parser
    }

    /// Searches `source_directory` (not recursively) for item files
    /// (extension = `.md`) and returns the parsed items sorted by date, most
    /// recent first. Each file must be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with fields `Id`, `Title`, `Date`, and optionally
    ///    `Excerpt`, `Parent`, `Author`, `Order`, `Tags`, `Categories`,
    ///    `Thumbnail` and `Meta`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Markdown body, kept as-is
    ///
    /// The item's slug is the file stem. For example:
    ///
    /// ```md
    /// ---
    /// Id: 1
    /// Title: Hello, world!
    /// Date: 2021-04-16
    /// Tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse_items(
        &self,
        source_directory: &Path,
    ) -> Result<Vec<ContentItem>> {
        let mut items = Vec::new();
        for result in read_dir(source_directory)? {
            let path = result?.path();
            let extension = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || extension != Some(MARKDOWN_EXTENSION) {
                continue;
            }
            let slug = match path.file_stem().and_then(|s| s.to_str()) {
                Some(slug) => slug.to_owned(),
                None => continue,
            };
            log::debug!("parsing `{}`", path.display());
            items.push(self.parse_file(&slug, &path)?);
        }

        items.sort_by(|a, b| {
            b.published
                .cmp(&a.published)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(items)
    }

    fn parse_file(&self, slug: &str, path: &Path) -> Result<ContentItem> {
        use std::io::Read;
        let mut contents = String::new();
        let read = File::open(path)
            .and_then(|mut f| f.read_to_string(&mut contents));
        read.map_err(Error::from)
            .and_then(|_| self.parse_item(slug, &contents))
            .map_err(|e| {
                Error::Annotated(
                    format!("parsing `{}`", path.display()),
                    Box::new(e),
                )
            })
    }

    /// Parses a single [`ContentItem`] from source text. `slug` becomes the
    /// item's slug.
    pub fn parse_item(&self, slug: &str, input: &str) -> Result<ContentItem> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            match input[FENCE.len()..].find(FENCE) {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),                        // yaml_start
                    FENCE.len() + offset,               // yaml_stop
                    FENCE.len() + offset + FENCE.len(), // body_start
                )),
            }
        }

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter =
            serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

        let terms = frontmatter
            .tags
            .iter()
            .map(|t| Term::new("tag", t))
            .chain(frontmatter.categories.iter().map(|c| Term::new("category", c)))
            .collect();

        Ok(ContentItem {
            id: frontmatter.id,
            slug: slug.to_owned(),
            title: frontmatter.title,
            body: input[body_start..]
                .trim_start_matches(['\r', '\n'])
                .to_owned(),
            excerpt: frontmatter.excerpt,
            parent: frontmatter.parent,
            published: parse_date(&frontmatter.date)?,
            author: frontmatter.author,
            menu_order: frontmatter.order,
            terms,
            thumbnail: frontmatter.thumbnail,
            meta: frontmatter.meta,
        })
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`, or a bare `YYYY-MM-DD` at midnight.
fn parse_date(date: &str) -> Result<NaiveDateTime> {
    let date = date.trim();
    match NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        Ok(datetime) => Ok(datetime),
        Err(_) => Ok(NaiveDate::parse_from_str(date, "%Y-%m-%d")?
            .and_time(NaiveTime::default())),
    }
}

#[derive(Deserialize)]
struct Frontmatter {
    #[serde(rename = "Id")]
    pub id: u64,

    #[serde(rename = "Title")]
    pub title: String,

    /// The publish date, see [`parse_date`].
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(default, rename = "Excerpt")]
    pub excerpt: String,

    #[serde(default, rename = "Parent")]
    pub parent: Option<u64>,

    #[serde(default, rename = "Author")]
    pub author: u64,

    #[serde(default, rename = "Order")]
    pub order: i64,

    #[serde(default, rename = "Tags")]
    pub tags: Vec<String>,

    #[serde(default, rename = "Categories")]
    pub categories: Vec<String>,

    #[serde(default, rename = "Thumbnail")]
    pub thumbnail: Option<String>,

    #[serde(default, rename = "Meta")]
    pub meta: BTreeMap<String, String>,
}

/// Represents the result of an item-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`ContentItem`].
#[derive(Debug)]
pub enum Error {
    /// Returned when a source file is missing its starting frontmatter fence
    /// (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a source file is missing its terminal frontmatter fence
    /// (i.e., the starting fence was found but the ending one was missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the `Date` field isn't a valid date.
    Date(chrono::ParseError),

    /// Returned for I/O errors.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "item must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Date(err) => write!(f, "invalid date: {}", err),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Date(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Error {
        Error::Date(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
