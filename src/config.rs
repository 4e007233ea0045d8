//! Loads rendering settings from a `postkit.yaml` file.

use crate::excerpt::ExcerptConfig;
use crate::list::ListOptions;
use anyhow::{anyhow, Context as _, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// The name of the configuration file searched for by
/// [`Config::from_directory`].
pub const CONFIG_FILE: &str = "postkit.yaml";

/// Site-wide rendering settings. Every section and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for [`crate::excerpt::Excerpt::build`].
    pub excerpt: ExcerptConfig,

    /// Settings for [`crate::list::PostList`], including the pager labels.
    pub list: ListOptions,
}

impl Config {
    /// Looks for [`CONFIG_FILE`] in `dir` and then in each of its parents,
    /// loading the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Config::from_file(&path)
                .map_err(|e| anyhow!("Loading configuration: {:?}", e));
        }
        match dir.parent() {
            Some(parent) => Config::from_directory(parent),
            None => Err(anyhow!(
                "Could not find `{}` in any parent directory",
                CONFIG_FILE
            )),
        }
    }

    /// Loads the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("opening `{}`", path.display()))?;
        let config: Config = serde_yaml::from_reader(file)
            .with_context(|| format!("parsing `{}`", path.display()))?;
        log::debug!("loaded configuration from `{}`", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_directory_searches_parents() -> Result<()> {
        let config = Config::from_directory(Path::new("./testdata/posts"))?;
        assert_eq!(20, config.excerpt.length);
        assert_eq!("Read more", config.excerpt.more_link.text);
        assert_eq!("more-link", config.excerpt.more_link.class);
        assert_eq!(Some("posts"), config.list.list_class.as_deref());
        let chunk = config.list.chunk.as_ref();
        assert_eq!(Some("row"), chunk.and_then(|c| c.wrapper.as_deref()));
        assert_eq!(2, config.list.post_classes.fixed().len());
        assert_eq!("Older", config.list.pagination.next);
        Ok(())
    }

    #[test]
    fn test_empty_file_uses_defaults(
    ) -> std::result::Result<(), serde_yaml::Error> {
        let config: Config = serde_yaml::from_str("{}")?;
        assert_eq!(ExcerptConfig::default(), config.excerpt);
        assert_eq!("ul", config.list.list_tag);
        assert!(config.list.post_classes.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file(Path::new("./testdata/missing.yaml")).is_err());
    }
}
