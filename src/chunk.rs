//! Splits a list into fixed-size chunks and wraps each chunk's markup.

use crate::registry::Registry;
use serde::Deserialize;
use std::num::NonZeroUsize;

/// How a list is chunked: `size` items per chunk (the last chunk may be
/// shorter), each chunk's markup passed through the chunk wrapper registered
/// as `wrapper`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChunkSpec {
    pub size: NonZeroUsize,

    #[serde(default)]
    pub wrapper: Option<String>,
}

impl ChunkSpec {
    pub fn new(size: NonZeroUsize, wrapper: Option<&str>) -> ChunkSpec {
        ChunkSpec {
            size,
            wrapper: wrapper.map(str::to_owned),
        }
    }

    /// Applies the chunk wrapper to the markup of chunk `index`. Without a
    /// wrapper, or when the wrapper isn't registered, the markup is returned
    /// unchanged.
    pub fn wrap(
        &self,
        registry: &Registry,
        inner: String,
        index: usize,
    ) -> String {
        let name = match &self.wrapper {
            None => return inner,
            Some(name) => name,
        };
        match registry.chunk_wrapper(name) {
            Some(wrapper) => wrapper(&inner, index),
            None => {
                log::warn!("chunk wrapper `{}` is not registered", name);
                inner
            }
        }
    }
}

/// Splits `items` left to right into chunks of `size`, paired with their
/// zero-based index.
pub fn chunks<T>(
    items: &[T],
    size: NonZeroUsize,
) -> impl Iterator<Item = (usize, &[T])> {
    items.chunks(size.get()).enumerate()
}

#[cfg(test)]
mod test {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
    }

    #[test]
    fn test_chunks() {
        let items: Vec<u32> = (0..7).collect();
        let got: Vec<(usize, Vec<u32>)> = chunks(&items, size(3))
            .map(|(i, c)| (i, c.to_vec()))
            .collect();
        assert_eq!(
            vec![(0, vec![0, 1, 2]), (1, vec![3, 4, 5]), (2, vec![6])],
            got
        );
    }

    #[test]
    fn test_chunks_empty() {
        assert_eq!(0, chunks::<u32>(&[], size(2)).count());
    }

    #[test]
    fn test_wrap() {
        let mut registry = Registry::new();
        registry.register_chunk_wrapper("section", |inner, i| {
            format!("<section data-i=\"{}\">{}</section>", i, inner)
        });

        let spec = ChunkSpec::new(size(2), Some("section"));
        assert_eq!(
            "<section data-i=\"1\">x</section>",
            spec.wrap(&registry, String::from("x"), 1)
        );
        let spec = ChunkSpec::new(size(2), Some("missing"));
        assert_eq!("x", spec.wrap(&registry, String::from("x"), 1));
        let spec = ChunkSpec::new(size(2), None);
        assert_eq!("x", spec.wrap(&registry, String::from("x"), 1));
    }

    #[test]
    fn test_deserialize() -> Result<(), serde_yaml::Error> {
        let spec: ChunkSpec = serde_yaml::from_str("size: 3\nwrapper: row\n")?;
        assert_eq!(ChunkSpec::new(size(3), Some("row")), spec);
        assert!(serde_yaml::from_str::<ChunkSpec>("size: 0\n").is_err());
        Ok(())
    }
}
