use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::math::Rasterizer;
use super::TextColor;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub size: u16,
    pub color: TextColor,
}

/// Memoizes rasterized text by exact (text, size, color).
///
/// Append-only: the game only ever produces a few dozen distinct strings at a
/// handful of sizes, so nothing is evicted. Owned by whoever draws frames; not
/// shared across threads.
pub struct RenderCache<R: Rasterizer> {
    rasterizer: R,
    entries: HashMap<CacheKey, R::Image>,
    misses: usize,
}

impl<R: Rasterizer> RenderCache<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            entries: HashMap::new(),
            misses: 0,
        }
    }

    /// Cached image for the key, rasterizing it on first use
    pub fn get_or_render(
        &mut self,
        text: &str,
        size: u16,
        color: TextColor,
    ) -> Result<&R::Image, R::Error> {
        let key = CacheKey {
            text: text.to_string(),
            size,
            color,
        };

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let image = self.rasterizer.rasterize(text, size, color)?;
                self.misses += 1;
                Ok(entry.insert(image))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many lookups had to rasterize
    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call so tests can see when the cache was bypassed
    #[derive(Default)]
    struct CountingRasterizer {
        calls: Vec<(String, u16, TextColor)>,
    }

    impl Rasterizer for CountingRasterizer {
        type Image = String;
        type Error = String;

        fn rasterize(&mut self, text: &str, size: u16, color: TextColor) -> Result<String, String> {
            if text.is_empty() {
                return Err("nothing to draw".to_string());
            }
            self.calls.push((text.to_string(), size, color));
            Ok(format!("{text}@{size}"))
        }
    }

    #[test]
    fn test_second_lookup_is_cached() {
        let mut cache = RenderCache::new(CountingRasterizer::default());

        let first = cache.get_or_render("1", 14, TextColor::Yellow).unwrap().clone();
        let second = cache.get_or_render("1", 14, TextColor::Yellow).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(cache.rasterizer.calls.len(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_size_and_color_are_part_of_the_key() {
        let mut cache = RenderCache::new(CountingRasterizer::default());

        cache.get_or_render("1", 14, TextColor::Yellow).unwrap();
        cache.get_or_render("1", 32, TextColor::Yellow).unwrap();
        cache.get_or_render("1", 14, TextColor::White).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.rasterizer.calls.len(), 3);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let mut cache = RenderCache::new(CountingRasterizer::default());

        assert!(cache.get_or_render("", 14, TextColor::White).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }
}
