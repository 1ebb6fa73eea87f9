use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

struct CacheEntry {
    image: Arc<RgbaImage>,
    size_bytes: usize,
    last_used: u64,
}

/// Byte-bounded LRU of decoded user images, keyed by file path.
pub struct ImageCache {
    max_bytes: usize,
    total_bytes: usize,
    access_counter: u64,
    entries: HashMap<PathBuf, CacheEntry>,
    lru_order: VecDeque<(PathBuf, u64)>,
}

impl ImageCache {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            total_bytes: 0,
            access_counter: 0,
            entries: HashMap::new(),
            lru_order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, path: &Path) -> Option<Arc<RgbaImage>> {
        let entry = self.entries.get_mut(path)?;
        self.access_counter = self.access_counter.wrapping_add(1);
        entry.last_used = self.access_counter;
        self.lru_order.push_back((path.to_path_buf(), entry.last_used));
        let image = Arc::clone(&entry.image);
        self.compact_if_needed();
        Some(image)
    }

    pub fn insert(&mut self, path: PathBuf, image: Arc<RgbaImage>) {
        let size_bytes = image_size_bytes(&image);
        if size_bytes == 0 || self.max_bytes == 0 || size_bytes > self.max_bytes {
            return;
        }

        if let Some(existing) = self.entries.remove(&path) {
            self.total_bytes = self.total_bytes.saturating_sub(existing.size_bytes);
        }

        self.access_counter = self.access_counter.wrapping_add(1);
        let last_used = self.access_counter;
        self.entries.insert(
            path.clone(),
            CacheEntry {
                image,
                size_bytes,
                last_used,
            },
        );
        self.total_bytes = self.total_bytes.saturating_add(size_bytes);
        self.lru_order.push_back((path, last_used));
        self.evict_if_needed();
        self.compact_if_needed();
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop queue entries superseded by a later access. Repeated hits on a
    /// cache that never evicts would otherwise grow the queue forever.
    fn compact_if_needed(&mut self) {
        if self.lru_order.len() <= self.entries.len() * 4 + 16 {
            return;
        }
        let entries = &self.entries;
        self.lru_order.retain(|(path, stamp)| {
            entries
                .get(path)
                .is_some_and(|entry| entry.last_used == *stamp)
        });
    }

    fn evict_if_needed(&mut self) {
        while self.total_bytes > self.max_bytes {
            let Some((path, stamp)) = self.lru_order.pop_front() else {
                break;
            };
            let Some(entry) = self.entries.get(&path) else {
                continue;
            };
            if entry.last_used != stamp {
                continue;
            }
            self.total_bytes = self.total_bytes.saturating_sub(entry.size_bytes);
            self.entries.remove(&path);
        }
    }
}

pub(crate) fn image_size_bytes(image: &RgbaImage) -> usize {
    let width = image.width() as usize;
    let height = image.height() as usize;
    width.saturating_mul(height).saturating_mul(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(side: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(side, side))
    }

    #[test]
    fn test_evicts_least_recently_used() {
        // Room for two 10x10 images.
        let mut cache = ImageCache::new(800);
        cache.insert("a.png".into(), image(10));
        cache.insert("b.png".into(), image(10));
        assert!(cache.get(Path::new("a.png")).is_some());

        cache.insert("c.png".into(), image(10));
        assert!(cache.get(Path::new("a.png")).is_some());
        assert!(cache.get(Path::new("b.png")).is_none());
        assert!(cache.get(Path::new("c.png")).is_some());
        assert_eq!(cache.total_bytes(), 800);
    }

    #[test]
    fn test_repeated_hits_keep_queue_bounded() {
        let mut cache = ImageCache::new(1024 * 1024);
        cache.insert("a.png".into(), image(10));
        cache.insert("b.png".into(), image(10));
        for _ in 0..10_000 {
            assert!(cache.get(Path::new("a.png")).is_some());
        }
        assert!(cache.lru_order.len() <= cache.entries.len() * 4 + 16);

        // Compaction keeps the live stamps, so eviction order is unchanged.
        let mut small = ImageCache::new(800);
        small.insert("a.png".into(), image(10));
        small.insert("b.png".into(), image(10));
        for _ in 0..100 {
            small.get(Path::new("a.png"));
        }
        small.insert("c.png".into(), image(10));
        assert!(small.get(Path::new("a.png")).is_some());
        assert!(small.get(Path::new("b.png")).is_none());
    }

    #[test]
    fn test_oversized_images_are_not_cached() {
        let mut cache = ImageCache::new(100);
        cache.insert("big.png".into(), image(10));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_reinsert_replaces_entry() {
        let mut cache = ImageCache::new(10_000);
        cache.insert("a.png".into(), image(10));
        cache.insert("a.png".into(), image(20));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.total_bytes(), 1600);
    }
}
