//! Loading of the two image layers: the mask overlay and the user's image.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::imageops::{resize, FilterType};
use image::RgbaImage;
use thiserror::Error;

use super::cache::ImageCache;
use super::types::{MaskRequest, MaskSource, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to load image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode preview frame: {0}")]
    Encode(#[from] image::ImageError),
    #[error("image loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Fetch and decode the mask overlay for one redraw.
pub async fn load_mask(client: &reqwest::Client, request: &MaskRequest) -> Result<Arc<RgbaImage>, AssetError> {
    match &request.source {
        MaskSource::Remote(url) => {
            tracing::debug!(generation = request.generation, %url, "fetching mask");
            let response = client.get(url).send().await.map_err(|source| AssetError::Fetch {
                url: url.clone(),
                source,
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(AssetError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            let bytes = response.bytes().await.map_err(|source| AssetError::Fetch {
                url: url.clone(),
                source,
            })?;
            let name = url.clone();
            let image = tokio::task::spawn_blocking(move || {
                image::load_from_memory(&bytes)
                    .map(|image| image.into_rgba8())
                    .map_err(|source| AssetError::Decode { name, source })
            })
            .await??;
            Ok(Arc::new(image))
        }
        MaskSource::Local(path) => {
            let path = path.clone();
            let image = tokio::task::spawn_blocking(move || decode_file(&path)).await??;
            Ok(Arc::new(image))
        }
    }
}

/// Load the user's image, reusing a previous decode of the same path.
pub async fn load_user_image(cache: Arc<Mutex<ImageCache>>, path: PathBuf) -> Result<Arc<RgbaImage>, AssetError> {
    tokio::task::spawn_blocking(move || load_user_image_blocking(&cache, &path)).await?
}

pub fn load_user_image_blocking(cache: &Mutex<ImageCache>, path: &Path) -> Result<Arc<RgbaImage>, AssetError> {
    if let Ok(mut cache) = cache.lock() {
        if let Some(image) = cache.get(path) {
            return Ok(image);
        }
    }

    let image = decode_file(path)?;
    let image = Arc::new(scale_image_to_fit(image, CANVAS_WIDTH, CANVAS_HEIGHT));
    if let Ok(mut cache) = cache.lock() {
        cache.insert(path.to_path_buf(), Arc::clone(&image));
    }
    Ok(image)
}

fn decode_file(path: &Path) -> Result<RgbaImage, AssetError> {
    image::open(path)
        .map(|image| image.into_rgba8())
        .map_err(|source| AssetError::Decode {
            name: path.display().to_string(),
            source,
        })
}

/// Shrink oversized photos; they are drawn well below canvas size anyway.
pub(crate) fn scale_image_to_fit(image: RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);
    let width = image.width();
    let height = image.height();
    if width <= max_width && height <= max_height {
        return image;
    }

    let scale_w = max_width as f32 / width as f32;
    let scale_h = max_height as f32 / height as f32;
    let scale = scale_w.min(scale_h).max(0.01);
    let target_w = (width as f32 * scale).round().max(1.0) as u32;
    let target_h = (height as f32 * scale).round().max(1.0) as u32;

    resize(&image, target_w, target_h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn temp_png(name: &str, width: u32, height: u32) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ad-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_scale_to_fit_keeps_aspect() {
        let image = RgbaImage::new(4000, 2000);
        let scaled = scale_image_to_fit(image, 1080, 1080);
        assert_eq!((scaled.width(), scaled.height()), (1080, 540));
    }

    #[test]
    fn test_user_image_is_cached_by_path() {
        let path = temp_png("cached.png", 8, 8);
        let cache = Mutex::new(ImageCache::new(1024 * 1024));

        let first = load_user_image_blocking(&cache, &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = load_user_image_blocking(&cache, &path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_user_image_reports_decode_error() {
        let cache = Mutex::new(ImageCache::new(1024));
        let result = load_user_image_blocking(&cache, Path::new("/no/such/photo.png"));
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_local_mask_loads_from_disk() {
        let path = temp_png("mask.png", 5, 6);
        let request = MaskRequest {
            generation: 1,
            source: MaskSource::Local(path),
        };
        let image = load_mask(&reqwest::Client::new(), &request).await.unwrap();
        assert_eq!((image.width(), image.height()), (5, 6));
    }
}
