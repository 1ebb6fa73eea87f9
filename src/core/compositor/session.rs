use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::state::RenderKey;
use crate::template::TemplateConfig;

use super::assets::{load_mask, load_user_image, AssetError};
use super::cache::ImageCache;
use super::layers::mask_request;
use super::renderer::PreviewRenderer;
use super::types::{LayerImages, PreviewFrame, PreviewStats};

/// Budget for decoded user images kept between redraws.
pub const USER_IMAGE_CACHE_BYTES: usize = 256 * 1024 * 1024;

/// Images gathered for one redraw plus the loads that failed.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub images: LayerImages,
    pub errors: Vec<AssetError>,
}

impl LoadOutcome {
    pub fn is_empty(&self) -> bool {
        self.images.mask.is_none() && self.images.user.is_none()
    }

    /// Whether these images would change a frame already drawn with `base`.
    pub fn adds_to(&self, base: &LayerImages) -> bool {
        let new_mask = self.images.mask.is_some() && base.mask.is_none();
        let new_user = match (&self.images.user, &base.user) {
            (Some(loaded), Some(drawn)) => !Arc::ptr_eq(loaded, drawn),
            (Some(_), None) => true,
            (None, _) => false,
        };
        new_mask || new_user
    }
}

/// Owns everything a redraw needs and hands out redraw generations.
///
/// Every state change takes a new generation. Work finished for an older
/// generation is dropped instead of reaching the canvas.
pub struct PreviewSession {
    template: Arc<TemplateConfig>,
    renderer: PreviewRenderer,
    client: reqwest::Client,
    user_images: Arc<Mutex<ImageCache>>,
    generation: AtomicU64,
    frames: AtomicU64,
}

impl PreviewSession {
    pub fn new(template: Arc<TemplateConfig>, renderer: PreviewRenderer) -> Self {
        Self {
            template,
            renderer,
            client: reqwest::Client::new(),
            user_images: Arc::new(Mutex::new(ImageCache::new(USER_IMAGE_CACHE_BYTES))),
            generation: AtomicU64::new(0),
            frames: AtomicU64::new(0),
        }
    }

    pub fn template(&self) -> &TemplateConfig {
        &self.template
    }

    pub fn renderer(&self) -> &PreviewRenderer {
        &self.renderer
    }

    /// Start a redraw and return its generation.
    pub fn begin_redraw(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest_generation() == generation
    }

    /// Render on a blocking worker. `Ok(None)` means a newer redraw started
    /// while this one was rendering.
    pub async fn render(
        self: &Arc<Self>,
        key: RenderKey,
        images: LayerImages,
        generation: u64,
    ) -> Result<Option<(PreviewFrame, PreviewStats)>, AssetError> {
        if !self.is_current(generation) {
            return Ok(None);
        }
        let sequence = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        let session = Arc::clone(self);
        let rendered = tokio::task::spawn_blocking(move || {
            session
                .renderer
                .render_frame(&key, &session.template, &images, generation, sequence)
        })
        .await??;

        if !self.is_current(generation) {
            tracing::debug!(generation, latest = self.latest_generation(), "discarding stale frame");
            return Ok(None);
        }
        Ok(Some(rendered))
    }

    /// Images that can be drawn without waiting on any load: the user image
    /// when it is already decoded. The mask is refetched every redraw.
    pub fn cached_images(&self, key: &RenderKey) -> LayerImages {
        let user = key.image.as_ref().and_then(|image| {
            self.user_images
                .lock()
                .ok()
                .and_then(|mut cache| cache.get(image.path()))
        });
        LayerImages { mask: None, user }
    }

    /// Load the mask and user image for a redraw concurrently.
    pub async fn load_images(&self, key: &RenderKey, generation: u64) -> LoadOutcome {
        let mask = async {
            match mask_request(key, &self.template, generation) {
                Some(request) => Some(load_mask(&self.client, &request).await),
                None => None,
            }
        };
        let user = async {
            match &key.image {
                Some(image) => Some(load_user_image(Arc::clone(&self.user_images), image.path.clone()).await),
                None => None,
            }
        };
        let (mask, user) = tokio::join!(mask, user);

        let mut outcome = LoadOutcome::default();
        match mask {
            Some(Ok(image)) => outcome.images.mask = Some(image),
            Some(Err(err)) => outcome.errors.push(err),
            None => {}
        }
        match user {
            Some(Ok(image)) => outcome.images.user = Some(image),
            Some(Err(err)) => outcome.errors.push(err),
            None => {}
        }
        outcome
    }
}
