use std::io::Cursor;
use std::time::Instant;

use ab_glyph::{FontArc, PxScale};
use base64::Engine as _;
use image::imageops::{overlay, resize, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::state::RenderKey;
use crate::template::TemplateConfig;

use super::assets::AssetError;
use super::fonts::ascent;
use super::layers::plan_layers;
use super::shapes::{draw_thick_segment, RoundedRect};
use super::types::*;

/// Rasterizes template redraws into encoded preview frames.
pub struct PreviewRenderer {
    font: Option<FontArc>,
}

impl PreviewRenderer {
    pub fn new(font: Option<FontArc>) -> Self {
        if font.is_none() {
            tracing::warn!("no font available, caption and CTA text will not be drawn");
        }
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn font(&self) -> Option<&FontArc> {
        self.font.as_ref()
    }

    /// Plan and rasterize a full redraw.
    pub fn render_canvas(
        &self,
        key: &RenderKey,
        template: &TemplateConfig,
        images: &LayerImages,
        generation: u64,
    ) -> (RgbaImage, PreviewStats) {
        let render_start = Instant::now();
        let mut stats = PreviewStats::default();

        let plan_start = Instant::now();
        let list = plan_layers(key, template, images, self.font.as_ref(), generation);
        stats.plan_ms = elapsed_ms(plan_start);
        stats.layers = list.layers().len();

        let raster_start = Instant::now();
        let canvas = rasterize(&list, self.font.as_ref());
        stats.raster_ms = elapsed_ms(raster_start);
        stats.total_ms = elapsed_ms(render_start);

        (canvas, stats)
    }

    /// Render a redraw and encode it for the preview canvas.
    pub fn render_frame(
        &self,
        key: &RenderKey,
        template: &TemplateConfig,
        images: &LayerImages,
        generation: u64,
        sequence: u64,
    ) -> Result<(PreviewFrame, PreviewStats), AssetError> {
        let render_start = Instant::now();
        let (canvas, mut stats) = self.render_canvas(key, template, images, generation);

        let encode_start = Instant::now();
        let data_url = encode_data_url(&canvas)?;
        stats.encode_ms = elapsed_ms(encode_start);
        stats.total_ms = elapsed_ms(render_start);

        tracing::debug!(
            generation,
            sequence,
            layers = stats.layers,
            total_ms = stats.total_ms,
            "rendered preview frame"
        );

        Ok((
            PreviewFrame {
                generation,
                sequence,
                width: canvas.width(),
                height: canvas.height(),
                data_url,
            },
            stats,
        ))
    }
}

/// Execute a display list onto a fresh, fully transparent canvas.
pub fn rasterize(list: &DisplayList, font: Option<&FontArc>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba([0, 0, 0, 0]));
    for entry in &list.commands {
        match &entry.command {
            DrawCommand::StrokeRoundedRect { rect, radius, width, color } => {
                RoundedRect::new(*rect, *radius).stroke(&mut canvas, *color, *width);
            }
            DrawCommand::FillRoundedRect { rect, radius, color } => {
                RoundedRect::new(*rect, *radius).fill(&mut canvas, *color);
            }
            DrawCommand::Line { start, end, width, color } => {
                draw_thick_segment(&mut canvas, *start, *end, *width, *color);
            }
            DrawCommand::Image { image, rect, mode } => {
                draw_image(&mut canvas, image, *rect, *mode);
            }
            DrawCommand::Text { text, x, y, size, color, .. } => {
                let Some(font) = font else {
                    continue;
                };
                if text.is_empty() {
                    continue;
                }
                let top = y - ascent(font, *size);
                draw_text_mut(
                    &mut canvas,
                    *color,
                    x.round() as i32,
                    top.round() as i32,
                    PxScale::from(*size),
                    font,
                    text,
                );
            }
        }
    }
    canvas
}

/// Stretch `image` to `rect` and composite it.
pub fn draw_image(canvas: &mut RgbaImage, image: &RgbaImage, rect: RectF, mode: CompositeMode) {
    let width = rect.width.round();
    let height = rect.height.round();
    if width < 1.0 || height < 1.0 || image.width() == 0 || image.height() == 0 {
        return;
    }
    let (width, height) = (width as u32, height as u32);
    let resized = if image.width() == width && image.height() == height {
        image.clone()
    } else {
        resize(image, width, height, FilterType::Triangle)
    };
    let x = rect.x.round() as i64;
    let y = rect.y.round() as i64;

    match mode {
        CompositeMode::SourceOver => overlay(canvas, &resized, x, y),
        CompositeMode::Destination => composite_atop(canvas, &resized, x, y),
    }
}

/// Blend `top` onto `canvas` only where the canvas already has content.
/// The canvas alpha is left unchanged.
pub fn composite_atop(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let canvas_w = canvas.width() as i64;
    let canvas_h = canvas.height() as i64;
    for (tx, ty, src) in top.enumerate_pixels() {
        let cx = x + tx as i64;
        let cy = y + ty as i64;
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        if dst[3] == 0 || src[3] == 0 {
            continue;
        }
        let alpha = src[3] as f32 / 255.0;
        for channel in 0..3 {
            let blended = src[channel] as f32 * alpha + dst[channel] as f32 * (1.0 - alpha);
            dst[channel] = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// PNG-encode and wrap in a `data:` URL for the webview canvas.
pub fn encode_data_url(canvas: &RgbaImage) -> Result<String, AssetError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:image/png;base64,{}", encoded))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::{EditorState, ImageRef};

    #[test]
    fn test_atop_skips_transparent_pixels() {
        let mut canvas = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 0]));
        canvas.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let top = RgbaImage::from_pixel(4, 1, Rgba([255, 0, 0, 255]));

        composite_atop(&mut canvas, &top, 0, 0);

        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*canvas.get_pixel(1, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_atop_keeps_canvas_alpha() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let top = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 255]));
        composite_atop(&mut canvas, &top, 0, 0);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_accent_band_is_painted() {
        let template = TemplateConfig::default();
        let mut state = EditorState::from_template(&template);
        state.set_accent_color("#FF0000");
        let renderer = PreviewRenderer::new(None);
        let (canvas, stats) = renderer.render_canvas(&state.render_key(), &template, &LayerImages::default(), 1);

        assert_eq!((canvas.width(), canvas.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
        // A point on the band's center line.
        assert_eq!(*canvas.get_pixel(690, 472), Rgba([255, 0, 0, 255]));
        // Top-left corner is outside every layer.
        assert_eq!(canvas.get_pixel(5, 5)[3], 0);
        assert!(stats.layers >= 4);
    }

    #[test]
    fn test_user_image_only_shows_over_existing_content() {
        let template = TemplateConfig::default();
        let mut state = EditorState::from_template(&template);
        state.set_image(ImageRef::from_path("/tmp/photo.png"));
        let images = LayerImages {
            mask: None,
            user: Some(Arc::new(RgbaImage::from_pixel(9, 7, Rgba([0, 255, 0, 255])))),
        };
        let renderer = PreviewRenderer::new(None);
        let (canvas, _) = renderer.render_canvas(&state.render_key(), &template, &images, 1);

        // Inside the user image rect and on the accent band.
        assert_eq!(*canvas.get_pixel(690, 472), Rgba([0, 255, 0, 255]));
        // Inside the user image rect but off the band and the border.
        assert_eq!(canvas.get_pixel(120, 700)[3], 0);
    }

    #[test]
    fn test_data_url_is_png() {
        let canvas = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let url = encode_data_url(&canvas).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBOR"));
    }
}
