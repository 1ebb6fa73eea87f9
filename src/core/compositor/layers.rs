use std::path::PathBuf;

use ab_glyph::FontArc;
use image::Rgba;

use crate::state::{parse_hex_color, RenderKey};
use crate::template::TemplateConfig;
use crate::utils::cache_busted_url;

use super::fonts::measure_text;
use super::types::*;
use super::wrap::wrap_caption;

const FALLBACK_ACCENT: Rgba<u8> = Rgba([0x03, 0x69, 0xa1, 255]);
const FALLBACK_TEXT: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FALLBACK_CTA_TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Build the ordered draw commands for one redraw.
///
/// Image layers are included only when their pixels are present in `images`;
/// the mask is dropped entirely as soon as the user has picked an image.
pub fn plan_layers(
    key: &RenderKey,
    template: &TemplateConfig,
    images: &LayerImages,
    font: Option<&FontArc>,
    generation: u64,
) -> DisplayList {
    let mut list = DisplayList {
        generation,
        commands: Vec::new(),
    };
    let accent = accent_rgba(key, template);

    list.push(
        LayerKind::Border,
        DrawCommand::StrokeRoundedRect {
            rect: BORDER_RECT,
            radius: BORDER_RADIUS,
            width: BORDER_WIDTH,
            color: BORDER_COLOR,
        },
    );

    list.push(
        LayerKind::AccentBand,
        DrawCommand::Line {
            start: BAND_START,
            end: BAND_END,
            width: BAND_WIDTH,
            color: accent,
        },
    );

    if key.image.is_none() {
        if let Some(mask) = &images.mask {
            list.push(
                LayerKind::MaskOverlay,
                DrawCommand::Image {
                    image: mask.clone(),
                    rect: MASK_RECT,
                    mode: CompositeMode::SourceOver,
                },
            );
        }
    } else if let Some(user) = &images.user {
        list.push(
            LayerKind::UserImage,
            DrawCommand::Image {
                image: user.clone(),
                rect: USER_IMAGE_RECT,
                mode: CompositeMode::Destination,
            },
        );
    }

    let caption = &template.caption;
    let caption_color = template_color(&caption.text_color, FALLBACK_TEXT);
    let lines = match font {
        Some(font) => wrap_caption(
            &key.caption_text,
            caption.max_characters_per_line,
            caption.font_size,
            |text| measure_text(font, caption.font_size, text),
        ),
        None => wrap_caption(
            &key.caption_text,
            caption.max_characters_per_line,
            caption.font_size,
            |text| estimate_text_width(caption.font_size, text),
        ),
    };
    for (index, line) in lines.into_iter().enumerate() {
        list.push(
            LayerKind::Caption,
            DrawCommand::Text {
                text: line,
                x: CAPTION_X,
                y: CAPTION_BASELINE + index as f32 * caption.font_size * CAPTION_LINE_HEIGHT,
                size: caption.font_size,
                color: caption_color,
                role: TextRole::Caption,
            },
        );
    }

    list.push(
        LayerKind::Button,
        DrawCommand::StrokeRoundedRect {
            rect: BUTTON_RECT,
            radius: BUTTON_RADIUS,
            width: BUTTON_STROKE_WIDTH,
            color: accent,
        },
    );
    list.push(
        LayerKind::Button,
        DrawCommand::FillRoundedRect {
            rect: BUTTON_RECT,
            radius: BUTTON_RADIUS,
            color: accent,
        },
    );

    list.push(
        LayerKind::CtaText,
        DrawCommand::Text {
            text: key.cta_text.clone(),
            x: CTA_ORIGIN.0,
            y: CTA_ORIGIN.1,
            size: template.cta.font_size,
            color: template_color(&template.cta.text_color, FALLBACK_CTA_TEXT),
            role: TextRole::Cta,
        },
    );

    list
}

/// The mask load for a redraw, or `None` once the user has picked an image.
///
/// Remote masks carry a `random` query parameter taken from the generation so
/// every redraw bypasses any cached copy.
pub fn mask_request(key: &RenderKey, template: &TemplateConfig, generation: u64) -> Option<MaskRequest> {
    if key.image.is_some() {
        return None;
    }
    let location = template.urls.mask.trim();
    if location.is_empty() {
        return None;
    }
    let source = if is_remote(location) {
        MaskSource::Remote(cache_busted_url(location, generation))
    } else {
        MaskSource::Local(PathBuf::from(location))
    };
    Some(MaskRequest { generation, source })
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Accent color of the key, or the template default when it does not parse.
pub fn accent_rgba(key: &RenderKey, template: &TemplateConfig) -> Rgba<u8> {
    match key.accent_color.to_rgba() {
        Some(color) => color,
        None => {
            tracing::warn!(accent = %key.accent_color, "unparseable accent color, using template default");
            template_color(&template.accent_color, FALLBACK_ACCENT)
        }
    }
}

fn template_color(value: &str, fallback: Rgba<u8>) -> Rgba<u8> {
    parse_hex_color(value).unwrap_or(fallback)
}

/// Width estimate used when no font could be loaded.
fn estimate_text_width(font_size: f32, text: &str) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use image::RgbaImage;

    use super::*;
    use crate::state::{EditorEvent, EditorState, ImageRef};

    fn pixel_image() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])))
    }

    fn loaded() -> LayerImages {
        LayerImages {
            mask: Some(pixel_image()),
            user: Some(pixel_image()),
        }
    }

    #[test]
    fn test_layer_order_without_user_image() {
        let template = TemplateConfig::default();
        let state = EditorState::from_template(&template);
        let list = plan_layers(&state.render_key(), &template, &loaded(), None, 1);
        assert_eq!(
            list.layers(),
            vec![
                LayerKind::Border,
                LayerKind::AccentBand,
                LayerKind::MaskOverlay,
                LayerKind::Caption,
                LayerKind::Button,
                LayerKind::CtaText,
            ]
        );
    }

    #[test]
    fn test_selecting_image_swaps_mask_for_user_image() {
        let template = TemplateConfig::default();
        let mut state = EditorState::from_template(&template);
        let before = plan_layers(&state.render_key(), &template, &loaded(), None, 1);
        assert!(before.has_layer(LayerKind::MaskOverlay));
        assert!(!before.has_layer(LayerKind::UserImage));

        state.apply(EditorEvent::ImageSelected(ImageRef::from_path("/tmp/flat.jpg")));
        let after = plan_layers(&state.render_key(), &template, &loaded(), None, 2);
        assert!(!after.has_layer(LayerKind::MaskOverlay));
        assert!(after.has_layer(LayerKind::UserImage));
        assert_eq!(after.layers()[2], LayerKind::UserImage);
        assert!(mask_request(&state.render_key(), &template, 2).is_none());
    }

    #[test]
    fn test_unloaded_images_are_skipped() {
        let template = TemplateConfig::default();
        let state = EditorState::from_template(&template);
        let list = plan_layers(&state.render_key(), &template, &LayerImages::default(), None, 1);
        assert!(!list.has_layer(LayerKind::MaskOverlay));
        assert!(!list.has_layer(LayerKind::UserImage));
        assert!(list.has_layer(LayerKind::CtaText));
    }

    #[test]
    fn test_hello_world_caption_is_single_line() {
        let mut template = TemplateConfig::default();
        template.caption.max_characters_per_line = 40;
        template.caption.font_size = 30.0;
        let mut state = EditorState::from_template(&template);
        state.set_caption_text("Hello world");

        let list = plan_layers(&state.render_key(), &template, &LayerImages::default(), None, 1);
        assert_eq!(list.caption_lines(), vec!["Hello world"]);
    }

    #[test]
    fn test_caption_lines_step_down_by_line_height() {
        let mut template = TemplateConfig::default();
        template.caption.max_characters_per_line = 4;
        template.caption.font_size = 20.0;
        let mut state = EditorState::from_template(&template);
        state.set_caption_text("one two three");

        let list = plan_layers(&state.render_key(), &template, &LayerImages::default(), None, 1);
        let baselines: Vec<f32> = list
            .commands
            .iter()
            .filter(|entry| entry.layer == LayerKind::Caption)
            .filter_map(|entry| match entry.command {
                DrawCommand::Text { y, .. } => Some(y),
                _ => None,
            })
            .collect();
        assert_eq!(list.caption_lines(), vec!["one", "two", "three"]);
        let expected = [860.0, 884.0, 908.0];
        assert_eq!(baselines.len(), expected.len());
        for (actual, expected) in baselines.iter().zip(expected) {
            assert!((actual - expected).abs() < 0.01, "{actual} vs {expected}");
        }
    }

    #[test]
    fn test_mask_url_is_fresh_every_redraw() {
        let template = TemplateConfig::default();
        let state = EditorState::from_template(&template);
        let key = state.render_key();

        let first = mask_request(&key, &template, 1).unwrap();
        let second = mask_request(&key, &template, 2).unwrap();
        let (MaskSource::Remote(first_url), MaskSource::Remote(second_url)) = (&first.source, &second.source) else {
            panic!("default mask should be remote");
        };
        assert!(first_url.contains("random="));
        assert_ne!(first_url, second_url);
    }

    #[test]
    fn test_local_mask_path_is_not_cache_busted() {
        let mut template = TemplateConfig::default();
        template.urls.mask = "assets/mask.png".to_string();
        let state = EditorState::from_template(&template);
        let request = mask_request(&state.render_key(), &template, 3).unwrap();
        assert_eq!(request.source, MaskSource::Local(PathBuf::from("assets/mask.png")));
    }

    #[test]
    fn test_button_uses_accent() {
        let template = TemplateConfig::default();
        let mut state = EditorState::from_template(&template);
        state.set_accent_color("#FF0000");
        let list = plan_layers(&state.render_key(), &template, &LayerImages::default(), None, 1);
        let fill = list.commands.iter().find_map(|entry| match entry.command {
            DrawCommand::FillRoundedRect { color, .. } => Some(color),
            _ => None,
        });
        assert_eq!(fill, Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_bad_accent_falls_back_to_template_default() {
        let template = TemplateConfig::default();
        let mut state = EditorState::from_template(&template);
        state.set_accent_color("not a color");
        assert_eq!(accent_rgba(&state.render_key(), &template), Rgba([0x03, 0x69, 0xa1, 255]));
        assert_eq!(state.accent_color.as_str(), "not a color");
    }
}
