use std::sync::Arc;

use image::{Rgba, RgbaImage};

pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1080;

pub const BORDER_RECT: RectF = RectF::new(450.0, 20.0, 610.0, 800.0);
pub const BORDER_RADIUS: f32 = 100.0;
pub const BORDER_WIDTH: f32 = 1.0;
pub const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub const BAND_START: (f32, f32) = (300.0, -135.0);
pub const BAND_END: (f32, f32) = (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
pub const BAND_WIDTH: f32 = 500.0;

pub const MASK_RECT: RectF = RectF::new(70.0, -395.0, 955.0, 1200.0);
pub const USER_IMAGE_RECT: RectF = RectF::new(100.0, 70.0, 900.0, 700.0);

pub const CAPTION_X: f32 = 120.0;
pub const CAPTION_BASELINE: f32 = 860.0;
pub const CAPTION_LINE_HEIGHT: f32 = 1.2;

pub const BUTTON_RECT: RectF = RectF::new(700.0, 835.0, 230.0, 60.0);
pub const BUTTON_RADIUS: f32 = 25.0;
pub const BUTTON_STROKE_WIDTH: f32 = 3.0;
pub const CTA_ORIGIN: (f32, f32) = (760.0, 873.0);

/// Axis-aligned rectangle in canvas pixels. May extend past the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// How an image command combines with what is already on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    /// Blend over everything (canvas `source-over`).
    SourceOver,
    /// Only paint where the canvas already has content; canvas alpha is kept.
    Destination,
}

/// Which of the fixed template layers a command belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Border,
    AccentBand,
    MaskOverlay,
    UserImage,
    Caption,
    Button,
    CtaText,
}

/// Which loaded font a text command uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Caption,
    Cta,
}

/// A single drawing primitive. Coordinates are in canvas pixels.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Outline of a rounded rectangle.
    StrokeRoundedRect {
        rect: RectF,
        radius: f32,
        width: f32,
        color: Rgba<u8>,
    },
    /// Filled rounded rectangle.
    FillRoundedRect {
        rect: RectF,
        radius: f32,
        color: Rgba<u8>,
    },
    /// Straight segment with butt caps.
    Line {
        start: (f32, f32),
        end: (f32, f32),
        width: f32,
        color: Rgba<u8>,
    },
    /// Image stretched to `rect`.
    Image {
        image: Arc<RgbaImage>,
        rect: RectF,
        mode: CompositeMode,
    },
    /// One line of text; `y` is the alphabetic baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Rgba<u8>,
        role: TextRole,
    },
}

/// A command tagged with its layer.
#[derive(Clone, Debug)]
pub struct LayerCommand {
    pub layer: LayerKind,
    pub command: DrawCommand,
}

/// Ordered commands for one redraw.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub generation: u64,
    pub commands: Vec<LayerCommand>,
}

impl DisplayList {
    pub fn push(&mut self, layer: LayerKind, command: DrawCommand) {
        self.commands.push(LayerCommand { layer, command });
    }

    pub fn has_layer(&self, layer: LayerKind) -> bool {
        self.commands.iter().any(|entry| entry.layer == layer)
    }

    /// Layers in draw order, one entry per layer.
    pub fn layers(&self) -> Vec<LayerKind> {
        let mut layers: Vec<LayerKind> = Vec::new();
        for entry in &self.commands {
            if layers.last() != Some(&entry.layer) {
                layers.push(entry.layer);
            }
        }
        layers
    }

    /// Text of every caption line, top to bottom.
    pub fn caption_lines(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|entry| entry.layer == LayerKind::Caption)
            .filter_map(|entry| match &entry.command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Decoded images available to a redraw.
#[derive(Clone, Debug, Default)]
pub struct LayerImages {
    pub mask: Option<Arc<RgbaImage>>,
    pub user: Option<Arc<RgbaImage>>,
}

/// Where the mask overlay comes from for one redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskSource {
    /// Remote image; the URL already carries the cache-busting parameter.
    Remote(String),
    /// Local file, read as-is.
    Local(std::path::PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskRequest {
    pub generation: u64,
    pub source: MaskSource,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewStats {
    pub total_ms: f64,
    pub plan_ms: f64,
    pub raster_ms: f64,
    pub encode_ms: f64,
    pub layers: usize,
}

/// An encoded frame ready for the preview canvas.
///
/// A redraw can publish several frames under one generation; `sequence` is
/// unique per frame and increases in render order.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewFrame {
    pub generation: u64,
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}
