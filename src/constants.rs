//! Shared UI constants such as colors, panel sizing, and scripts.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";
pub const BORDER_ACCENT: &str = "#3b82f6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_LINK: &str = "#3b82f6";
pub const ACCENT_ERROR: &str = "#f87171";

/// Preview canvas background; the composited frame keeps its transparency.
pub const CANVAS_BACKGROUND: &str = "#ffffff";
/// The 1080px canvas is shown at this scale.
pub const PREVIEW_DISPLAY_SCALE: f64 = 0.6;

pub const EDITOR_PANEL_WIDTH: f64 = 420.0;
pub const WINDOW_WIDTH: f64 = 1280.0;
pub const WINDOW_HEIGHT: f64 = 800.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub const PREVIEW_CANVAS_SCRIPT: &str = r#"
let canvas = null;
let ctx = null;
let latest = 0;

function getCanvas() {
    if (!canvas || !document.body.contains(canvas)) {
        canvas = document.getElementById("preview-canvas");
        ctx = canvas ? canvas.getContext("2d") : null;
    }
    return { canvas, ctx };
}

while (true) {
    const msg = await dioxus.recv();
    if (!msg) {
        continue;
    }
    if (msg.kind === "clear") {
        const state = getCanvas();
        if (state.ctx && state.canvas) {
            state.ctx.clearRect(0, 0, state.canvas.width, state.canvas.height);
        }
        continue;
    }
    if (msg.kind !== "frame") {
        continue;
    }
    if (msg.sequence < latest) {
        continue;
    }
    latest = msg.sequence;

    const state = getCanvas();
    if (!state.ctx || !state.canvas) {
        continue;
    }
    if (state.canvas.width !== msg.width || state.canvas.height !== msg.height) {
        state.canvas.width = msg.width;
        state.canvas.height = msg.height;
    }

    const sequence = msg.sequence;
    const image = new Image();
    image.onload = () => {
        if (sequence !== latest) {
            return;
        }
        state.ctx.clearRect(0, 0, state.canvas.width, state.canvas.height);
        state.ctx.drawImage(image, 0, 0);
    };
    image.src = msg.data_url;
}
"#;
