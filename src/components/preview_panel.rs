use dioxus::prelude::*;
use crate::constants::*;
use crate::core::compositor::{PreviewStats, CANVAS_HEIGHT, CANVAS_WIDTH};

#[component]
pub fn PreviewPanel(
    generation: Option<u64>,
    preview_stats: Option<PreviewStats>,
    show_preview_stats: bool,
) -> Element {
    let has_frame = generation.is_some();
    let canvas_visibility = if has_frame { "visible" } else { "hidden" };
    let display_w = (CANVAS_WIDTH as f64 * PREVIEW_DISPLAY_SCALE).round();
    let display_h = (CANVAS_HEIGHT as f64 * PREVIEW_DISPLAY_SCALE).round();
    let generation_label = generation
        .map(|generation| format!("#{}", generation))
        .unwrap_or_else(|| "--".to_string());
    let stats_text = if show_preview_stats {
        preview_stats.map(|stats| {
            let mut lines = Vec::new();
            lines.push(format!("total {:.1}ms", stats.total_ms));
            lines.push(format!("plan {:.1}ms", stats.plan_ms));
            lines.push(format!("raster {:.1}ms", stats.raster_ms));
            lines.push(format!("encode {:.1}ms", stats.encode_ms));
            lines.push(format!("layers {}", stats.layers));
            lines.join("\n")
        })
    } else {
        None
    };
    let stats_text = stats_text.unwrap_or_default();
    let show_stats_overlay = show_preview_stats && !stats_text.is_empty();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; flex: 1; min-width: 0; min-height: 0; background-color: {BG_DEEPEST};",

            div {
                style: "
                    display: grid; grid-template-columns: auto 1fr auto; align-items: center;
                    height: 32px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                ",
                span {
                    style: "grid-column: 1; font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;",
                    "Preview"
                }
                span {
                    style: "grid-column: 2; justify-self: center; font-family: 'SF Mono', Consolas, monospace; font-size: 10px; color: {TEXT_DIM};",
                    "{generation_label}"
                }
                div {
                    style: "grid-column: 3; justify-self: end; display: flex; align-items: center; gap: 6px; font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};",
                    span { "{CANVAS_WIDTH} x {CANVAS_HEIGHT}" }
                    span { style: "color: {TEXT_MUTED};", "@" }
                    span { "60%" }
                }
            }

            div {
                style: "flex: 1; display: flex; position: relative; min-height: 0; overflow: hidden;",
                div {
                    style: "position: relative; flex: 1; display: flex; align-items: center; justify-content: center; min-height: 0; overflow: auto;",
                    div {
                        style: "width: {display_w}px; height: {display_h}px; flex-shrink: 0; position: relative;",
                        canvas {
                            id: "preview-canvas",
                            width: "{CANVAS_WIDTH}",
                            height: "{CANVAS_HEIGHT}",
                            style: "
                                position: absolute; left: 0; top: 0;
                                width: {CANVAS_WIDTH}px; height: {CANVAS_HEIGHT}px;
                                transform: scale({PREVIEW_DISPLAY_SCALE}); transform-origin: top left;
                                background-color: {CANVAS_BACKGROUND}; visibility: {canvas_visibility};
                            ",
                        }
                    }
                    if !has_frame {
                        div {
                            style: "position: absolute; inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 12px; color: {TEXT_DIM};",
                            div {
                                style: "width: 48px; height: 48px; border: 1px solid {BORDER_DEFAULT}; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 14px;",
                                "?"
                            }
                            span { style: "font-size: 12px;", "Rendering preview" }
                        }
                    }
                }
                if show_stats_overlay {
                    div {
                        style: "
                            width: 180px; padding: 10px 12px; border-left: 1px solid {BORDER_SUBTLE};
                            background-color: {BG_SURFACE};
                            font-family: 'SF Mono', Consolas, monospace;
                            font-size: 10px; color: {TEXT_DIM};
                            white-space: pre; user-select: text; cursor: text;
                            overflow: auto;
                        ",
                        "{stats_text}"
                    }
                }
            }
        }
    }
}
