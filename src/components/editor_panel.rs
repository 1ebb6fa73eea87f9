use dioxus::prelude::*;
use crate::components::common::LiveTextField;
use crate::components::ColorPicker;
use crate::constants::*;
use crate::state::{EditorEvent, EditorState, ImageRef};

/// Right-hand form: image selection, caption, CTA and accent color.
/// Every control reports exactly one `EditorEvent`.
#[component]
pub fn EditorPanel(
    state: EditorState,
    swatches: Vec<String>,
    status: Option<String>,
    on_event: EventHandler<EditorEvent>,
) -> Element {
    let image_label = state
        .image
        .as_ref()
        .map(|image| image.display_name())
        .unwrap_or_else(|| "Change the ad creative image.".to_string());
    let accent = state.accent_color.to_string();
    let picker_visible = state.picker_visible;

    let pick_image = move |_: MouseEvent| {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
        {
            tracing::info!(path = %path.display(), "selected ad image");
            on_event.call(EditorEvent::ImageSelected(ImageRef::from_path(path)));
        }
    };

    rsx! {
        div {
            style: "
                width: {EDITOR_PANEL_WIDTH}px; flex-shrink: 0;
                display: flex; flex-direction: column; justify-content: center; gap: 18px;
                padding: 32px; box-sizing: border-box; overflow-y: auto;
                background-color: {BG_BASE}; border-left: 1px solid {BORDER_DEFAULT};
            ",
            div {
                style: "display: flex; flex-direction: column; gap: 4px;",
                span { style: "font-size: 22px; font-weight: 700; color: {TEXT_PRIMARY};", "Ad customization" }
                span { style: "font-size: 13px; color: {TEXT_MUTED};", "Customise your ad and get the template accordingly" }
            }

            div {
                style: "
                    display: flex; align-items: center; gap: 6px; min-width: 0;
                    padding: 14px; border: 1px solid {BORDER_DEFAULT}; border-radius: 12px;
                    background-color: {BG_ELEVATED};
                ",
                span {
                    style: "flex: 1; min-width: 0; font-size: 13px; color: {TEXT_SECONDARY}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                    "{image_label}"
                }
                span {
                    style: "font-size: 13px; font-weight: 700; color: {ACCENT_LINK}; cursor: pointer; user-select: none;",
                    onclick: pick_image,
                    "select file"
                }
            }

            div {
                style: "display: flex; align-items: center; gap: 10px; color: {TEXT_DIM}; font-size: 11px; text-transform: uppercase; letter-spacing: 0.6px;",
                div { style: "flex: 1; height: 1px; background-color: {BORDER_DEFAULT};" }
                "Edit Contents"
                div { style: "flex: 1; height: 1px; background-color: {BORDER_DEFAULT};" }
            }

            LiveTextField {
                label: "Ad Content",
                value: state.caption_text.clone(),
                on_input: move |text: String| on_event.call(EditorEvent::CaptionChanged(text)),
            }
            LiveTextField {
                label: "CTA",
                value: state.cta_text.clone(),
                on_input: move |text: String| on_event.call(EditorEvent::CtaChanged(text)),
            }

            div {
                style: "display: flex; flex-direction: column;",
                span { style: "font-size: 13px; color: {TEXT_SECONDARY};", "Change your color" }
                div {
                    style: "display: flex; align-items: center; gap: 10px; margin-top: 10px;",
                    button {
                        style: "
                            width: 40px; height: 40px; border-radius: 50%;
                            display: flex; align-items: center; justify-content: center;
                            background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                            border: 2px solid {BORDER_STRONG}; cursor: pointer; font-size: 18px;
                        ",
                        onclick: move |_| on_event.call(EditorEvent::PickerToggled),
                        if picker_visible { "−" } else { "+" }
                    }
                    div {
                        style: "width: 24px; height: 24px; border-radius: 4px; border: 1px solid {BORDER_DEFAULT}; background-color: {accent};",
                    }
                    span {
                        style: "font-family: 'SF Mono', Consolas, monospace; font-size: 12px; color: {TEXT_MUTED};",
                        "{accent}"
                    }
                }
                if picker_visible {
                    ColorPicker {
                        value: accent.clone(),
                        swatches: swatches.clone(),
                        on_pick: move |hex: String| on_event.call(EditorEvent::AccentPicked(hex)),
                    }
                }
            }

            if let Some(status) = status {
                div {
                    style: "
                        padding: 8px 12px; border-radius: 6px; font-size: 12px;
                        color: {ACCENT_ERROR}; border: 1px solid {BORDER_DEFAULT}; background-color: {BG_SURFACE};
                        white-space: pre-wrap; user-select: text;
                    ",
                    "{status}"
                }
            }
        }
    }
}
