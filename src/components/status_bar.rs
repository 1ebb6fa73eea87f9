use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn StatusBar(
    message: String,
    is_error: bool,
    font_loaded: bool,
    image_name: Option<String>,
) -> Element {
    let message_color = if is_error { ACCENT_ERROR } else { TEXT_DIM };
    let font_label = if font_loaded { "font ok" } else { "no font" };
    let image_label = image_name.unwrap_or_else(|| "mask overlay".to_string());
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 22px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM};",
            span {
                style: "color: {message_color}; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                "{message}"
            }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "{image_label}" }
                span { "{font_label}" }
            }
        }
    }
}
