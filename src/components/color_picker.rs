use dioxus::prelude::*;
use crate::components::common::CommitTextField;
use crate::constants::*;
use crate::state::parse_hex_color;

/// Swatch grid plus the platform color input and a hex field.
/// Every path reports a hex string through `on_pick`.
#[component]
pub fn ColorPicker(
    value: String,
    swatches: Vec<String>,
    on_pick: EventHandler<String>,
) -> Element {
    // <input type=color> only accepts lowercase #rrggbb.
    let native_value = parse_hex_color(&value)
        .map(|color| format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2]))
        .unwrap_or_else(|| "#000000".to_string());
    let swatch_items: Vec<(String, &'static str)> = swatches
        .iter()
        .map(|swatch| (swatch.clone(), swatch_border(swatch, &value)))
        .collect();

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 10px; width: 240px;
                padding: 12px; margin-top: 10px;
                background-color: {BG_SURFACE}; border: 1px solid {BORDER_DEFAULT}; border-radius: 6px;
            ",
            div {
                style: "display: grid; grid-template-columns: repeat(8, 1fr); gap: 6px;",
                for (swatch, border) in swatch_items {
                    button {
                        key: "{swatch}",
                        title: "{swatch}",
                        style: "
                            width: 22px; height: 22px; padding: 0; cursor: pointer;
                            background-color: {swatch}; border-radius: 4px;
                            border: 2px solid {border};
                        ",
                        onclick: {
                            let swatch = swatch.clone();
                            move |_| on_pick.call(swatch.clone())
                        },
                    }
                }
            }
            div {
                style: "display: flex; align-items: flex-end; gap: 10px;",
                input {
                    r#type: "color",
                    value: "{native_value}",
                    style: "width: 40px; height: 32px; padding: 0; border: none; background: transparent; cursor: pointer;",
                    oninput: move |e| on_pick.call(e.value()),
                }
                div {
                    style: "flex: 1; min-width: 0;",
                    CommitTextField {
                        label: "Hex",
                        value: value.clone(),
                        on_commit: move |hex: String| on_pick.call(hex),
                    }
                }
            }
        }
    }
}

fn swatch_border(swatch: &str, selected: &str) -> &'static str {
    if swatch.eq_ignore_ascii_case(selected) {
        BORDER_ACCENT
    } else {
        BORDER_STRONG
    }
}
