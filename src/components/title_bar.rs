use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(
    template_name: String,
    show_preview_stats: bool,
    on_toggle_preview_stats: EventHandler<MouseEvent>,
) -> Element {
    let stats_toggle_bg = if show_preview_stats { BG_HOVER } else { BG_BASE };
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Ad Preview Editor" }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "{template_name}" }
            div {
                style: "display: flex; align-items: center; gap: 6px;",
                span {
                    style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                    "Stats"
                }
                button {
                    class: "collapse-btn",
                    style: "
                        background: {stats_toggle_bg};
                        border: 1px solid {BORDER_DEFAULT};
                        color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                        padding: 4px 10px; border-radius: 999px;
                    ",
                    onclick: move |e| on_toggle_preview_stats.call(e),
                    if show_preview_stats { "On" } else { "Off" }
                }
            }
        }
    }
}
