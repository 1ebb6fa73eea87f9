use dioxus::prelude::*;
use crate::constants::*;

/// Single-line text input that reports every keystroke.
#[component]
pub fn LiveTextField(
    label: &'static str,
    value: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 4px; min-width: 0;
                padding: 8px 14px; border: 1px solid {BORDER_DEFAULT}; border-radius: 12px;
                background-color: {BG_ELEVATED};
            ",
            span { style: "font-size: 11px; color: {TEXT_MUTED};", "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                style: "
                    width: 100%; min-width: 0; box-sizing: border-box;
                    padding: 4px 0; font-size: 13px; font-weight: 600;
                    background-color: transparent; color: {TEXT_PRIMARY};
                    border: none; outline: none;
                    user-select: text;
                ",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// Text input that commits on blur or Enter, keeping a local draft meanwhile.
#[component]
pub fn CommitTextField(
    label: &'static str,
    value: String,
    on_commit: EventHandler<String>,
) -> Element {
    let mut text = use_signal(|| value.clone());
    let mut last_prop_value = use_signal(|| value.clone());

    use_effect(move || {
        let v = value.clone();
        if v != last_prop_value() {
            text.set(v.clone());
            last_prop_value.set(v);
        }
    });

    let make_commit = || {
        let text = text.clone();
        let mut last_prop_value = last_prop_value.clone();
        let on_commit = on_commit.clone();
        move || {
            let next = text().trim().to_string();
            on_commit.call(next.clone());
            last_prop_value.set(next);
        }
    };

    let mut commit_on_blur = make_commit();
    let mut commit_on_key = make_commit();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 0;",
            span { style: "font-size: 10px; color: {TEXT_MUTED};", "{label}" }
            input {
                r#type: "text",
                value: "{text()}",
                style: "
                    width: 100%; min-width: 0; box-sizing: border-box;
                    padding: 6px 8px; font-size: 12px;
                    font-family: 'SF Mono', Consolas, monospace;
                    background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    outline: none;
                    user-select: text;
                ",
                oninput: move |e| text.set(e.value()),
                onblur: move |_| commit_on_blur(),
                onkeydown: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter {
                        commit_on_key();
                    }
                },
            }
        }
    }
}
