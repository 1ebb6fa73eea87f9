//! Root application component
//!
//! Owns the editor state, drives a redraw for every render-relevant change and
//! forwards finished frames to the preview canvas in the webview.

use std::sync::Arc;

use dioxus::prelude::*;
use serde::Serialize;

use crate::components::{EditorPanel, PreviewPanel, StatusBar, TitleBar};
use crate::constants::*;
use crate::core::compositor::{
    load_font, PreviewFrame, PreviewRenderer, PreviewSession, PreviewStats,
};
use crate::state::{EditorEvent, EditorState, RenderKey};
use crate::template;

#[derive(Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PreviewCanvasMessage {
    Frame {
        generation: u64,
        sequence: u64,
        width: u32,
        height: u32,
        data_url: String,
    },
    Clear,
}

/// Main application component
#[component]
pub fn App() -> Element {
    let template = template::active();

    // Editor state - the single record every input adapter writes to
    let mut editor = use_signal(|| EditorState::from_template(template));

    // Core services
    let (session, font_error) = use_hook(|| {
        let (font, font_error) = match load_font(template.font_path.as_deref()) {
            Ok(font) => (Some(font), None),
            Err(err) => {
                tracing::error!("{err}");
                (None, Some(err.to_string()))
            }
        };
        let session = Arc::new(PreviewSession::new(
            Arc::new(template.clone()),
            PreviewRenderer::new(font),
        ));
        (session, font_error)
    });
    let font_loaded = session.renderer().has_font();

    let preview_frame = use_signal(|| None::<PreviewFrame>);
    let preview_stats = use_signal(|| None::<PreviewStats>);
    let load_status = use_signal(|| None::<String>);
    let mut preview_eval = use_signal(|| None::<document::Eval>);
    let mut show_preview_stats = use_signal(|| false);

    // Picker visibility is not part of the key, so toggling it never redraws.
    let render_key = use_memo(move || editor.read().render_key());

    use_effect(move || {
        let key = render_key();
        let session = session.clone();
        spawn(async move {
            run_redraw(session, key, preview_frame, preview_stats, load_status).await;
        });
    });

    use_effect(move || {
        if preview_eval().is_some() {
            return;
        }
        let eval = document::eval(PREVIEW_CANVAS_SCRIPT);
        preview_eval.set(Some(eval));
    });

    use_effect(move || {
        let frame = preview_frame();
        let Some(eval) = preview_eval() else {
            return;
        };
        let _ = match frame {
            Some(frame) => eval.send(PreviewCanvasMessage::Frame {
                generation: frame.generation,
                sequence: frame.sequence,
                width: frame.width,
                height: frame.height,
                data_url: frame.data_url,
            }),
            None => eval.send(PreviewCanvasMessage::Clear),
        };
    });

    let state_snapshot = editor();
    let image_name = state_snapshot.image.as_ref().map(|image| image.display_name());
    let (status_message, status_is_error) = match (load_status(), font_error) {
        (Some(err), _) => (err.lines().next().unwrap_or_default().to_string(), true),
        (None, Some(err)) => (err, true),
        (None, None) => ("Ready".to_string(), false),
    };
    let frame_generation = preview_frame.read().as_ref().map(|frame| frame.generation);

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh; overflow: hidden;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            ",

            TitleBar {
                template_name: template.name.clone(),
                show_preview_stats: show_preview_stats(),
                on_toggle_preview_stats: move |_| show_preview_stats.set(!show_preview_stats()),
            }

            div {
                style: "display: flex; flex: 1; min-height: 0;",
                PreviewPanel {
                    generation: frame_generation,
                    preview_stats: preview_stats(),
                    show_preview_stats: show_preview_stats(),
                }
                EditorPanel {
                    state: state_snapshot.clone(),
                    swatches: template.swatches.clone(),
                    status: load_status(),
                    on_event: move |event: EditorEvent| {
                        // Redraws are driven by the `render_key` memo; this only traces.
                        let redraw = editor.write().apply(event.clone());
                        tracing::trace!(?event, redraw, "editor event");
                    },
                }
            }

            StatusBar {
                message: status_message,
                is_error: status_is_error,
                font_loaded,
                image_name,
            }
        }
    }
}

/// One full redraw: base layers (plus an already decoded user image) straight
/// away, then again only if the loads brought something new. Anything that
/// finishes after a newer redraw started is dropped.
async fn run_redraw(
    session: Arc<PreviewSession>,
    key: RenderKey,
    mut preview_frame: Signal<Option<PreviewFrame>>,
    mut preview_stats: Signal<Option<PreviewStats>>,
    mut load_status: Signal<Option<String>>,
) {
    let generation = session.begin_redraw();
    let base = session.cached_images(&key);

    match session.render(key.clone(), base.clone(), generation).await {
        Ok(Some((frame, stats))) => {
            preview_frame.set(Some(frame));
            preview_stats.set(Some(stats));
        }
        Ok(None) => return,
        Err(err) => {
            tracing::error!(generation, "{err}");
            load_status.set(Some(err.to_string()));
            return;
        }
    }

    let outcome = session.load_images(&key, generation).await;
    if !session.is_current(generation) {
        tracing::debug!(generation, "image loads finished after a newer redraw, ignoring");
        return;
    }

    let errors: Vec<String> = outcome.errors.iter().map(|err| err.to_string()).collect();
    for err in &errors {
        tracing::warn!(generation, "{err}");
    }
    load_status.set(if errors.is_empty() {
        None
    } else {
        Some(errors.join("\n"))
    });

    if !outcome.adds_to(&base) {
        return;
    }

    match session.render(key, outcome.images, generation).await {
        Ok(Some((frame, stats))) => {
            preview_frame.set(Some(frame));
            preview_stats.set(Some(stats));
        }
        Ok(None) => {}
        Err(err) => {
            tracing::error!(generation, "{err}");
            load_status.set(Some(err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_message_carries_sequence() {
        let message = PreviewCanvasMessage::Frame {
            generation: 3,
            sequence: 7,
            width: 1080,
            height: 1080,
            data_url: "data:image/png;base64,".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["kind"], "frame");
        assert_eq!(json["generation"], 3);
        assert_eq!(json["sequence"], 7);

        let clear = serde_json::to_value(PreviewCanvasMessage::Clear).unwrap();
        assert_eq!(clear["kind"], "clear");
    }
}
