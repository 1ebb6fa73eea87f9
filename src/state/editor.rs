use crate::template::TemplateConfig;

use super::{AccentColor, ImageRef};

/// Everything the user can change about the ad.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub caption_text: String,
    pub cta_text: String,
    pub accent_color: AccentColor,
    pub image: Option<ImageRef>,
    pub picker_visible: bool,
}

/// A single user action coming from one of the input adapters.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    CaptionChanged(String),
    CtaChanged(String),
    AccentPicked(String),
    ImageSelected(ImageRef),
    PickerToggled,
}

impl EditorState {
    /// Initial state taken from the template defaults.
    pub fn from_template(template: &TemplateConfig) -> Self {
        Self {
            caption_text: template.caption.text.clone(),
            cta_text: template.cta.text.clone(),
            accent_color: AccentColor::new(template.accent_color.clone()),
            image: None,
            picker_visible: false,
        }
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        self.caption_text = text.into();
    }

    pub fn set_cta_text(&mut self, text: impl Into<String>) {
        self.cta_text = text.into();
    }

    pub fn set_accent_color(&mut self, hex: impl Into<String>) {
        self.accent_color = AccentColor::new(hex);
    }

    pub fn set_image(&mut self, image: ImageRef) {
        self.image = Some(image);
    }

    pub fn toggle_picker(&mut self) {
        self.picker_visible = !self.picker_visible;
    }

    /// Apply one event. Returns `true` when the preview must be redrawn.
    pub fn apply(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::CaptionChanged(text) => self.set_caption_text(text),
            EditorEvent::CtaChanged(text) => self.set_cta_text(text),
            EditorEvent::AccentPicked(hex) => self.set_accent_color(hex),
            EditorEvent::ImageSelected(image) => self.set_image(image),
            EditorEvent::PickerToggled => {
                self.toggle_picker();
                return false;
            }
        }
        true
    }

    /// The part of the state the compositor depends on.
    pub fn render_key(&self) -> RenderKey {
        RenderKey {
            caption_text: self.caption_text.clone(),
            cta_text: self.cta_text.clone(),
            accent_color: self.accent_color.clone(),
            image: self.image.clone(),
        }
    }
}

/// Snapshot of the redraw-relevant fields. Picker visibility is excluded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub caption_text: String,
    pub cta_text: String,
    pub accent_color: AccentColor,
    pub image: Option<ImageRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        EditorState::from_template(&TemplateConfig::default())
    }

    #[test]
    fn test_initial_state_uses_template() {
        let template = TemplateConfig::default();
        let state = EditorState::from_template(&template);
        assert_eq!(state.caption_text, template.caption.text);
        assert_eq!(state.cta_text, template.cta.text);
        assert_eq!(state.accent_color.as_str(), "#0369A1");
        assert!(state.image.is_none());
        assert!(!state.picker_visible);
    }

    #[test]
    fn test_accent_change_leaves_texts_alone() {
        let mut state = state();
        state.apply(EditorEvent::CaptionChanged("Big sale".to_string()));
        state.apply(EditorEvent::CtaChanged("Buy now".to_string()));

        let redraw = state.apply(EditorEvent::AccentPicked("#FF0000".to_string()));
        assert!(redraw);
        assert_eq!(state.caption_text, "Big sale");
        assert_eq!(state.cta_text, "Buy now");
        assert_eq!(state.accent_color.as_str(), "#FF0000");
    }

    #[test]
    fn test_each_event_touches_one_field() {
        let before = state();

        let mut changed = before.clone();
        changed.apply(EditorEvent::CtaChanged("Call".to_string()));
        assert_eq!(changed.caption_text, before.caption_text);
        assert_eq!(changed.accent_color, before.accent_color);
        assert_eq!(changed.image, before.image);
        assert_eq!(changed.picker_visible, before.picker_visible);

        let mut changed = before.clone();
        changed.apply(EditorEvent::ImageSelected(ImageRef::from_path("/tmp/a.png")));
        assert_eq!(changed.caption_text, before.caption_text);
        assert_eq!(changed.cta_text, before.cta_text);
        assert_eq!(changed.accent_color, before.accent_color);
        assert_eq!(changed.image.as_ref().map(|image| image.path.clone()), Some(std::path::PathBuf::from("/tmp/a.png")));
    }

    #[test]
    fn test_picker_toggle_does_not_redraw() {
        let mut state = state();
        let key = state.render_key();
        assert!(!state.apply(EditorEvent::PickerToggled));
        assert!(state.picker_visible);
        assert_eq!(state.render_key(), key);
        state.apply(EditorEvent::PickerToggled);
        assert!(!state.picker_visible);
    }
}
