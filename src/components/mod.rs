//! UI components grouped by feature domain.
pub mod common;

mod title_bar;
mod status_bar;
mod preview_panel;
mod editor_panel;
mod color_picker;

pub use title_bar::TitleBar;
pub use status_bar::StatusBar;
pub use preview_panel::PreviewPanel;
pub use editor_panel::EditorPanel;
pub use color_picker::ColorPicker;
