//! Template compositor
//!
//! Turns the editor state into a display list of the seven template layers
//! and rasterizes it into preview frames.

mod assets;
mod cache;
mod fonts;
mod layers;
mod renderer;
mod session;
mod shapes;
mod types;
mod wrap;

pub use assets::AssetError;
pub use fonts::{load_font, FontError};
pub use layers::{mask_request, plan_layers};
pub use renderer::{rasterize, PreviewRenderer};
pub use session::{LoadOutcome, PreviewSession};
pub use shapes::RoundedRect;
pub use types::*;
pub use wrap::{line_width_budget, wrap_caption};
