//! Static template configuration.
//!
//! The template describes the fixed parts of the ad: default texts, font sizes,
//! the mask overlay location and the colors offered to the user. It is loaded
//! once at startup and never changes afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when `AD_TEMPLATE` is not set.
pub const TEMPLATE_FILE_NAME: &str = "template.json";
pub const TEMPLATE_ENV_VAR: &str = "AD_TEMPLATE";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    pub text: String,
    pub font_size: f32,
    pub max_characters_per_line: u32,
    pub text_color: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            text: "Modern apartments in the heart of the city, ready to move in".to_string(),
            font_size: 30.0,
            max_characters_per_line: 40,
            text_color: "#000000".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaConfig {
    pub text: String,
    pub font_size: f32,
    pub text_color: String,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            text: "Contact Us".to_string(),
            font_size: 25.0,
            text_color: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateUrls {
    /// Mask overlay location, either an http(s) URL or a local path.
    pub mask: String,
}

impl Default for TemplateUrls {
    fn default() -> Self {
        Self {
            mask: "https://placehold.co/955x1200/png".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub name: String,
    pub caption: CaptionConfig,
    pub cta: CtaConfig,
    pub urls: TemplateUrls,
    pub accent_color: String,
    pub font_path: Option<PathBuf>,
    pub swatches: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            name: "Default template".to_string(),
            caption: CaptionConfig::default(),
            cta: CtaConfig::default(),
            urls: TemplateUrls::default(),
            accent_color: "#0369A1".to_string(),
            font_path: None,
            swatches: [
                "#D0021B", "#F5A623", "#F8E71C", "#8B572A", "#7ED321", "#417505",
                "#BD10E0", "#9013FE", "#4A90E2", "#50E3C2", "#B8E986", "#000000",
                "#4A4A4A", "#9B9B9B", "#FFFFFF", "#0369A1",
            ]
            .iter()
            .map(|color| color.to_string())
            .collect(),
        }
    }
}

impl TemplateConfig {
    /// Load a template from a JSON file. Missing sections keep their defaults.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let json = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the template the application should start with.
    ///
    /// `AD_TEMPLATE` wins over `template.json` in the working directory. A file
    /// that exists but cannot be read or parsed is logged and replaced by the
    /// built-in template.
    pub fn discover() -> Self {
        let candidate = std::env::var_os(TEMPLATE_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(TEMPLATE_FILE_NAME);
                local.exists().then_some(local)
            });

        let Some(path) = candidate else {
            tracing::info!("no template file found, using built-in template");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(template) => {
                tracing::info!(path = %path.display(), "loaded template");
                template
            }
            Err(err) => {
                tracing::error!("{err}; falling back to built-in template");
                Self::default()
            }
        }
    }
}

static ACTIVE_TEMPLATE: OnceLock<TemplateConfig> = OnceLock::new();

/// Install the process-wide template. Later calls are ignored.
pub fn install(template: TemplateConfig) {
    if ACTIVE_TEMPLATE.set(template).is_err() {
        tracing::warn!("template already installed, ignoring replacement");
    }
}

/// The process-wide template, or the built-in one if none was installed.
pub fn active() -> &'static TemplateConfig {
    ACTIVE_TEMPLATE.get_or_init(TemplateConfig::default)
}
