//! Logging setup.
//!
//! Filter priority:
//!
//! 1. **`AD_PREVIEW_LOG`** - application-specific control; a bare level such as
//!    `debug` applies to this crate only
//! 2. **`RUST_LOG`** - standard tracing filter, used as-is
//! 3. **Default** - `warn` globally, `info` for this crate

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV_VAR: &str = "AD_PREVIEW_LOG";
const CRATE_TARGET: &str = "ad_preview_editor";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = create_filter(env::var(LOG_ENV_VAR).ok(), env::var("RUST_LOG").ok());
    Registry::default()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn create_filter(app_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    EnvFilter::new(filter_directives(app_log.as_deref(), rust_log.as_deref()))
}

fn filter_directives(app_log: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(app_log) = app_log.map(str::trim).filter(|value| !value.is_empty()) {
        // Module-specific syntax is passed through untouched.
        if app_log.contains(['=', ',', ':']) {
            return app_log.to_string();
        }
        return format!("warn,{}={}", CRATE_TARGET, app_log);
    }

    if let Some(rust_log) = rust_log.filter(|value| !value.trim().is_empty()) {
        return rust_log.to_string();
    }

    format!("warn,{}=info", CRATE_TARGET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(filter_directives(None, None), "warn,ad_preview_editor=info");
    }

    #[test]
    fn test_app_level_is_scoped_to_crate() {
        assert_eq!(filter_directives(Some("debug"), Some("trace")), "warn,ad_preview_editor=debug");
    }

    #[test]
    fn test_advanced_app_filter_passes_through() {
        assert_eq!(filter_directives(Some("reqwest=debug,info"), None), "reqwest=debug,info");
    }

    #[test]
    fn test_rust_log_used_when_app_log_missing() {
        assert_eq!(filter_directives(None, Some("error")), "error");
        assert_eq!(filter_directives(Some("  "), Some("error")), "error");
    }
}
