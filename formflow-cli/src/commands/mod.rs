//! CLI command implementations

pub mod render;
pub mod serve;
pub mod submit;

use std::path::Path;

use anyhow::{Context, Result};
use formflow::config::FormsConfig;

pub use render::RenderCommand;
pub use serve::ServeCommand;
pub use submit::SubmitCommand;

/// Load configuration from `path`, or from `./formflow.toml` when absent
///
/// # Errors
///
/// Fails when a configuration source holds values of the wrong shape.
pub fn load_config(path: Option<&Path>) -> Result<FormsConfig> {
    match path {
        Some(path) => FormsConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => FormsConfig::load().context("Failed to load configuration"),
    }
}

/// Parse a `key=value` field argument
///
/// # Errors
///
/// Fails when there is no `=` or the key is empty.
pub fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_owned(), value.to_owned())),
        _ => Err(format!("expected key=value, got `{arg}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("name=Ben").unwrap(), ("name".into(), "Ben".into()));
        assert_eq!(parse_field("msg=a=b").unwrap(), ("msg".into(), "a=b".into()));
        assert_eq!(parse_field("empty=").unwrap(), ("empty".into(), String::new()));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }
}
