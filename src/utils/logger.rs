use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format selected by the `[logging]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    /// JSON lines, for when the CLI runs under a log collector.
    Json,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "studio_booking=debug,info"
    } else {
        "studio_booking=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_crate_debug() {
        assert_eq!(default_directive(false), "studio_booking=info");
        assert!(default_directive(true).starts_with("studio_booking=debug"));
    }

    #[test]
    fn test_format_names() {
        #[derive(Deserialize)]
        struct Section {
            format: LogFormat,
        }
        let json: Section = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(json.format, LogFormat::Json);
        assert!(toml::from_str::<Section>("format = \"xml\"").is_err());
    }
}
