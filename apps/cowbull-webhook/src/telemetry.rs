//! Process-wide tracing subscriber for the webhook binary.
//!
//! `RUST_LOG` picks the filter (falling back to [`DEFAULT_FILTER`] when unset
//! or unparsable). `LOG_FORMAT=pretty` switches from JSON lines to
//! human-readable output for local runs. JSON lines include the current
//! `webhook_request` span, so every event in a turn carries its `trace_id`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_FILTER: &str = "info,actix_web=info,reqwest=warn,hyper=warn";
pub const FORMAT_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| EnvFilter::try_new(r).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::parse(std::env::var(FORMAT_VAR).ok().as_deref()) {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_the_default_format() {
        assert_eq!(LogFormat::parse(None), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("xml")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" Pretty ")), LogFormat::Pretty);
    }

    #[test]
    fn explicit_filter_is_used_when_it_parses() {
        assert_eq!(env_filter(Some("cowbull_webhook=debug")).to_string(), "cowbull_webhook=debug");
    }

    #[test]
    fn unset_or_broken_filter_falls_back_to_default() {
        for raw in [None, Some("  "), Some("cowbull_webhook=loud")] {
            let filter = env_filter(raw).to_string();
            assert!(filter.contains("reqwest=warn"), "{raw:?} gave {filter}");
        }
    }
}
