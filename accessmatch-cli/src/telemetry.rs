//! Log subscriber installation.
//!
//! Library crates emit records through `log`; the subscriber's `log` bridge
//! forwards them so one filter governs everything.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::CliError;

/// Install a stderr subscriber filtered by `RUST_LOG`, else `fallback`.
pub(crate) fn init(fallback: &str) -> Result<(), CliError> {
    let filter = env_filter(fallback)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish()
        .try_init()
        .map_err(CliError::Subscriber)
}

fn env_filter(fallback: &str) -> Result<EnvFilter, CliError> {
    EnvFilter::try_from_default_env().or_else(|_| parse_filter(fallback))
}

fn parse_filter(filter: &str) -> Result<EnvFilter, CliError> {
    EnvFilter::try_new(filter).map_err(|source| CliError::LogFilter {
        filter: filter.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("warn")]
    #[case("accessmatch_engine=debug,info")]
    fn fallback_filters_parse(#[case] filter: &str) {
        assert!(parse_filter(filter).is_ok());
    }

    #[test]
    fn malformed_fallback_is_reported() {
        let err = parse_filter("accessmatch=loud").expect_err("level is unknown");
        assert!(matches!(
            err,
            CliError::LogFilter { ref filter, .. } if filter == "accessmatch=loud"
        ));
    }
}
