pub(crate) const DEFAULT_USER_AGENT: &str = concat!("tickload/", env!("CARGO_PKG_VERSION"));

/// Request count used when `--requests` is given without a value.
pub(crate) const DEFAULT_COUNT_REQUESTS: &str = "10";
