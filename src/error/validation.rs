use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Target URL '{url}' has no host.")]
    UrlMissingHost { url: String },
    #[error("Target URL '{url}' has no port.")]
    UrlMissingPort { url: String },
    #[error("Service at {addr} did not accept connections within {timeout_secs}s.")]
    ServiceNotReady { addr: String, timeout_secs: u64 },
    #[error("Invalid boolean '{value}'.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration overflowed.")]
    DurationOverflow,
    #[error("Duration must be greater than zero.")]
    DurationZero,
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
