use super::{ConfigError, CorpusError, TransportError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for CorpusError {
    fn from(message: &'static str) -> Self {
        CorpusError::TestExpectation { message }
    }
}

impl From<&'static str> for TransportError {
    fn from(message: &'static str) -> Self {
        TransportError::Delivery {
            message: message.to_owned(),
        }
    }
}
