mod app;
mod config;
mod corpus;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use corpus::CorpusError;
pub use transport::{SubmitError, TransportError};
pub use validation::ValidationError;
