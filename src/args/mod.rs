mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::HarnessArgs;
pub(crate) use parsers::parse_bool_env;
pub use types::{PositiveUsize, StrategyKind};
