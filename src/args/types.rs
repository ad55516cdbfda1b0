use std::num::NonZeroUsize;

use clap::ValueEnum;

/// Delivery strategy selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyKind {
    Direct,
    Chunked,
    Pool,
    Buffered,
}

impl StrategyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::Chunked => "chunked",
            StrategyKind::Pool => "pool",
            StrategyKind::Buffered => "buffered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, String> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| "Value must be greater than zero.".to_owned())
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| format!("Invalid number '{s}': {err}"))?;
        Self::try_from(value)
    }
}
