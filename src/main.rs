mod args;
mod config;
mod corpus;
mod entry;
mod error;
mod logger;
mod report;
mod runner;
mod strategy;
mod transport;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
