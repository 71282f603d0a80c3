mod args;
mod config;
mod entry;
mod error;
mod feed;
mod logger;
mod shutdown;
mod sinks;
mod stats;
mod summary;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
