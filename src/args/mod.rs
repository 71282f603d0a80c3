mod cli;
mod types;

pub use cli::StatArgs;
pub use types::{OutputFormat, PositiveU64};
