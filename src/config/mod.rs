mod apply;
mod loader;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use apply::{RunOptions, resolve_options};
pub use loader::load_config;
pub use types::{ConfigFile, PortMapEntry, StreamConfig};
pub use validate::{MAX_FRAME_SIZE, build_profile, select_stream};
