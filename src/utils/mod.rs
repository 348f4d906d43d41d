pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod simprint_toml;

pub use config::*;
pub use fd_limit::{max_concurrent_loads, soft_fd_limit};
pub use logger::setup_logging;
pub use simprint_toml::{apply_file_to_opts, load_default_simprint_toml, load_simprint_toml};
