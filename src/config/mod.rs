//! Application configuration.
//!
//! Settings come from an optional YAML or TOML file, then CLI flags and
//! environment variables override individual fields.

mod loader;
mod path;
mod schema;

pub use loader::{default_config_path, load_config, load_config_from_str, ConfigFormat};
pub use path::{home_dir, resolve_path};
pub use schema::{AppConfig, ServerConfig};
