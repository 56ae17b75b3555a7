mod settings;

pub use settings::{save_debug_menu_enabled, save_server_base_url, Config, ConfigError, EXAMPLE_CONFIG};
