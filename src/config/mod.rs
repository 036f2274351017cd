// Configuration module entry point
// Loads process configuration and the declarative routes file

mod routes;
mod types;

pub use routes::{load_routes, RouteEntry, RoutesFile};
pub use types::{Config, DispatchConfig, LoggingConfig, StartupConfig, ThemeConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing files are allowed. Environment variables such as
    /// `THEME_ROUTER_THEME__DIR` override file values.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("THEME_ROUTER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("theme.dir", ".")?
            .set_default("theme.routes_file", "routes.toml")?
            .set_default("theme.handlers_dir", "handlers")?
            .set_default("dispatch.mode", "lenient")?
            .set_default("startup.cli_env_flag", "THEME_ROUTER_CLI")?
            .set_default("logging.level", "info")?
            .set_default("logging.dispatch_log", true)?
            .set_default("logging.dispatch_log_format", "text")?
            .build()?;

        settings.try_deserialize()
    }

    /// Load `theme-router.toml` from the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("theme-router")
    }
}
