//! Startup sequence
//!
//! Runs once per process, after the host has loaded its own plugins:
//! 1. Skip everything in a command-line admin context
//! 2. Resolve the theme paths through the path overrides
//! 3. List the theme's handler sources
//! 4. Load handler types from the registered catalogs
//! 5. Apply the routes file
//!
//! Registration errors abort startup. The returned router is read-only from
//! then on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{load_routes, Config};
use crate::error::StartupError;
use crate::handler::{HandlerCatalog, HandlerRegistry};
use crate::hooks::{Hooks, InvocationLogger};
use crate::logger;
use crate::routing::Router;

/// One-shot initialization of a [`Router`] from configuration
pub struct Startup {
    config: Config,
    hooks: Hooks,
    catalogs: Vec<Box<dyn HandlerCatalog>>,
}

impl Startup {
    pub fn new(config: Config, hooks: Hooks) -> Self {
        Self {
            config,
            hooks,
            catalogs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: impl HandlerCatalog + 'static) -> Self {
        self.catalogs.push(Box::new(catalog));
        self
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Initialize the global logger from the logging configuration
    pub fn init_logging(&self) -> Result<(), StartupError> {
        logger::init(&self.config).map_err(StartupError::Logger)
    }

    /// Run startup against the process environment
    ///
    /// Returns `Ok(None)` when running in a command-line admin context.
    pub fn run(self) -> Result<Option<Router>, StartupError> {
        self.run_with_env(|name| std::env::var(name).ok())
    }

    /// Run startup, reading environment variables through `env`
    pub fn run_with_env(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Router>, StartupError> {
        let flag = &self.config.startup.cli_env_flag;
        if is_cli_context(env(flag).as_deref()) {
            logger::log_startup_skipped(flag);
            return Ok(None);
        }

        let theme = &self.config.theme;
        let theme_dir = self.hooks.resolve_theme_dir(PathBuf::from(&theme.dir));
        let routes_path = self
            .hooks
            .resolve_routes_file(theme.routes_path(&theme_dir));
        let handlers_dir = self
            .hooks
            .resolve_handlers_dir(theme.handlers_path(&theme_dir));
        logger::log_startup(&theme_dir, &routes_path, &self.config);

        let sources = scan_handlers_dir(&handlers_dir)?;
        logger::log_handler_sources(&handlers_dir, &sources);

        let mut registry = HandlerRegistry::new();
        for catalog in &self.catalogs {
            catalog
                .load(&mut registry)
                .map_err(|message| StartupError::Catalog {
                    catalog: catalog.name().to_string(),
                    message,
                })?;
        }

        let mut hooks = self.hooks;
        if self.config.logging.dispatch_log {
            hooks = hooks.with_listener(InvocationLogger::new(
                self.config.logging.dispatch_log_format.clone(),
            ));
        }

        let mut router = Router::new(registry, hooks).with_mode(self.config.dispatch.mode);
        load_routes(&mut router, &routes_path)?;
        logger::log_startup_complete(router.table().len(), router.handlers().len());

        Ok(Some(router))
    }
}

/// True when the admin-tool flag holds a value other than empty or `0`
pub fn is_cli_context(flag_value: Option<&str>) -> bool {
    matches!(flag_value, Some(value) if !value.is_empty() && value != "0")
}

/// Extension of handler source files
pub const HANDLER_SOURCE_EXTENSION: &str = "rs";

/// List handler source files (`*.rs`) in `dir`, non-recursively and sorted
///
/// A missing directory yields an empty list.
pub fn scan_handlers_dir(dir: &Path) -> Result<Vec<PathBuf>, StartupError> {
    let to_error = |source| StartupError::HandlersDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(to_error(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(to_error)?.path();
        let is_source = path
            .extension()
            .is_some_and(|ext| ext == HANDLER_SOURCE_EXTENSION);
        if is_source && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use serde_json::Value;

    struct Noop;

    impl Handler for Noop {
        fn invoke(&mut self, _method: &str, _args: &[Value]) -> Value {
            Value::Null
        }
    }

    fn temp_theme(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "theme-router-startup-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.theme.dir = dir.display().to_string();
        config.logging.dispatch_log = false;
        config
    }

    #[test]
    fn test_is_cli_context() {
        assert!(!is_cli_context(None));
        assert!(!is_cli_context(Some("")));
        assert!(!is_cli_context(Some("0")));
        assert!(is_cli_context(Some("1")));
        assert!(is_cli_context(Some("true")));
    }

    #[test]
    fn test_run_skipped_in_cli_context() {
        let startup = Startup::new(Config::default(), Hooks::new());
        let router = startup
            .run_with_env(|name| (name == "THEME_ROUTER_CLI").then(|| "1".to_string()))
            .unwrap();
        assert!(router.is_none());
    }

    #[test]
    fn test_scan_handlers_dir() {
        let dir = temp_theme("scan");
        fs::write(dir.join("b_helper.rs"), "").unwrap();
        fs::write(dir.join("a_helper.rs"), "").unwrap();
        fs::write(dir.join("a_helper.rs~"), "").unwrap();
        fs::write(dir.join("README.md"), "").unwrap();
        fs::write(dir.join(".a_helper.rs.swp"), "").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("c_helper.rs"), "").unwrap();

        let files = scan_handlers_dir(&dir).unwrap();
        assert_eq!(files, vec![dir.join("a_helper.rs"), dir.join("b_helper.rs")]);
        assert!(scan_handlers_dir(&dir.join("missing")).unwrap().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_loads_catalogs_and_routes() {
        let dir = temp_theme("run");
        fs::write(
            dir.join("routes.toml"),
            "[[route]]\nslug = \"index\"\nhandler = \"IndexHelper\"\n",
        )
        .unwrap();

        let router = Startup::new(config_for(&dir), Hooks::new())
            .with_catalog(|registry: &mut HandlerRegistry| -> Result<(), String> {
                registry.register_factory("IndexHelper", ["main"], || {
                    Box::new(Noop) as Box<dyn Handler>
                });
                Ok(())
            })
            .run_with_env(|_| None)
            .unwrap()
            .unwrap();

        assert_eq!(router.table().len(), 1);
        assert!(router.dispatch(Path::new("index.php")).unwrap().is_handled());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_fails_on_unknown_handler() {
        let dir = temp_theme("fatal");
        fs::write(
            dir.join("routes.toml"),
            "[[route]]\nslug = \"index\"\nhandler = \"IndexHelper\"\n",
        )
        .unwrap();

        let err = Startup::new(config_for(&dir), Hooks::new())
            .run_with_env(|_| None)
            .unwrap_err();
        assert!(matches!(err, StartupError::Routes(_)));
        assert!(err.to_string().contains("IndexHelper"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_catalog_failure() {
        let dir = temp_theme("catalog");
        let err = Startup::new(config_for(&dir), Hooks::new())
            .with_catalog(|_: &mut HandlerRegistry| -> Result<(), String> {
                Err("boom".to_string())
            })
            .run_with_env(|_| None)
            .unwrap_err();
        assert!(matches!(err, StartupError::Catalog { ref message, .. } if message == "boom"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
