// Routes file module
// Declarative slug -> handler bindings, applied once at startup
//
// [[route]]
// slug = "singular"
// handler = "SingularHelper@view"
//
// [route.options]
// pageTemplate = "landing.php"

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::RoutesFileError;
use crate::logger;
use crate::routing::{RouteOptions, Router};

/// Parsed routes file
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RoutesFile {
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteEntry>,
}

/// One `[[route]]` table
///
/// Every field is optional so that incomplete entries reach the router,
/// which ignores them instead of failing the whole file.
#[derive(Debug, Deserialize, Clone)]
pub struct RouteEntry {
    #[serde(default = "default_verb")]
    pub verb: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub handler: String,
    #[serde(default)]
    pub options: RouteOptions,
}

#[allow(clippy::missing_const_for_fn)]
fn default_verb() -> String {
    "GET".to_string()
}

impl RoutesFile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read a routes file; `Ok(None)` when it does not exist
    pub fn read(path: &Path) -> Result<Option<Self>, RoutesFileError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RoutesFileError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&content)
            .map(Some)
            .map_err(|source| RoutesFileError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Register every entry in file order
    ///
    /// Stops at the first fatal registration error. Returns the number of
    /// entries processed.
    pub fn apply(&self, router: &mut Router, path: &Path) -> Result<usize, RoutesFileError> {
        for (index, entry) in self.routes.iter().enumerate() {
            router
                .register_route(
                    &entry.verb,
                    &entry.slug,
                    &entry.handler,
                    entry.options.clone(),
                )
                .map_err(|source| RoutesFileError::Route {
                    path: path.to_path_buf(),
                    index,
                    source,
                })?;
        }
        Ok(self.routes.len())
    }
}

/// Read and apply the routes file at `path`
///
/// A missing file registers nothing and is only logged.
pub fn load_routes(router: &mut Router, path: &Path) -> Result<usize, RoutesFileError> {
    match RoutesFile::read(path)? {
        Some(file) => file.apply(router, path),
        None => {
            logger::log_routes_file_missing(path);
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;
    use crate::handler::{Handler, HandlerRegistry};
    use crate::hooks::Hooks;
    use serde_json::{json, Value};

    struct Noop;

    impl Handler for Noop {
        fn invoke(&mut self, _method: &str, _args: &[Value]) -> Value {
            Value::Null
        }
    }

    fn make_router() -> Router {
        let mut registry = HandlerRegistry::new();
        registry
            .register_factory("IndexHelper", ["main"], || Box::new(Noop) as Box<dyn Handler>)
            .register_factory("SingularHelper", ["view"], || {
                Box::new(Noop) as Box<dyn Handler>
            });
        Router::new(registry, Hooks::new())
    }

    #[test]
    fn test_parse_routes_file() {
        let file = RoutesFile::parse(
            r#"
[[route]]
slug = "index"
handler = "IndexHelper"

[[route]]
verb = "get"
slug = "landing"
handler = "SingularHelper@view"

[route.options]
pageTemplate = "landing.php"
"#,
        )
        .unwrap();

        assert_eq!(file.routes.len(), 2);
        assert_eq!(file.routes[0].verb, "GET");
        assert_eq!(file.routes[1].verb, "get");
        assert!(file.routes[0].options.is_empty());
        assert_eq!(file.routes[1].handler, "SingularHelper@view");
        assert_eq!(file.routes[1].options["pageTemplate"], json!("landing.php"));
    }

    #[test]
    fn test_parse_empty_file() {
        let file = RoutesFile::parse("").unwrap();
        assert!(file.routes.is_empty());
    }

    #[test]
    fn test_apply_registers_and_skips() {
        let file = RoutesFile::parse(
            r#"
[[route]]
slug = "index"
handler = "IndexHelper"

[[route]]
verb = "POST"
slug = "form"
handler = "IndexHelper"

[[route]]
verb = "get"
slug = "lowercase"
handler = "IndexHelper"

[[route]]
handler = "IndexHelper"

[[route]]
slug = "landing"
handler = "SingularHelper@view"
options = { pageTemplate = "landing.php" }
"#,
        )
        .unwrap();

        let mut router = make_router();
        let processed = file.apply(&mut router, Path::new("routes.toml")).unwrap();
        assert_eq!(processed, 5);
        assert_eq!(router.table().len(), 2);
        assert!(router.table().get("form").is_none());
        assert!(router.table().get("lowercase").is_none());
        assert_eq!(
            router.page_template_advertisements()["Landing"],
            "landing.php"
        );
    }

    #[test]
    fn test_apply_stops_on_unknown_handler() {
        let file = RoutesFile::parse(
            r#"
[[route]]
slug = "index"
handler = "IndexHelper"

[[route]]
slug = "archive"
handler = "ArchiveHelper"

[[route]]
slug = "singular"
handler = "SingularHelper@view"
"#,
        )
        .unwrap();

        let mut router = make_router();
        let err = file
            .apply(&mut router, Path::new("routes.toml"))
            .unwrap_err();
        match err {
            RoutesFileError::Route { index, source, .. } => {
                assert_eq!(index, 1);
                assert!(matches!(source, RouteError::HandlerNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(router.table().get("singular").is_none());
    }

    #[test]
    fn test_load_routes_missing_file() {
        let mut router = make_router();
        let path = std::env::temp_dir().join("theme-router-no-such-routes.toml");
        assert_eq!(load_routes(&mut router, &path).unwrap(), 0);
        assert!(router.table().is_empty());
    }

    #[test]
    fn test_read_invalid_toml() {
        let dir = std::env::temp_dir().join(format!("theme-router-routes-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("routes.toml");
        fs::write(&path, "[[route]\nslug = ").unwrap();

        let err = RoutesFile::read(&path).unwrap_err();
        assert!(matches!(err, RoutesFileError::Parse { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
