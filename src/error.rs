//! Error types
//!
//! Registration failures are fatal and surface at startup. Dispatch misses
//! are pass-throughs, so `DispatchError` only exists for strict mode.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while registering a route
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The handler identifier is not known to the handler registry
    #[error("handler `{handler}` for route `{slug}` is not registered")]
    HandlerNotFound { slug: String, handler: String },

    /// The handler spec contains more than one `@`
    #[error("malformed handler spec `{spec}`: expected `Handler` or `Handler@method`")]
    MalformedHandlerSpec { spec: String },
}

/// Errors raised at dispatch time (strict mode only)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("handler `{handler}` has no method `{method}` (route `{slug}`)")]
    MissingMethod {
        slug: String,
        handler: String,
        method: String,
    },
}

/// Errors raised while loading the routes file
#[derive(Debug, Error)]
pub enum RoutesFileError {
    #[error("failed to read routes file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse routes file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Registration of the route at `index` (0-based, file order) failed
    #[error("route #{index} in {}: {source}", path.display())]
    Route {
        path: PathBuf,
        index: usize,
        #[source]
        source: RouteError,
    },
}

/// Errors raised by the startup sequence
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Routes(#[from] RoutesFileError),

    #[error("failed to scan handlers directory {}: {source}", path.display())]
    HandlersDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("handler catalog `{catalog}` failed: {message}")]
    Catalog { catalog: String, message: String },

    #[error("failed to initialize logger: {0}")]
    Logger(#[source] std::io::Error),
}
