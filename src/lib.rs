//! Declarative template routing
//!
//! Maps template slugs (`index`, `singular`, `archive-category`, ...) to
//! handler methods. Routes are registered once at startup from a routes file
//! and validated against the registered handler types; every render request
//! is then dispatched to the matching handler or passed through untouched.

pub mod config;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod logger;
pub mod routing;
pub mod startup;

pub use config::Config;
pub use error::{DispatchError, RouteError, RoutesFileError, StartupError};
pub use handler::{Handler, HandlerRegistry, NamedHandler};
pub use hooks::Hooks;
pub use routing::{Dispatch, DispatchMode, Router};
pub use startup::Startup;
