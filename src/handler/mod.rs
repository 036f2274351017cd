//! Handler module
//!
//! Handlers are user-supplied types whose methods run when a template with a
//! routed slug is about to render. They are registered by name through
//! factories, so routes can be validated against the registry at startup and
//! a fresh instance built for every dispatch.

pub mod registry;

pub use registry::{HandlerCatalog, HandlerFactory, HandlerRegistry, HandlerType};

use serde_json::Value;

/// Method invoked when a route does not name one
pub const DEFAULT_METHOD: &str = "main";

/// A handler instance
///
/// The router only calls `invoke` with a method name that the handler's
/// [`HandlerType`] advertises.
pub trait Handler: Send {
    /// Run `method` with the arguments collected from the argument providers
    fn invoke(&mut self, method: &str, args: &[Value]) -> Value;
}

/// A handler type that can be registered without an explicit factory
pub trait NamedHandler: Handler + Default + 'static {
    /// Identifier routes use to refer to this handler
    const NAME: &'static str;
    /// Methods `invoke` understands
    const METHODS: &'static [&'static str];
}
