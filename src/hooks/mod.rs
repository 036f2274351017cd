//! Extension points
//!
//! Hosts customize dispatch through collaborators injected into the router:
//! - argument providers build the argument list passed to handler methods
//! - invocation listeners are notified after every handler call
//! - path overrides adjust the theme paths resolved at startup

mod logging;

pub use logging::InvocationLogger;

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::handler::Handler;
use crate::routing::Route;

/// Details of a completed handler invocation
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Template path the host was about to render
    pub template: &'a Path,
    pub route: &'a Route,
    pub args: &'a [Value],
    pub elapsed: Duration,
}

/// Filter over the arguments passed to a handler method
pub trait ArgumentProvider: Send + Sync {
    fn provide(&self, route: &Route, handler: &dyn Handler, args: Vec<Value>) -> Vec<Value>;
}

impl<F> ArgumentProvider for F
where
    F: Fn(&Route, &dyn Handler, Vec<Value>) -> Vec<Value> + Send + Sync,
{
    fn provide(&self, route: &Route, handler: &dyn Handler, args: Vec<Value>) -> Vec<Value> {
        self(route, handler, args)
    }
}

/// Notified after a handler method returns
pub trait InvocationListener: Send + Sync {
    fn on_invoked(&self, invocation: &Invocation<'_>, handler: &dyn Handler, result: &Value);
}

impl<F> InvocationListener for F
where
    F: Fn(&Invocation<'_>, &dyn Handler, &Value) + Send + Sync,
{
    fn on_invoked(&self, invocation: &Invocation<'_>, handler: &dyn Handler, result: &Value) {
        self(invocation, handler, result);
    }
}

/// Filter over the paths resolved during startup
///
/// Every method receives the resolved path and returns the one to use.
pub trait PathOverride: Send + Sync {
    fn theme_dir(&self, dir: PathBuf) -> PathBuf {
        dir
    }

    fn routes_file(&self, path: PathBuf) -> PathBuf {
        path
    }

    fn handlers_dir(&self, path: PathBuf) -> PathBuf {
        path
    }
}

/// Registered extension points, run in registration order
#[derive(Clone, Default)]
pub struct Hooks {
    argument_providers: Vec<Arc<dyn ArgumentProvider>>,
    listeners: Vec<Arc<dyn InvocationListener>>,
    path_overrides: Vec<Arc<dyn PathOverride>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_argument_provider(mut self, provider: impl ArgumentProvider + 'static) -> Self {
        self.argument_providers.push(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: impl InvocationListener + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    #[must_use]
    pub fn with_path_override(mut self, path_override: impl PathOverride + 'static) -> Self {
        self.path_overrides.push(Arc::new(path_override));
        self
    }

    /// Arguments for a handler call; empty unless a provider supplies some
    pub fn collect_arguments(&self, route: &Route, handler: &dyn Handler) -> Vec<Value> {
        self.argument_providers
            .iter()
            .fold(Vec::new(), |args, provider| {
                provider.provide(route, handler, args)
            })
    }

    pub fn notify(&self, invocation: &Invocation<'_>, handler: &dyn Handler, result: &Value) {
        for listener in &self.listeners {
            listener.on_invoked(invocation, handler, result);
        }
    }

    pub fn resolve_theme_dir(&self, dir: PathBuf) -> PathBuf {
        self.path_overrides
            .iter()
            .fold(dir, |dir, path_override| path_override.theme_dir(dir))
    }

    pub fn resolve_routes_file(&self, path: PathBuf) -> PathBuf {
        self.path_overrides
            .iter()
            .fold(path, |path, path_override| path_override.routes_file(path))
    }

    pub fn resolve_handlers_dir(&self, path: PathBuf) -> PathBuf {
        self.path_overrides
            .iter()
            .fold(path, |path, path_override| path_override.handlers_dir(path))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("argument_providers", &self.argument_providers.len())
            .field("listeners", &self.listeners.len())
            .field("path_overrides", &self.path_overrides.len())
            .finish()
    }
}
