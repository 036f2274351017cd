//! Router: route registration and template dispatch
//!
//! Registration runs once at startup and fails fast on unknown handlers.
//! Dispatch runs per render request and never fails in lenient mode: any
//! miss hands the template path back to the host untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::route::{HandlerSpec, Route, RouteOptions, Verb};
use super::slug::derive_slug;
use super::table::RouteTable;
use crate::error::{DispatchError, RouteError};
use crate::handler::HandlerRegistry;
use crate::hooks::{Hooks, Invocation};
use crate::logger;

/// How dispatch treats a route whose method the handler does not expose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Skip the invocation silently
    #[default]
    Lenient,
    /// Return `DispatchError::MissingMethod`
    Strict,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Why a registration call added no route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnsupportedVerb(String),
    EmptySlug,
    EmptyHandler,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVerb(verb) => write!(f, "unsupported verb '{verb}'"),
            Self::EmptySlug => write!(f, "empty slug"),
            Self::EmptyHandler => write!(f, "empty handler"),
        }
    }
}

/// Outcome of a registration call
#[derive(Debug, Clone, PartialEq)]
pub enum RouteRegistration {
    Added,
    /// The slug was already routed; holds the previous route
    Replaced(Route),
    Ignored(IgnoreReason),
}

/// Result of dispatching a template path
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// No route applied; the host renders this path as usual
    PassThrough(PathBuf),
    /// A handler ran and took over rendering
    Handled {
        slug: String,
        handler: String,
        method: String,
        output: Value,
    },
}

impl Dispatch {
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    /// Template the host should render, if any
    pub fn template(&self) -> Option<&Path> {
        match self {
            Self::PassThrough(path) => Some(path),
            Self::Handled { .. } => None,
        }
    }
}

/// Route table plus the handler types and hooks dispatch needs
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    handlers: HandlerRegistry,
    hooks: Hooks,
    mode: DispatchMode,
}

impl Router {
    pub fn new(handlers: HandlerRegistry, hooks: Hooks) -> Self {
        Self {
            table: RouteTable::new(),
            handlers,
            hooks,
            mode: DispatchMode::default(),
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    pub const fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Register a route, discarding the outcome
    pub fn register_route(
        &mut self,
        verb: &str,
        slug: &str,
        handler_spec: &str,
        options: RouteOptions,
    ) -> Result<(), RouteError> {
        self.register(verb, slug, handler_spec, options).map(|_| ())
    }

    /// Register `slug` to the handler named by `handler_spec`
    ///
    /// Unsupported verbs and empty slugs or handlers add nothing and are not
    /// errors. A malformed spec or an unregistered handler is.
    pub fn register(
        &mut self,
        verb: &str,
        slug: &str,
        handler_spec: &str,
        options: RouteOptions,
    ) -> Result<RouteRegistration, RouteError> {
        let reason = if Verb::parse(verb).is_none() {
            Some(IgnoreReason::UnsupportedVerb(verb.to_string()))
        } else if slug.is_empty() {
            Some(IgnoreReason::EmptySlug)
        } else {
            None
        };
        if let Some(reason) = reason {
            logger::log_route_ignored(slug, &reason);
            return Ok(RouteRegistration::Ignored(reason));
        }

        let Some(spec) = HandlerSpec::parse(handler_spec)? else {
            let reason = IgnoreReason::EmptyHandler;
            logger::log_route_ignored(slug, &reason);
            return Ok(RouteRegistration::Ignored(reason));
        };

        if !self.handlers.contains(&spec.handler) {
            logger::log_error(&format!(
                "Route '{slug}' references unknown handler '{}'",
                spec.handler
            ));
            return Err(RouteError::HandlerNotFound {
                slug: slug.to_string(),
                handler: spec.handler,
            });
        }

        let route = Route::new(slug, spec, options);
        let (handler, method) = (route.handler.clone(), route.method_name().to_string());
        let previous = self.table.insert(route);
        logger::log_route_registered(slug, &handler, &method, previous.is_some());

        Ok(previous.map_or(RouteRegistration::Added, RouteRegistration::Replaced))
    }

    /// Virtual templates for the host's template picker
    pub fn page_template_advertisements(&self) -> BTreeMap<String, String> {
        self.table.page_template_advertisements()
    }

    /// Route that would handle `template`, without invoking anything
    pub fn resolve(&self, template: &Path) -> Option<&Route> {
        let slug = derive_slug(template)?;
        self.table.get(&slug)
    }

    /// Dispatch a render request for `template`
    ///
    /// Each invocation builds a fresh handler instance, asks the argument
    /// providers for arguments, calls the route's method and notifies the
    /// invocation listeners with the result.
    pub fn dispatch(&self, template: &Path) -> Result<Dispatch, DispatchError> {
        let pass_through = |reason: &str| {
            logger::log_pass_through(template, reason);
            Ok(Dispatch::PassThrough(template.to_path_buf()))
        };

        let Some(slug) = derive_slug(template) else {
            return pass_through("no slug");
        };
        let Some(route) = self.table.get(&slug) else {
            return pass_through("no route");
        };
        if route.handler.is_empty() {
            return pass_through("route has no handler");
        }
        let Some(handler_type) = self.handlers.get(&route.handler) else {
            return pass_through("handler not registered");
        };

        let method = route.method_name();
        if !handler_type.has_method(method) {
            return match self.mode {
                DispatchMode::Lenient => pass_through("handler has no such method"),
                DispatchMode::Strict => {
                    logger::log_warning(&format!(
                        "Handler '{}' has no method '{method}' (route '{slug}')",
                        route.handler
                    ));
                    Err(DispatchError::MissingMethod {
                        slug,
                        handler: route.handler.clone(),
                        method: method.to_string(),
                    })
                }
            };
        }

        let started = Instant::now();
        let mut instance = handler_type.instantiate();
        let args = self.hooks.collect_arguments(route, instance.as_ref());
        let output = instance.invoke(method, &args);

        let invocation = Invocation {
            template,
            route,
            args: &args,
            elapsed: started.elapsed(),
        };
        self.hooks.notify(&invocation, instance.as_ref(), &output);

        Ok(Dispatch::Handled {
            slug,
            handler: route.handler.clone(),
            method: method.to_string(),
            output,
        })
    }
}
