//! Handler registry
//!
//! Maps handler identifiers to their method table and constructor.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use super::{Handler, NamedHandler};

/// Zero-argument constructor producing a fresh handler instance
pub type HandlerFactory = Arc<dyn Fn() -> Box<dyn Handler> + Send + Sync>;

/// A registered handler type
#[derive(Clone)]
pub struct HandlerType {
    name: String,
    methods: BTreeSet<String>,
    factory: HandlerFactory,
}

impl HandlerType {
    pub fn new<I, S, F>(name: impl Into<String>, methods: I, factory: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn() -> Box<dyn Handler> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            methods: methods.into_iter().map(Into::into).collect(),
            factory: Arc::new(factory),
        }
    }

    /// Build the descriptor for a [`NamedHandler`] type
    pub fn of<H: NamedHandler>() -> Self {
        Self::new(H::NAME, H::METHODS.iter().copied(), || {
            Box::new(H::default()) as Box<dyn Handler>
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }

    /// Construct a new instance; instances are never reused
    pub fn instantiate(&self) -> Box<dyn Handler> {
        (self.factory)()
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerType")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Set of handler types resolvable by identifier
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    types: HashMap<String, HandlerType>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a [`NamedHandler`] under its own name
    pub fn register<H: NamedHandler>(&mut self) -> &mut Self {
        self.insert(HandlerType::of::<H>());
        self
    }

    /// Register a handler built by `factory`
    pub fn register_factory<I, S, F>(
        &mut self,
        name: impl Into<String>,
        methods: I,
        factory: F,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn() -> Box<dyn Handler> + Send + Sync + 'static,
    {
        self.insert(HandlerType::new(name, methods, factory));
        self
    }

    /// Insert a handler type, returning the one it replaced
    pub fn insert(&mut self, handler_type: HandlerType) -> Option<HandlerType> {
        self.types
            .insert(handler_type.name.clone(), handler_type)
    }

    pub fn get(&self, name: &str) -> Option<&HandlerType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Source of handler types, run once at startup before routes are loaded
pub trait HandlerCatalog {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn load(&self, registry: &mut HandlerRegistry) -> Result<(), String>;
}

impl<F> HandlerCatalog for F
where
    F: Fn(&mut HandlerRegistry) -> Result<(), String>,
{
    fn load(&self, registry: &mut HandlerRegistry) -> Result<(), String> {
        self(registry)
    }
}
