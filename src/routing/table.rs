//! Route table
//!
//! One slug maps to at most one route. Re-registering a slug replaces the
//! previous route.

use std::collections::{BTreeMap, HashMap};

use super::route::Route;

/// Mapping from slug to route
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, returning the route it replaced
    pub fn insert(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.slug.clone(), route)
    }

    pub fn get(&self, slug: &str) -> Option<&Route> {
        self.routes.get(slug)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Virtual templates to merge into the host's template picker
    ///
    /// Only routes with a `pageTemplate` option are listed, keyed by the
    /// slug with its first letter capitalized.
    pub fn page_template_advertisements(&self) -> BTreeMap<String, String> {
        self.routes
            .values()
            .filter_map(|route| {
                route
                    .page_template()
                    .map(|template| (capitalize(&route.slug), template.to_string()))
            })
            .collect()
    }
}

fn capitalize(slug: &str) -> String {
    let mut chars = slug.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
