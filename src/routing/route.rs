//! Route descriptor types

use serde_json::{Map, Value};

use crate::error::RouteError;
use crate::handler::DEFAULT_METHOD;

/// Free-form route options
pub type RouteOptions = Map<String, Value>;

/// Option key advertising a virtual template to the host's template picker
pub const PAGE_TEMPLATE_OPTION: &str = "pageTemplate";

/// Request verb a route is bound to
///
/// Template rendering is read-only, so GET is the only verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
}

impl Verb {
    /// Parse a verb; anything but exactly `GET` yields `None`
    pub fn parse(verb: &str) -> Option<Self> {
        (verb == "GET").then_some(Self::Get)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
        }
    }
}

/// Parsed `Handler` or `Handler@method` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSpec {
    pub handler: String,
    /// Empty when the spec names no method
    pub method: String,
}

impl HandlerSpec {
    /// Parse a handler spec
    ///
    /// An empty spec or one without a handler name yields `Ok(None)`. More
    /// than one `@` is an error.
    pub fn parse(spec: &str) -> Result<Option<Self>, RouteError> {
        let mut parts = spec.split('@');
        let handler = parts.next().unwrap_or_default();
        let method = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(RouteError::MalformedHandlerSpec {
                spec: spec.to_string(),
            });
        }
        if handler.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            handler: handler.to_string(),
            method: method.to_string(),
        }))
    }
}

/// A binding from a slug to a handler method
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub slug: String,
    pub handler: String,
    pub method: String,
    pub options: RouteOptions,
}

impl Route {
    pub fn new(slug: impl Into<String>, spec: HandlerSpec, options: RouteOptions) -> Self {
        Self {
            slug: slug.into(),
            handler: spec.handler,
            method: spec.method,
            options,
        }
    }

    /// Method to invoke, falling back to `main`
    pub fn method_name(&self) -> &str {
        if self.method.is_empty() {
            DEFAULT_METHOD
        } else {
            &self.method
        }
    }

    /// Template filename advertised by the `pageTemplate` option
    pub fn page_template(&self) -> Option<&str> {
        self.options.get(PAGE_TEMPLATE_OPTION).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verb_parse() {
        assert_eq!(Verb::parse("GET"), Some(Verb::Get));
        assert_eq!(Verb::parse("get"), None);
        assert_eq!(Verb::parse("Get"), None);
        assert_eq!(Verb::parse(" GET"), None);
        assert_eq!(Verb::parse("POST"), None);
        assert_eq!(Verb::parse(""), None);
        assert_eq!(Verb::Get.to_string(), "GET");
    }

    #[test]
    fn test_handler_spec_plain() {
        let spec = HandlerSpec::parse("IndexHelper").unwrap().unwrap();
        assert_eq!(spec.handler, "IndexHelper");
        assert_eq!(spec.method, "");
    }

    #[test]
    fn test_handler_spec_with_method() {
        let spec = HandlerSpec::parse("SingularHelper@view").unwrap().unwrap();
        assert_eq!(spec.handler, "SingularHelper");
        assert_eq!(spec.method, "view");
    }

    #[test]
    fn test_handler_spec_missing_parts() {
        assert_eq!(HandlerSpec::parse("").unwrap(), None);
        assert_eq!(HandlerSpec::parse("@view").unwrap(), None);
        // Trailing `@` keeps the handler and falls back to the default method
        let spec = HandlerSpec::parse("IndexHelper@").unwrap().unwrap();
        assert_eq!(spec.method, "");
    }

    #[test]
    fn test_handler_spec_multiple_at() {
        let err = HandlerSpec::parse("A@b@c").unwrap_err();
        assert_eq!(
            err,
            RouteError::MalformedHandlerSpec {
                spec: "A@b@c".to_string()
            }
        );
        assert!(HandlerSpec::parse("@@").is_err());
    }

    #[test]
    fn test_route_method_name_default() {
        let spec = HandlerSpec::parse("IndexHelper").unwrap().unwrap();
        let route = Route::new("index", spec, RouteOptions::new());
        assert_eq!(route.method_name(), "main");

        let spec = HandlerSpec::parse("IndexHelper@list").unwrap().unwrap();
        let route = Route::new("index", spec, RouteOptions::new());
        assert_eq!(route.method_name(), "list");
    }

    #[test]
    fn test_route_page_template() {
        let spec = HandlerSpec::parse("LandingHelper").unwrap().unwrap();
        let mut options = RouteOptions::new();
        options.insert(PAGE_TEMPLATE_OPTION.to_string(), json!("landing.php"));
        let route = Route::new("landing", spec.clone(), options);
        assert_eq!(route.page_template(), Some("landing.php"));

        let mut options = RouteOptions::new();
        options.insert(PAGE_TEMPLATE_OPTION.to_string(), json!(true));
        let route = Route::new("landing", spec, options);
        assert_eq!(route.page_template(), None);
    }
}
