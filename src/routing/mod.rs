//! Routing module
//!
//! Maps template slugs to handler methods:
//! - Route descriptors and handler spec parsing
//! - Slug derivation from template paths
//! - The route table and its template-picker advertisements
//! - The router that registers routes and dispatches render requests

mod dispatch;
mod route;
mod slug;
mod table;

pub use dispatch::{Dispatch, DispatchMode, IgnoreReason, RouteRegistration, Router};
pub use route::{HandlerSpec, Route, RouteOptions, Verb, PAGE_TEMPLATE_OPTION};
pub use slug::{derive_slug, TEMPLATE_SUFFIX_LEN};
pub use table::RouteTable;
