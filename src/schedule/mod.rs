//! Field schedule views.

pub mod route;

pub use route::{group_visits, summarize_route, RouteConfig, RouteGroup, RouteSummary};
