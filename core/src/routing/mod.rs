#![deny(missing_docs)]

//! # Routing
//!
//! Path template compilation and request-path resolution.

pub mod path_finder;
pub mod template;

pub use path_finder::{PathFinder, RouteMatch};
pub use template::PathTemplate;
