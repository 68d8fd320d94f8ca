// Navigation core: static menu definition plus the per-user resolver.
// Pure library code; no transport or storage concerns live here.

pub mod definition;
pub mod resolver;

pub use definition::{tree, NavError, NavItem, NavigationTree, NAVIGATION};
pub use resolver::{Breadcrumb, UserContext};
