// Request middleware: gateway identity extraction for /api routes.

pub mod auth;

pub use auth::{identity_middleware, AuthUser};
