/// Router Module Index
///
/// Splits the storefront's routes by what they serve. Access control is not a router
/// concern here: every page route runs the same identity lookup and access guard.

/// Health, authentication pages and the JSON page-view endpoint.
pub mod public;

/// The storefront page shells (admin, customer and catalog pages).
pub mod store;
