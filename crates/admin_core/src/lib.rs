//! Client-side synchronization layer for the festival admin dashboard.
//!
//! The admin UI manages two parallel resources, programmes and speakers, each
//! through the same pipeline: a remote resource client over the REST API, a
//! form validation model, a mutation coordinator that invalidates the cached
//! collection on success, and a render-free list-view state struct. Programmes
//! additionally pass through the scheduling normalizer, which turns a picked
//! calendar date plus two local times of day into absolute instants.
//!
//! Rendering, routing and toast display live outside this crate; everything
//! here is driveable from tests and from the CLI alike.

pub mod api;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod remote;
pub mod schedule;
pub mod validate;
pub mod views;

pub use error::RemoteError;

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod api_tests;

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod views_tests;
