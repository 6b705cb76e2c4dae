//! Clinic REST API client boundary for CareDesk.
//!
//! The server, its authentication flow, and its storage are external; this
//! crate owns only the client-side seam:
//! - [`Session`] — the bearer token a caller obtained out of band
//! - [`ApiClient`] — the collaborator trait the rest of the core programs
//!   against (collection fetch, by-id fetch, and the three mutations)
//! - [`HttpApiClient`] — the reqwest-backed implementation
//!
//! The core treats an auth failure like any other fetch error; token
//! issuance and refresh are the caller's problem.

mod client;
mod error;
mod http;
mod session;

pub use client::{ApiClient, RawPage};
pub use error::{ApiError, ApiResult};
pub use http::{HttpApiClient, HttpApiConfig};
pub use session::Session;
