//! SCIM 2.0 provisioning stubs
//!
//! Minimal `Users` and `Groups` endpoints for identity providers that probe
//! provisioning support. Records live in memory and are lost on restart.

pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

pub use error::{ScimError, ScimResult};
pub use handlers::{router, ApiDoc};
pub use models::{SCIM_BASE_PATH, Group, ListResponse, Member, PatchOperation, PatchRequest, User};
pub use store::ScimStore;
