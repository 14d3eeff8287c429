//! REST collaborators.

pub mod lenient;
pub mod resource;
pub mod roles;
pub mod types;

pub use resource::ResourceApi;
pub use types::{ListQuery, ListResponse, MutationResponse};
