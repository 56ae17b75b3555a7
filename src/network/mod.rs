//! Server clients

mod identity;

pub use identity::{parse_prevalidate_response, IdentityClient};
