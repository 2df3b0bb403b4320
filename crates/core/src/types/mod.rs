//! Newtype wrappers for identities and ids.

mod email;
mod id;

pub use email::{Email, EmailError};
pub use id::ItemId;
