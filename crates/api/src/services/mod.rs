//! Service layer.
//!
//! Services hold the business rules and borrow their collaborators (the
//! record store, the token service) from the application state per request.

pub mod auth;
pub mod items;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use items::{ItemAction, ItemError, ItemService};
pub use token::{Claims, TokenError, TokenKind, TokenService};
