//! Roster core types and utilities

pub mod catalog;
pub mod error;
pub mod filter;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use filter::{UserFilter, display_id};
pub use types::{LinkedAccount, NewLinkedAccount, NewUser, Role, Status, User, UserUpdate};
