//! Roster HTTP module providing the typed API client
//!
//! The client speaks the backend's wire format (see [`types`]) and hands back
//! normalized `roster-core` records (see [`convert`]).

#[macro_use]
extern crate tracing;

pub mod client;
pub mod convert;
pub mod types;

pub use client::error::ClientError;
pub use client::{AuthGrant, AuthenticatedRosterClient, PublicRosterClient, RosterClientBuilder};
pub use convert::NormalizeError;
