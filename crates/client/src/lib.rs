//! Roster client: session store and record access layer
//!
//! A [`Session`] owns the persisted bearer token and user snapshot. A
//! [`UserService`] borrows the token from it for every request.
//!
//! ```no_run
//! use std::sync::Arc;
//! use roster_client::{ConsoleConfig, Session, UserService};
//!
//! # async fn run() -> roster_client::Result<()> {
//! let config = ConsoleConfig::load(None).expect("valid configuration");
//! let session = Arc::new(Session::from_config(&config)?);
//! session.login("admin@example.com", "secret").await?;
//!
//! let users = UserService::new(session).list_users().await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod storage;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use services::UserService;
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
