//! CLI commands

use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use roster_client::{ConsoleConfig, Session, UserService};
use roster_core::catalog::{self, KNOWN_PERMISSIONS, SUGGESTED_PLATFORMS};
use roster_core::{
    NewLinkedAccount, NewUser, Role, Status, User, UserFilter, UserUpdate, display_id,
};
use serde_json::{Value, json};
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// User records
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// External accounts linked to a user
    Accounts {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// User permissions
    Permissions {
        #[command(subcommand)]
        command: PermissionCommands,
    },

    /// List known permission tags and suggested platforms
    Catalog,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users, optionally filtered
    List {
        /// Case-insensitive match on name or email
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        role: Option<Role>,

        #[arg(long)]
        status: Option<Status>,
    },

    /// Show one user
    Get { id: String },

    /// Create a user
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        role: Option<Role>,

        #[arg(long)]
        status: Option<Status>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        department: Option<String>,
    },

    /// Update the given fields of a user
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<Role>,

        #[arg(long)]
        status: Option<Status>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        department: Option<String>,
    },

    /// Delete a user
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Link an external account to a user
    Add {
        user_id: String,

        #[arg(long)]
        platform: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Role on the external platform
        #[arg(long)]
        role: String,

        #[arg(long)]
        status: Option<Status>,

        /// Link date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        linked_on: Option<NaiveDate>,

        #[arg(long)]
        url: Option<String>,
    },

    /// Unlink an external account
    Remove { user_id: String, account_id: String },
}

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// Replace a user's permissions with exactly the given tags
    Set {
        user_id: String,

        permissions: Vec<String>,
    },
}

impl Commands {
    pub async fn execute(self, config: &ConsoleConfig) -> Result<()> {
        let session = Arc::new(Session::from_config(config)?);

        match self {
            Self::Login { email, password } => {
                let grant = session.login(&email, &password).await?;
                info!("Signed in as {}", grant.user.email);
                print_json(&grant.user)
            }
            Self::Logout => {
                session.logout()?;
                info!("Signed out");
                Ok(())
            }
            Self::Whoami => match session.current_user() {
                Some(user) => print_json(&user),
                None if session.is_authenticated() => {
                    bail!("Signed in, but the saved user could not be read")
                }
                None => bail!("Not signed in"),
            },
            Self::Users { command } => command.execute(UserService::new(session)).await,
            Self::Accounts { command } => command.execute(UserService::new(session)).await,
            Self::Permissions { command } => command.execute(UserService::new(session)).await,
            Self::Catalog => print_catalog(),
        }
    }
}

impl UserCommands {
    pub async fn execute(self, users: UserService) -> Result<()> {
        match self {
            Self::List {
                search,
                role,
                status,
            } => {
                let filter = UserFilter {
                    search,
                    role,
                    status,
                };
                let all = users.list_users().await?;
                print_json(&listing(&filter.apply(&all)))
            }
            Self::Get { id } => match users.get_user(&id).await? {
                Some(user) => print_json(&user),
                None => bail!("No user with id {id}"),
            },
            Self::Create {
                name,
                email,
                role,
                status,
                phone,
                department,
            } => {
                let mut new_user = NewUser::new(name, email)
                    .role(role.unwrap_or_default())
                    .status(status.unwrap_or_default());
                new_user.phone = phone;
                new_user.department = department;

                let created = users.create_user(&new_user).await?;
                print_json(&created)
            }
            Self::Update {
                id,
                name,
                email,
                role,
                status,
                phone,
                department,
            } => {
                let update = UserUpdate {
                    name,
                    email,
                    role,
                    status,
                    phone,
                    department,
                };
                if update.is_empty() {
                    warn!("No fields given; sending an empty update");
                }

                let updated = users.update_user(&id, &update).await?;
                print_json(&updated)
            }
            Self::Delete { id } => {
                users.delete_user(&id).await?;
                println!("Deleted user {}", display_id(&id, None));
                Ok(())
            }
        }
    }
}

impl AccountCommands {
    pub async fn execute(self, users: UserService) -> Result<()> {
        match self {
            Self::Add {
                user_id,
                platform,
                username,
                email,
                role,
                status,
                linked_on,
                url,
            } => {
                if !catalog::is_suggested_platform(&platform) {
                    warn!("{platform} is not one of the suggested platforms");
                }

                let linked_on = linked_on.unwrap_or_else(|| Utc::now().date_naive());
                let mut account = NewLinkedAccount::new(platform, username, email, role, linked_on)
                    .status(status.unwrap_or_default());
                if let Some(url) = url {
                    account = account.url(url);
                }

                let user = users.add_linked_account(&user_id, &account).await?;
                print_json(&user)
            }
            Self::Remove {
                user_id,
                account_id,
            } => {
                let user = users.remove_linked_account(&user_id, &account_id).await?;
                print_json(&user)
            }
        }
    }
}

impl PermissionCommands {
    pub async fn execute(self, users: UserService) -> Result<()> {
        match self {
            Self::Set {
                user_id,
                permissions,
            } => {
                for tag in &permissions {
                    if catalog::permission(tag).is_none() {
                        warn!("{tag} is not a known permission");
                    }
                }

                let user = users.set_permissions(&user_id, &permissions).await?;
                print_json(&user)
            }
        }
    }
}

fn listing(users: &[&User]) -> Value {
    users
        .iter()
        .enumerate()
        .map(|(index, user)| json!({ "code": display_id(&user.id, Some(index)), "user": user }))
        .collect()
}

fn print_catalog() -> Result<()> {
    let permissions: Vec<Value> = KNOWN_PERMISSIONS
        .iter()
        .map(|info| json!({ "tag": info.tag, "label": info.label }))
        .collect();

    print_json(&json!({
        "permissions": permissions,
        "platforms": SUGGESTED_PLATFORMS,
    }))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
