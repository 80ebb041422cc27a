//! CLI commands

use admin_console_client::types::{SkillInput, UserInput, WorkshopInput};
use admin_console_client::{AccessToken, ApiClient, ClientError, RouteGuard, expiry_of};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show whether the stored session grants access
    Status,

    /// Manage users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage workshops
    Workshops {
        #[command(subcommand)]
        command: WorkshopCommands,
    },

    /// Manage skills
    Skills {
        #[command(subcommand)]
        command: SkillCommands,
    },

    /// Show user, workshop and skill totals
    Stats,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,
    /// Show one user
    Get { id: i64 },
    /// Create a user
    Create(UserArgs),
    /// Replace a user's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: UserArgs,
    },
    /// Delete a user
    Delete { id: i64 },
}

#[derive(Args)]
pub struct UserArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    biography: Option<String>,
}

impl From<UserArgs> for UserInput {
    fn from(args: UserArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            birthday: args.birthday,
            gender: args.gender,
            phone_number: args.phone_number,
            address: args.address,
            biography: args.biography,
        }
    }
}

#[derive(Subcommand)]
pub enum WorkshopCommands {
    /// List all workshops
    List,
    /// Show one workshop
    Get { id: i64 },
    /// Create a workshop
    Create(WorkshopArgs),
    /// Replace a workshop's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: WorkshopArgs,
    },
    /// Delete a workshop
    Delete { id: i64 },
}

#[derive(Args)]
pub struct WorkshopArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
    /// ISO-8601 date-time, e.g. 2026-11-01T10:00:00Z
    #[arg(long)]
    date: Option<String>,
}

impl From<WorkshopArgs> for WorkshopInput {
    fn from(args: WorkshopArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            date: args.date,
        }
    }
}

#[derive(Subcommand)]
pub enum SkillCommands {
    /// List all skills
    List,
    /// Show one skill
    Get { id: i64 },
    /// Create a skill
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a skill
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a skill
    Delete { id: i64 },
}

impl Commands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            Self::Login { email, password } => {
                client.login(&email, &password).await?;
                println!("Logged in as {email}");
                Ok(())
            }
            Self::Logout => {
                client.logout();
                println!("Logged out");
                Ok(())
            }
            Self::Status => {
                show_status(client);
                Ok(())
            }
            command => {
                require_login(&client.guard())?;
                match command.execute_protected(client).await {
                    Err(e) if e.is_auth_expired() => {
                        warn!(error = %e, "Session could not be recovered");
                        client.logout();
                        bail!(
                            "Session expired, log in again with `admin-console login` ({})",
                            RouteGuard::LOGIN_ROUTE
                        )
                    }
                    result => Ok(result?),
                }
            }
        }
    }

    async fn execute_protected(self, client: &ApiClient) -> Result<(), ClientError> {
        match self {
            Self::Users { command } => command.execute(client).await,
            Self::Workshops { command } => command.execute(client).await,
            Self::Skills { command } => command.execute(client).await,
            Self::Stats => print_json(&client.fetch_all_stats().await?),
            Self::Login { .. } | Self::Logout | Self::Status => Ok(()),
        }
    }
}

impl UserCommands {
    async fn execute(self, client: &ApiClient) -> Result<(), ClientError> {
        match self {
            Self::List => print_json(&client.list_users().await?),
            Self::Get { id } => print_json(&client.get_user(id).await?),
            Self::Create(fields) => print_json(&client.create_user(&fields.into()).await?),
            Self::Update { id, fields } => {
                print_json(&client.update_user(id, &fields.into()).await?)
            }
            Self::Delete { id } => {
                client.delete_user(id).await?;
                info!(id, "User deleted");
                Ok(())
            }
        }
    }
}

impl WorkshopCommands {
    async fn execute(self, client: &ApiClient) -> Result<(), ClientError> {
        match self {
            Self::List => print_json(&client.list_workshops().await?),
            Self::Get { id } => print_json(&client.get_workshop(id).await?),
            Self::Create(fields) => print_json(&client.create_workshop(&fields.into()).await?),
            Self::Update { id, fields } => {
                print_json(&client.update_workshop(id, &fields.into()).await?)
            }
            Self::Delete { id } => {
                client.delete_workshop(id).await?;
                info!(id, "Workshop deleted");
                Ok(())
            }
        }
    }
}

impl SkillCommands {
    async fn execute(self, client: &ApiClient) -> Result<(), ClientError> {
        match self {
            Self::List => print_json(&client.list_skills().await?),
            Self::Get { id } => print_json(&client.get_skill(id).await?),
            Self::Create { name } => {
                print_json(&client.create_skill(&SkillInput { name }).await?)
            }
            Self::Update { id, name } => {
                print_json(&client.update_skill(id, &SkillInput { name }).await?)
            }
            Self::Delete { id } => {
                client.delete_skill(id).await?;
                info!(id, "Skill deleted");
                Ok(())
            }
        }
    }
}

/// Refuse protected commands without a usable local session
fn require_login(guard: &RouteGuard) -> Result<()> {
    if !guard.is_allowed() {
        bail!(
            "Not logged in, run `admin-console login` first ({})",
            RouteGuard::LOGIN_ROUTE
        );
    }
    Ok(())
}

fn show_status(client: &ApiClient) {
    println!("{}", status_line(client.access_token().as_ref(), Utc::now()));
}

fn status_line(token: Option<&AccessToken>, now: DateTime<Utc>) -> String {
    let Some(token) = token else {
        return "Not logged in".to_string();
    };

    match expiry_of(token) {
        Ok(expires_at) if expires_at > now => format!(
            "Logged in, access token expires at {expires_at} ({}s left)",
            (expires_at - now).num_seconds()
        ),
        Ok(expires_at) => format!(
            "Access token expired at {expires_at}, log in again with `admin-console login`"
        ),
        Err(e) => format!("Logged in, access token expiry unknown ({e})"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_console_client::{MemoryTokenStore, Session, TokenStore};
    use chrono::TimeDelta;
    use std::sync::Arc;

    #[test]
    fn test_user_args_map_to_input() {
        let input: UserInput = UserArgs {
            name: "Taro".into(),
            email: "taro@example.com".into(),
            birthday: None,
            gender: None,
            phone_number: Some("03-0000-0000".into()),
            address: None,
            biography: None,
        }
        .into();

        assert_eq!(input.name, "Taro");
        assert_eq!(input.phone_number.as_deref(), Some("03-0000-0000"));
    }

    #[test]
    fn test_require_login() {
        let store = Arc::new(MemoryTokenStore::new());
        let guard = RouteGuard::new(store.clone());
        assert!(require_login(&guard).is_err());

        store.set(&Session::new(AccessToken::new("A1"), None));
        assert!(require_login(&guard).is_ok());
    }

    #[test]
    fn test_status_for_expired_token_points_to_login() {
        let now = Utc::now();
        let claims = serde_json::json!({ "exp": (now - TimeDelta::seconds(30)).timestamp() });
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"k"),
        )
        .unwrap();

        let line = status_line(Some(&AccessToken::new(token)), now);
        assert!(line.contains("admin-console login"), "{line}");
        assert!(!line.contains("refreshed"));

        assert_eq!(status_line(None, now), "Not logged in");
    }
}
