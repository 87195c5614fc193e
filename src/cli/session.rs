//! Session CLI commands
//!
//! Stores the bearer token issued by the backend.

use clap::Subcommand;

use crate::error::FinplanResult;
use crate::services::SessionStore;
use crate::storage::KeyValueStore;

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Store a session token
    Login {
        /// Bearer token issued by the backend
        #[arg(short, long, env = "FINPLAN_TOKEN", hide_env_values = true)]
        token: String,
        /// Username (read from the token when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
}

/// Handle a session command
pub fn handle_session_command<S: KeyValueStore>(store: &S, cmd: SessionCommands) -> FinplanResult<()> {
    let session = SessionStore::new(store);

    match cmd {
        SessionCommands::Login { token, username } => {
            session.login(&token, username.as_deref())?;
            let user = session.current_user()?.unwrap_or_default();
            println!("Logged in as {}", user);
        }

        SessionCommands::Logout => {
            session.logout()?;
            println!("Logged out");
        }

        SessionCommands::Whoami => match session.current_user()? {
            Some(user) => println!("{}", user),
            None => println!("Not logged in"),
        },
    }

    Ok(())
}
