// CLI module for serving and administrative operations requiring server access

pub mod create_user;
pub mod migrate;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::internal::UserStatus;

/// Itemstash backend CLI
#[derive(Parser, Debug)]
#[command(name = "itemstash")]
#[command(about = "Itemstash backend: accounts, tokens and owner-gated item listings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Create an account with a generated password
    CreateUser {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Account tier
        #[arg(long, value_enum, default_value_t = StatusArg::Free)]
        status: StatusArg,
    },
}

impl Cli {
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Free,
    Premium,
}

impl From<StatusArg> for UserStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Free => UserStatus::Free,
            StatusArg::Premium => UserStatus::Premium,
        }
    }
}
