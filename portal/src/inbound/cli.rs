//! Command-line arguments for the `portal` binary.

use clap::{Args, Parser, Subcommand};
use pagination::PageSize;

/// `portal` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portal",
    about = "Browse products, look up the weather and sign in from the terminal",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show one page of the product catalogue.
    Products {
        /// Entries per page (5, 10, 15, 20 or 25).
        #[arg(long = "page-size", value_name = "n", default_value_t = PageSize::FIVE)]
        page_size: PageSize,
        /// Page to show; out-of-range values are clamped.
        #[arg(long, value_name = "p", default_value_t = 1)]
        page: usize,
    },
    /// Show current conditions and the week's temperature trend.
    Weather {
        /// Place name; defaults to Surat.
        location: Option<String>,
    },
    /// Authenticate against the identity provider.
    Auth {
        /// Auth flow to run.
        #[command(subcommand)]
        action: AuthCommand,
    },
}

/// Auth flows.
#[derive(Debug, Clone, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password, then show the dashboard profile.
    SignIn(PasswordArgs),
    /// Create an account, then show the dashboard profile.
    SignUp(PasswordArgs),
    /// Send a password-reset email.
    Reset {
        /// Account email.
        #[arg(long, value_name = "email")]
        email: String,
    },
    /// Exchange a federated identity token for a session.
    Federated {
        /// Provider id such as `google.com`.
        #[arg(long = "provider-id", value_name = "id", default_value = "google.com")]
        provider_id: String,
        /// Token issued by the federated provider.
        #[arg(long = "id-token", value_name = "token")]
        id_token: String,
    },
}

/// Email and password inputs.
#[derive(Debug, Clone, Args)]
pub struct PasswordArgs {
    /// Account email.
    #[arg(long, value_name = "email")]
    pub email: String,
    /// Password; read from stdin when omitted.
    #[arg(long, value_name = "password")]
    pub password: Option<String>,
    /// Confirmation for sign-up; defaults to the password.
    #[arg(long = "confirm-password", value_name = "password")]
    pub confirm_password: Option<String>,
}
