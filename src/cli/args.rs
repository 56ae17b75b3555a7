use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Vault client: navigation routes, settings and sign-in screens", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to ~/.warden)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode and decode navigation routes
    Route {
        #[command(subcommand)]
        command: RouteCommand,
    },

    /// Read and change persisted settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Inspect and override feature flags
    Flags {
        #[command(subcommand)]
        command: FlagsCommand,
    },

    /// Edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Open an interactive screen
    Screen {
        #[command(subcommand)]
        command: ScreenCommand,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Add,
    Edit,
    #[value(name = "clone")]
    CloneItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Subcommand)]
pub enum RouteCommand {
    /// Print the add/edit item route
    Encode {
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// Item id, required for edit and clone
        #[arg(long)]
        id: Option<String>,

        /// Item type (login, card, identity, secure_note, ssh_key)
        #[arg(long = "type")]
        cipher_type: Option<String>,

        #[arg(long)]
        folder: Option<String>,

        #[arg(long)]
        collection: Option<String>,
    },

    /// Decode a route into its arguments
    Decode { route: String },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,

    /// Set the app theme (default, dark, light)
    Theme { theme: String },

    ScreenCapture {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Seconds before copied secrets are cleared (10, 20, 30, 60, 120, 300) or "never"
    Clipboard { seconds: String },

    /// Vault timeout for the active user: minutes, "immediately", "on-restart" or "never"
    VaultTimeout {
        timeout: String,

        /// Action taken when the timeout elapses (lock, logout)
        #[arg(long)]
        action: Option<String>,
    },

    /// Show, set or clear the active user
    ActiveUser {
        user_id: Option<String>,

        #[arg(long, conflicts_with = "user_id")]
        clear: bool,
    },

    /// Enable or disable biometric unlock for the active user
    Biometrics {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Delete a user's vault timeout settings and biometric unlock key
    ForgetUser { user_id: String },
}

#[derive(Subcommand)]
pub enum FlagsCommand {
    List,

    Set {
        key: String,

        #[arg(value_enum)]
        state: Toggle,
    },

    /// Reset every override to the server value
    Reset,

    /// Delete every stored override
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Set the server base URL
    Server { base_url: String },

    DebugMenu {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
pub enum ScreenCommand {
    /// Scan an authenticator key
    QrScan,

    /// Log in through the organization's identity provider
    Sso {
        #[arg(long)]
        email: String,
    },
}
