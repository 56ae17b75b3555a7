//! Command-line surface

mod args;
mod commands;

pub use args::{
    Cli, Commands, ConfigCommand, FlagsCommand, ModeArg, RouteCommand, ScreenCommand,
    SettingsCommand, Toggle,
};
pub use commands::run;
