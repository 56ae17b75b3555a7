//! Typed settings values

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppTheme {
    /// Follow the system theme
    #[default]
    Default,
    Dark,
    Light,
}

impl AppTheme {
    /// Stored value. The default theme is stored as absence.
    pub fn stored_value(&self) -> Option<&'static str> {
        match self {
            AppTheme::Default => None,
            AppTheme::Dark => Some("dark"),
            AppTheme::Light => Some("light"),
        }
    }

    pub fn from_stored_value(value: Option<&str>) -> Self {
        match value {
            Some("dark") => AppTheme::Dark,
            Some("light") => AppTheme::Light,
            _ => AppTheme::Default,
        }
    }
}

impl FromStr for AppTheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "default" | "system" => Ok(AppTheme::Default),
            "dark" => Ok(AppTheme::Dark),
            "light" => Ok(AppTheme::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// How long the vault stays unlocked without activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultTimeout {
    Immediately,
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    FourHours,
    OnAppRestart,
    Never,
    Custom(i64),
}

impl VaultTimeout {
    /// Stored minutes; `-1` on app restart, `None` for never
    pub fn minutes(&self) -> Option<i64> {
        match self {
            VaultTimeout::Immediately => Some(0),
            VaultTimeout::OneMinute => Some(1),
            VaultTimeout::FiveMinutes => Some(5),
            VaultTimeout::FifteenMinutes => Some(15),
            VaultTimeout::ThirtyMinutes => Some(30),
            VaultTimeout::OneHour => Some(60),
            VaultTimeout::FourHours => Some(240),
            VaultTimeout::OnAppRestart => Some(-1),
            VaultTimeout::Never => None,
            VaultTimeout::Custom(minutes) => Some(*minutes),
        }
    }

    pub fn from_minutes(minutes: Option<i64>) -> Self {
        match minutes {
            None => VaultTimeout::Never,
            Some(-1) => VaultTimeout::OnAppRestart,
            Some(0) => VaultTimeout::Immediately,
            Some(1) => VaultTimeout::OneMinute,
            Some(5) => VaultTimeout::FiveMinutes,
            Some(15) => VaultTimeout::FifteenMinutes,
            Some(30) => VaultTimeout::ThirtyMinutes,
            Some(60) => VaultTimeout::OneHour,
            Some(240) => VaultTimeout::FourHours,
            Some(other) => VaultTimeout::Custom(other),
        }
    }
}

impl FromStr for VaultTimeout {
    type Err = String;

    /// Accepts `never`, `on-restart`, `immediately` or a number of minutes
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "never" => Ok(VaultTimeout::Never),
            "on-restart" => Ok(VaultTimeout::OnAppRestart),
            "immediately" => Ok(VaultTimeout::Immediately),
            other => match other.parse::<i64>() {
                Ok(minutes) if minutes >= 0 => Ok(VaultTimeout::from_minutes(Some(minutes))),
                _ => Err(format!("invalid vault timeout: {other}")),
            },
        }
    }
}

impl std::fmt::Display for VaultTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultTimeout::Never => f.write_str("never"),
            VaultTimeout::OnAppRestart => f.write_str("on app restart"),
            VaultTimeout::Immediately => f.write_str("immediately"),
            other => write!(f, "{} minutes", other.minutes().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VaultTimeoutAction {
    #[default]
    Lock,
    Logout,
}

impl VaultTimeoutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultTimeoutAction::Lock => "lock",
            VaultTimeoutAction::Logout => "logout",
        }
    }
}

impl FromStr for VaultTimeoutAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lock" => Ok(VaultTimeoutAction::Lock),
            "logout" => Ok(VaultTimeoutAction::Logout),
            other => Err(format!("unknown vault timeout action: {other}")),
        }
    }
}

/// Delay before copied secrets are wiped from the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardClearFrequency {
    #[default]
    Never,
    TenSeconds,
    TwentySeconds,
    ThirtySeconds,
    OneMinute,
    TwoMinutes,
    FiveMinutes,
}

impl ClipboardClearFrequency {
    pub fn seconds(&self) -> Option<i64> {
        match self {
            ClipboardClearFrequency::Never => None,
            ClipboardClearFrequency::TenSeconds => Some(10),
            ClipboardClearFrequency::TwentySeconds => Some(20),
            ClipboardClearFrequency::ThirtySeconds => Some(30),
            ClipboardClearFrequency::OneMinute => Some(60),
            ClipboardClearFrequency::TwoMinutes => Some(120),
            ClipboardClearFrequency::FiveMinutes => Some(300),
        }
    }

    /// Unrecognized durations read as never
    pub fn from_seconds(seconds: Option<i64>) -> Self {
        match seconds {
            Some(10) => ClipboardClearFrequency::TenSeconds,
            Some(20) => ClipboardClearFrequency::TwentySeconds,
            Some(30) => ClipboardClearFrequency::ThirtySeconds,
            Some(60) => ClipboardClearFrequency::OneMinute,
            Some(120) => ClipboardClearFrequency::TwoMinutes,
            Some(300) => ClipboardClearFrequency::FiveMinutes,
            _ => ClipboardClearFrequency::Never,
        }
    }
}
