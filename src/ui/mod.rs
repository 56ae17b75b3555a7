//! Screens: view models, their ratatui views, and the interactive runners

pub mod components;
pub mod enterprise_sign_on;
pub mod qr_code_scan;
pub mod runner;
pub mod terminal_guard;
mod update;

pub use enterprise_sign_on::{EnterpriseSignOnViewModel, SsoPrevalidator};
pub use qr_code_scan::{QrCodeScanViewModel, TotpCodeResult};
pub use runner::{run_enterprise_sign_on, run_qr_code_scan, QrCodeScanOutcome};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
pub use update::Update;
