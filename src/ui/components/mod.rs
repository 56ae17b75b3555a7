mod dialog;
mod message_dialog;
mod spinner;
mod text_input;

use ratatui::style::Color;

pub use dialog::{DialogFrame, InstructionBar};
pub use message_dialog::{MessageDialog, MessageDialogKind};
pub use spinner::Spinner;
pub use text_input::TextInputState;

pub const ACCENT_PRIMARY: Color = Color::Cyan;
pub const ACCENT_ERROR: Color = Color::Red;
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_MUTED: Color = Color::Gray;
pub const TEXT_FAINT: Color = Color::DarkGray;
