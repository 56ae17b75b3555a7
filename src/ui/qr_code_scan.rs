//! QR code scan screen.
//!
//! On a terminal there is no camera, so the scanner is fed by typed or
//! pasted text (a hardware scanner acting as a keyboard works too).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::components::{
    InstructionBar, TextInputState, ACCENT_PRIMARY, TEXT_FAINT, TEXT_MUTED, TEXT_PRIMARY,
};
use super::update::Update;

pub const TITLE: &str = "Scan QR code";
pub const INSTRUCTIONS: &str = "Point your camera at the QR code.";
pub const CANNOT_SCAN: &str = "Cannot scan QR code.";
pub const ENTER_KEY_MANUALLY: &str = "Enter key manually";

const TOTP_PREFIXES: [&str; 2] = ["otpauth://", "steam://"];

/// Outcome handed back to the screen that asked for a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TotpCodeResult {
    Success(String),
    CodeScanningError,
}

impl TotpCodeResult {
    /// Classify scanned text as an authenticator key or a failed scan
    pub fn from_scan(code: &str) -> Self {
        if TOTP_PREFIXES.iter().any(|prefix| code.starts_with(prefix)) {
            TotpCodeResult::Success(code.to_string())
        } else {
            TotpCodeResult::CodeScanningError
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCodeScanAction {
    CloseClick,
    ManualEntryTextClick,
    CameraSetupErrorReceive,
    QrCodeScanReceive(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCodeScanEvent {
    NavigateBack,
    NavigateToManualCodeEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCodeScanEffect {
    EmitTotpResult(TotpCodeResult),
}

pub type QrCodeScanUpdate = Update<QrCodeScanEvent, QrCodeScanEffect>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeScanState {
    /// Text received from the scanner so far
    pub scanner_input: TextInputState,
}

#[derive(Debug, Default)]
pub struct QrCodeScanViewModel {
    state: QrCodeScanState,
}

impl QrCodeScanViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QrCodeScanState {
        &self.state
    }

    pub fn handle_action(&mut self, action: QrCodeScanAction) -> QrCodeScanUpdate {
        match action {
            QrCodeScanAction::CloseClick => Update::event(QrCodeScanEvent::NavigateBack),
            QrCodeScanAction::ManualEntryTextClick | QrCodeScanAction::CameraSetupErrorReceive => {
                Update::event(QrCodeScanEvent::NavigateToManualCodeEntry)
            }
            QrCodeScanAction::QrCodeScanReceive(code) => {
                self.state.scanner_input.clear();
                let result = TotpCodeResult::from_scan(&code);
                tracing::debug!(success = matches!(result, TotpCodeResult::Success(_)), "QR code scanned");
                Update::effect(QrCodeScanEffect::EmitTotpResult(result))
                    .with_event(QrCodeScanEvent::NavigateBack)
            }
        }
    }

    /// Map a key press to an action, editing the scanner input in place
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<QrCodeScanAction> {
        let input = &mut self.state.scanner_input;
        match key.code {
            KeyCode::Esc => Some(QrCodeScanAction::CloseClick),
            KeyCode::Enter if !input.is_empty() => Some(QrCodeScanAction::QrCodeScanReceive(
                input.value().to_string(),
            )),
            KeyCode::Tab => Some(QrCodeScanAction::ManualEntryTextClick),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.insert_char(c);
                None
            }
            KeyCode::Backspace => {
                input.delete_char();
                None
            }
            KeyCode::Left => {
                input.move_left();
                None
            }
            KeyCode::Right => {
                input.move_right();
                None
            }
            _ => None,
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.state.scanner_input.insert_str(text);
    }
}

/// Renders [`QrCodeScanState`]
pub struct QrCodeScanView<'a> {
    state: &'a QrCodeScanState,
}

impl<'a> QrCodeScanView<'a> {
    pub fn new(state: &'a QrCodeScanState) -> Self {
        Self { state }
    }
}

impl Widget for QrCodeScanView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", TITLE))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT_PRIMARY));
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, instructions, _, scanner, _, fallback, _, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(INSTRUCTIONS)
            .style(Style::default().fg(TEXT_PRIMARY))
            .alignment(Alignment::Center)
            .render(instructions, buf);

        let scanner_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_FAINT));
        let scanner_inner = scanner_block.inner(scanner);
        scanner_block.render(scanner, buf);
        self.state.scanner_input.render_with_placeholder(
            scanner_inner,
            buf,
            Style::default().fg(TEXT_PRIMARY),
            "otpauth://…",
            Style::default().fg(TEXT_FAINT),
        );

        Paragraph::new(vec![
            Line::from(Span::styled(CANNOT_SCAN, Style::default().fg(TEXT_MUTED))),
            Line::from(Span::styled(
                ENTER_KEY_MANUALLY,
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(fallback, buf);

        InstructionBar::new(vec![("Enter", "Scan"), ("Tab", "Manual entry"), ("Esc", "Close")])
            .render(hints, buf);
    }
}
