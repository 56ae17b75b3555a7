//! Interactive hosts for the screens.
//!
//! Each runner owns the terminal while its screen is shown, feeds key and
//! paste events to the view model, runs effects on the tokio runtime, and
//! returns once the screen emits an event the caller has to handle.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use super::components::Spinner;
use super::enterprise_sign_on::{
    EnterpriseSignOnAction, EnterpriseSignOnDialog, EnterpriseSignOnEvent, EnterpriseSignOnView,
    EnterpriseSignOnViewModel, SsoPrevalidator,
};
use super::qr_code_scan::{
    QrCodeScanEffect, QrCodeScanEvent, QrCodeScanView, QrCodeScanViewModel, TotpCodeResult,
};
use super::terminal_guard::TerminalGuard;

const FRAME: Duration = Duration::from_millis(16);
/// Frames per spinner step (~100ms)
const SPINNER_FRAMES: u32 = 6;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn open_terminal() -> anyhow::Result<(Term, TerminalGuard)> {
    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok((terminal, guard))
}

/// Next terminal event, if one arrives within a frame
fn poll_event() -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(0))? {
        return Ok(Some(event::read()?));
    }
    Ok(None)
}

/// How the QR code scan screen was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCodeScanOutcome {
    Scanned(TotpCodeResult),
    ManualEntry,
    Closed,
}

pub async fn run_qr_code_scan(vm: &mut QrCodeScanViewModel) -> anyhow::Result<QrCodeScanOutcome> {
    let (mut terminal, mut guard) = open_terminal()?;
    let mut scanned = None;

    let outcome = loop {
        terminal.draw(|f| f.render_widget(QrCodeScanView::new(vm.state()), f.area()))?;
        tokio::time::sleep(FRAME).await;

        let action = match poll_event()? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => vm.handle_key(key),
            Some(Event::Paste(text)) => {
                vm.handle_paste(&text);
                None
            }
            _ => None,
        };
        let Some(action) = action else { continue };

        let update = vm.handle_action(action);
        for effect in update.effects {
            match effect {
                QrCodeScanEffect::EmitTotpResult(result) => scanned = Some(result),
            }
        }
        match update.events.first() {
            Some(QrCodeScanEvent::NavigateBack) => {
                break match scanned.take() {
                    Some(result) => QrCodeScanOutcome::Scanned(result),
                    None => QrCodeScanOutcome::Closed,
                };
            }
            Some(QrCodeScanEvent::NavigateToManualCodeEntry) => break QrCodeScanOutcome::ManualEntry,
            None => {}
        }
    };

    guard.cleanup()?;
    Ok(outcome)
}

/// Show the sign-on screen until it navigates away. Returns `None` when
/// the user closed it.
pub async fn run_enterprise_sign_on(
    vm: &mut EnterpriseSignOnViewModel,
    prevalidator: Arc<dyn SsoPrevalidator>,
) -> anyhow::Result<Option<EnterpriseSignOnEvent>> {
    let (mut terminal, mut guard) = open_terminal()?;
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<EnterpriseSignOnAction>();
    let mut spinner = Spinner::new();
    let mut tick_count: u32 = 0;

    let outcome = loop {
        terminal.draw(|f| {
            f.render_widget(
                EnterpriseSignOnView::new(vm.state()).spinner(&spinner),
                f.area(),
            )
        })?;

        let action = tokio::select! {
            _ = tokio::time::sleep(FRAME) => {
                tick_count = tick_count.wrapping_add(1);
                if tick_count % SPINNER_FRAMES == 0
                    && matches!(vm.state().dialog, Some(EnterpriseSignOnDialog::Loading(_)))
                {
                    spinner.tick();
                }
                match poll_event()? {
                    Some(Event::Key(key)) if key.kind == KeyEventKind::Press => vm.handle_key(key),
                    Some(Event::Paste(text)) if vm.state().dialog.is_none() => {
                        let mut input = vm.state().org_identifier_input.clone();
                        input.insert_str(&text);
                        Some(EnterpriseSignOnAction::OrgIdentifierInputChange(
                            input.value().to_string(),
                        ))
                    }
                    _ => None,
                }
            }
            Some(action) = action_rx.recv() => Some(action),
        };
        let Some(action) = action else { continue };

        let update = vm.handle_action(action);
        for effect in update.effects {
            let prevalidator = prevalidator.clone();
            let action_tx = action_tx.clone();
            tokio::spawn(async move {
                let action =
                    EnterpriseSignOnViewModel::run_effect(effect, prevalidator.as_ref()).await;
                // Receiver is gone once the screen has been left
                let _ = action_tx.send(action);
            });
        }
        match update.events.into_iter().next() {
            Some(EnterpriseSignOnEvent::NavigateBack) => break None,
            Some(event) => break Some(event),
            None => {}
        }
    };

    guard.cleanup()?;
    Ok(outcome)
}
