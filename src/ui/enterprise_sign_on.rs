//! Enterprise single sign-on screen.
//!
//! Collects the organization identifier, prevalidates it with the identity
//! service, and builds the PKCE authorize request the browser is sent to.
//! The callback's authorization code is handed back to the host as a
//! [`EnterpriseSignOnEvent::LoginWithSso`] event.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use sha2::{Digest, Sha256};

use super::components::{
    InstructionBar, MessageDialog, MessageDialogKind, Spinner, TextInputState, ACCENT_PRIMARY,
    TEXT_FAINT, TEXT_MUTED, TEXT_PRIMARY,
};
use super::update::Update;
use crate::data::AuthDiskSource;

pub const TITLE: &str = "Enterprise single sign-on";
pub const ORG_IDENTIFIER_LABEL: &str = "Organization identifier";
pub const GENERIC_ERROR_TITLE: &str = "An error has occurred.";
pub const GENERIC_ERROR_MESSAGE: &str =
    "We were unable to process your request. Please try again or contact us.";
pub const ORG_IDENTIFIER_REQUIRED: &str = "The Organization identifier field is required.";
pub const LOGGING_IN: &str = "Logging in…";
pub const SSO_CALLBACK_REDIRECT_URI: &str = "bitwarden://sso-callback";

const CLIENT_ID: &str = "mobile";
const SCOPE: &str = "api offline_access";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterpriseSignOnDialog {
    Error { title: String, message: String },
    Loading(String),
}

impl EnterpriseSignOnDialog {
    fn error(message: impl Into<String>) -> Self {
        EnterpriseSignOnDialog::Error {
            title: GENERIC_ERROR_TITLE.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseSignOnState {
    pub email_address: String,
    pub org_identifier_input: TextInputState,
    pub dialog: Option<EnterpriseSignOnDialog>,
}

/// Outcome of asking the identity service whether an organization uses SSO
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrevalidateSsoResult {
    Success { token: String },
    Failure { message: Option<String> },
}

/// What the browser hands back on the SSO callback URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsoCallbackResult {
    Success { code: String, state: String },
    MissingCode,
}

impl SsoCallbackResult {
    /// Read `code` and `state` from the callback URI's query
    pub fn from_callback_uri(uri: &str) -> Self {
        let query = uri.split_once('?').map(|(_, q)| q).unwrap_or_default();
        let param = |name: &str| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == name)
                .and_then(|(_, value)| urlencoding::decode(value).ok())
                .map(|value| value.into_owned())
        };
        match param("code").filter(|code| !code.is_empty()) {
            Some(code) => SsoCallbackResult::Success {
                code,
                state: param("state").unwrap_or_default(),
            },
            None => SsoCallbackResult::MissingCode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterpriseSignOnInternalAction {
    PrevalidateSsoResult(PrevalidateSsoResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterpriseSignOnAction {
    CloseButtonClick,
    DialogDismiss,
    LogInClick,
    OrgIdentifierInputChange(String),
    SsoCallbackResult(SsoCallbackResult),
    Internal(EnterpriseSignOnInternalAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterpriseSignOnEvent {
    NavigateBack,
    NavigateToSsoLogin {
        uri: String,
    },
    LoginWithSso {
        email: String,
        code: String,
        code_verifier: String,
        redirect_uri: String,
        org_identifier: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterpriseSignOnEffect {
    PrevalidateSso { org_identifier: String },
}

pub type EnterpriseSignOnUpdate = Update<EnterpriseSignOnEvent, EnterpriseSignOnEffect>;

#[async_trait]
pub trait SsoPrevalidator: Send + Sync {
    async fn prevalidate_sso(&self, org_identifier: &str) -> PrevalidateSsoResult;
}

/// Authorize request in flight, matched against the callback
#[derive(Debug, Clone)]
struct PendingSso {
    org_identifier: String,
    code_verifier: String,
    state: String,
}

pub struct EnterpriseSignOnViewModel {
    state: EnterpriseSignOnState,
    identity_url: String,
    auth_disk_source: AuthDiskSource,
    pending: Option<PendingSso>,
}

/// 32 random bytes, base64url without padding
fn random_token() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>())
}

/// PKCE S256 challenge for `code_verifier`
pub fn code_challenge(code_verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()))
}

/// Authorize URI the browser is opened on
pub fn authorize_uri(
    identity_url: &str,
    org_identifier: &str,
    sso_token: &str,
    state: &str,
    code_verifier: &str,
) -> String {
    let params = [
        ("client_id", CLIENT_ID.to_string()),
        ("redirect_uri", SSO_CALLBACK_REDIRECT_URI.to_string()),
        ("response_type", "code".to_string()),
        ("scope", SCOPE.to_string()),
        ("state", state.to_string()),
        ("code_challenge", code_challenge(code_verifier)),
        ("code_challenge_method", "S256".to_string()),
        ("response_mode", "query".to_string()),
        ("domain_hint", org_identifier.to_string()),
        ("ssoToken", sso_token.to_string()),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}/connect/authorize?{query}",
        identity_url.trim_end_matches('/')
    )
}

impl EnterpriseSignOnViewModel {
    pub fn new(email_address: String, identity_url: String, auth_disk_source: AuthDiskSource) -> Self {
        let remembered = auth_disk_source
            .remembered_org_identifier()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read remembered organization");
                None
            })
            .unwrap_or_default();
        Self {
            state: EnterpriseSignOnState {
                email_address,
                org_identifier_input: TextInputState::with_value(&remembered),
                dialog: None,
            },
            identity_url,
            auth_disk_source,
            pending: None,
        }
    }

    pub fn state(&self) -> &EnterpriseSignOnState {
        &self.state
    }

    pub fn handle_action(&mut self, action: EnterpriseSignOnAction) -> EnterpriseSignOnUpdate {
        match action {
            EnterpriseSignOnAction::CloseButtonClick => {
                Update::event(EnterpriseSignOnEvent::NavigateBack)
            }
            EnterpriseSignOnAction::DialogDismiss => {
                self.state.dialog = None;
                Update::none()
            }
            EnterpriseSignOnAction::OrgIdentifierInputChange(input) => {
                self.state.org_identifier_input.set(&input);
                Update::none()
            }
            EnterpriseSignOnAction::LogInClick => self.handle_log_in_click(),
            EnterpriseSignOnAction::SsoCallbackResult(result) => self.handle_sso_callback(result),
            EnterpriseSignOnAction::Internal(
                EnterpriseSignOnInternalAction::PrevalidateSsoResult(result),
            ) => self.handle_prevalidate_result(result),
        }
    }

    fn handle_log_in_click(&mut self) -> EnterpriseSignOnUpdate {
        let org_identifier = self.state.org_identifier_input.value().trim().to_string();
        if org_identifier.is_empty() {
            self.state.dialog = Some(EnterpriseSignOnDialog::error(ORG_IDENTIFIER_REQUIRED));
            return Update::none();
        }
        self.state.dialog = Some(EnterpriseSignOnDialog::Loading(LOGGING_IN.to_string()));
        Update::effect(EnterpriseSignOnEffect::PrevalidateSso { org_identifier })
    }

    fn handle_prevalidate_result(&mut self, result: PrevalidateSsoResult) -> EnterpriseSignOnUpdate {
        let token = match result {
            PrevalidateSsoResult::Success { token } => token,
            PrevalidateSsoResult::Failure { message } => {
                tracing::warn!(?message, "SSO prevalidation failed");
                self.state.dialog = Some(EnterpriseSignOnDialog::error(
                    message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                ));
                return Update::none();
            }
        };

        let org_identifier = self.state.org_identifier_input.value().trim().to_string();
        if let Err(e) = self
            .auth_disk_source
            .store_remembered_org_identifier(Some(&org_identifier))
        {
            tracing::warn!(error = %e, "Failed to remember organization");
        }

        let pending = PendingSso {
            org_identifier,
            code_verifier: random_token(),
            state: random_token(),
        };
        let uri = authorize_uri(
            &self.identity_url,
            &pending.org_identifier,
            &token,
            &pending.state,
            &pending.code_verifier,
        );
        self.pending = Some(pending);
        self.state.dialog = None;
        Update::event(EnterpriseSignOnEvent::NavigateToSsoLogin { uri })
    }

    fn handle_sso_callback(&mut self, result: SsoCallbackResult) -> EnterpriseSignOnUpdate {
        let (code, state) = match result {
            SsoCallbackResult::Success { code, state } => (code, state),
            SsoCallbackResult::MissingCode => {
                self.state.dialog = Some(EnterpriseSignOnDialog::error(GENERIC_ERROR_MESSAGE));
                return Update::none();
            }
        };

        let pending = match self.pending.take() {
            Some(pending) if pending.state == state => pending,
            other => {
                tracing::warn!("SSO callback state does not match the pending request");
                self.pending = other;
                self.state.dialog = Some(EnterpriseSignOnDialog::error(GENERIC_ERROR_MESSAGE));
                return Update::none();
            }
        };

        self.state.dialog = Some(EnterpriseSignOnDialog::Loading(LOGGING_IN.to_string()));
        Update::event(EnterpriseSignOnEvent::LoginWithSso {
            email: self.state.email_address.clone(),
            code,
            code_verifier: pending.code_verifier,
            redirect_uri: SSO_CALLBACK_REDIRECT_URI.to_string(),
            org_identifier: pending.org_identifier,
        })
    }

    /// Run `effect` and return the action that reports its outcome
    pub async fn run_effect(
        effect: EnterpriseSignOnEffect,
        prevalidator: &dyn SsoPrevalidator,
    ) -> EnterpriseSignOnAction {
        match effect {
            EnterpriseSignOnEffect::PrevalidateSso { org_identifier } => {
                let result = prevalidator.prevalidate_sso(&org_identifier).await;
                EnterpriseSignOnAction::Internal(
                    EnterpriseSignOnInternalAction::PrevalidateSsoResult(result),
                )
            }
        }
    }

    /// Map a key press to an action
    pub fn handle_key(&self, key: KeyEvent) -> Option<EnterpriseSignOnAction> {
        match (&self.state.dialog, key.code) {
            (Some(EnterpriseSignOnDialog::Error { .. }), KeyCode::Esc | KeyCode::Enter) => {
                Some(EnterpriseSignOnAction::DialogDismiss)
            }
            (_, KeyCode::Esc) => Some(EnterpriseSignOnAction::CloseButtonClick),
            (Some(_), _) => None,
            (None, KeyCode::Enter) => Some(EnterpriseSignOnAction::LogInClick),
            (None, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut input = self.state.org_identifier_input.clone();
                input.insert_char(c);
                Some(EnterpriseSignOnAction::OrgIdentifierInputChange(
                    input.value().to_string(),
                ))
            }
            (None, KeyCode::Backspace) => {
                let mut input = self.state.org_identifier_input.clone();
                input.delete_char();
                Some(EnterpriseSignOnAction::OrgIdentifierInputChange(
                    input.value().to_string(),
                ))
            }
            _ => None,
        }
    }
}

/// Renders [`EnterpriseSignOnState`]
pub struct EnterpriseSignOnView<'a> {
    state: &'a EnterpriseSignOnState,
    spinner: Option<&'a Spinner>,
}

impl<'a> EnterpriseSignOnView<'a> {
    pub fn new(state: &'a EnterpriseSignOnState) -> Self {
        Self {
            state,
            spinner: None,
        }
    }

    pub fn spinner(mut self, spinner: &'a Spinner) -> Self {
        self.spinner = Some(spinner);
        self
    }
}

impl Widget for EnterpriseSignOnView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", TITLE))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT_PRIMARY));
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, email, _, field, _, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.email_address.as_str())
            .style(Style::default().fg(TEXT_MUTED))
            .render(email.inner(ratatui::layout::Margin::new(1, 0)), buf);

        let field_block = Block::default()
            .title(format!(" {} ", ORG_IDENTIFIER_LABEL))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_FAINT));
        let field_inner = field_block.inner(field);
        field_block.render(field, buf);
        self.state.org_identifier_input.render_with_placeholder(
            field_inner,
            buf,
            Style::default().fg(TEXT_PRIMARY),
            "",
            Style::default(),
        );

        InstructionBar::new(vec![("Enter", "Log in"), ("Esc", "Close")]).render(hints, buf);

        match &self.state.dialog {
            Some(EnterpriseSignOnDialog::Error { title, message }) => {
                MessageDialog::new(MessageDialogKind::Error { title, message }).render(area, buf);
            }
            Some(EnterpriseSignOnDialog::Loading(message)) => {
                let mut dialog = MessageDialog::new(MessageDialogKind::Loading { message });
                if let Some(spinner) = self.spinner {
                    dialog = dialog.spinner(spinner);
                }
                dialog.render(area, buf);
            }
            None => {}
        }
    }
}
