//! Integration tests for the screens
//!
//! View models are driven by key events and effect results, then rendered
//! to a test terminal.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use warden::ui::enterprise_sign_on::{
    EnterpriseSignOnAction, EnterpriseSignOnDialog, EnterpriseSignOnEvent, EnterpriseSignOnView,
    PrevalidateSsoResult, SsoCallbackResult, GENERIC_ERROR_TITLE, SSO_CALLBACK_REDIRECT_URI,
};
use warden::ui::qr_code_scan::{
    QrCodeScanEffect, QrCodeScanEvent, QrCodeScanView, CANNOT_SCAN, ENTER_KEY_MANUALLY,
};
use warden::ui::{EnterpriseSignOnViewModel, QrCodeScanViewModel, SsoPrevalidator, TotpCodeResult};
use warden::Config;

use super::common::fixtures::TestDataDir;
use super::common::terminal::{assert_buffer_contains, buffer_to_string, render_widget};

const IDENTITY_URL: &str = "https://vault.example.com/identity";

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(vm: &EnterpriseSignOnViewModel, text: &str) -> Vec<EnterpriseSignOnAction> {
    let mut input = vm.state().org_identifier_input.clone();
    text.chars()
        .map(|c| {
            input.insert_char(c);
            EnterpriseSignOnAction::OrgIdentifierInputChange(input.value().to_string())
        })
        .collect()
}

struct AcceptingPrevalidator;

#[async_trait]
impl SsoPrevalidator for AcceptingPrevalidator {
    async fn prevalidate_sso(&self, org_identifier: &str) -> PrevalidateSsoResult {
        PrevalidateSsoResult::Success {
            token: format!("token-for-{org_identifier}"),
        }
    }
}

/// Typing a key by hand and pressing Enter reports it and leaves
#[test]
fn test_qr_code_scan_typed_key() {
    let mut vm = QrCodeScanViewModel::new();
    for c in "otpauth://totp/me?secret=JBSWY3DP".chars() {
        assert_eq!(vm.handle_key(key(KeyCode::Char(c))), None);
    }

    let buffer = render_widget(QrCodeScanView::new(vm.state()), 60, 16);
    assert_buffer_contains(&buffer, "otpauth://totp/me?secret=JBSWY3DP");
    assert_buffer_contains(&buffer, CANNOT_SCAN);
    assert_buffer_contains(&buffer, ENTER_KEY_MANUALLY);

    let action = vm.handle_key(key(KeyCode::Enter)).expect("enter submits");
    let update = vm.handle_action(action);
    assert_eq!(
        update.effects,
        vec![QrCodeScanEffect::EmitTotpResult(TotpCodeResult::Success(
            "otpauth://totp/me?secret=JBSWY3DP".to_string()
        ))]
    );
    assert_eq!(update.events, vec![QrCodeScanEvent::NavigateBack]);
    assert!(vm.state().scanner_input.is_empty());
}

#[test]
fn test_qr_code_scan_pasted_garbage_is_an_error() {
    let mut vm = QrCodeScanViewModel::new();
    vm.handle_paste("https://example.com");
    let action = vm.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(
        vm.handle_action(action).effects,
        vec![QrCodeScanEffect::EmitTotpResult(
            TotpCodeResult::CodeScanningError
        )]
    );
}

/// Prevalidate, open the browser, receive the callback
#[tokio::test]
async fn test_sso_round_trip_remembers_organization() {
    let data = TestDataDir::new();
    let core = data.open_core(Config::default());
    let mut vm = EnterpriseSignOnViewModel::new(
        "user@example.com".to_string(),
        IDENTITY_URL.to_string(),
        core.auth_disk_source().clone(),
    );

    for action in type_text(&vm, "acme") {
        vm.handle_action(action);
    }
    let action = vm.handle_key(key(KeyCode::Enter)).unwrap();
    let update = vm.handle_action(action);
    assert!(matches!(
        vm.state().dialog,
        Some(EnterpriseSignOnDialog::Loading(_))
    ));
    assert_eq!(vm.handle_key(key(KeyCode::Char('x'))), None);

    let effect = update.effects.into_iter().next().expect("prevalidate effect");
    let result = EnterpriseSignOnViewModel::run_effect(effect, &AcceptingPrevalidator).await;
    let update = vm.handle_action(result);
    let Some(EnterpriseSignOnEvent::NavigateToSsoLogin { uri }) = update.events.first() else {
        panic!("expected browser navigation, got {:?}", update.events);
    };
    assert!(uri.starts_with(&format!("{IDENTITY_URL}/connect/authorize?")));
    assert!(uri.contains("ssoToken=token-for-acme"));

    let state = uri
        .split('&')
        .find_map(|pair| pair.strip_prefix("state="))
        .unwrap()
        .to_string();
    let callback = format!("{SSO_CALLBACK_REDIRECT_URI}?code=auth-code&state={state}");
    let update = vm.handle_action(EnterpriseSignOnAction::SsoCallbackResult(
        SsoCallbackResult::from_callback_uri(&callback),
    ));
    match update.events.as_slice() {
        [EnterpriseSignOnEvent::LoginWithSso {
            email,
            code,
            org_identifier,
            redirect_uri,
            ..
        }] => {
            assert_eq!(email, "user@example.com");
            assert_eq!(code, "auth-code");
            assert_eq!(org_identifier, "acme");
            assert_eq!(redirect_uri, SSO_CALLBACK_REDIRECT_URI);
        }
        other => panic!("expected login, got {other:?}"),
    }

    let reopened = EnterpriseSignOnViewModel::new(
        "user@example.com".to_string(),
        IDENTITY_URL.to_string(),
        core.auth_disk_source().clone(),
    );
    assert_eq!(reopened.state().org_identifier_input.value(), "acme");
}

/// Errors are shown over the form and dismissed with Enter
#[test]
fn test_sso_error_dialog_renders_and_dismisses() {
    let db = warden::Database::open_in_memory().unwrap();
    let auth = warden::AuthDiskSource::new(db.connection()).unwrap();
    let mut vm =
        EnterpriseSignOnViewModel::new("user@example.com".to_string(), IDENTITY_URL.to_string(), auth);

    vm.handle_action(EnterpriseSignOnAction::LogInClick);
    let buffer = render_widget(EnterpriseSignOnView::new(vm.state()), 70, 20);
    assert_buffer_contains(&buffer, GENERIC_ERROR_TITLE);
    assert_buffer_contains(&buffer, "user@example.com");

    let dismiss = vm.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(dismiss, EnterpriseSignOnAction::DialogDismiss);
    vm.handle_action(dismiss);
    assert_eq!(vm.state().dialog, None);
    let buffer = render_widget(EnterpriseSignOnView::new(vm.state()), 70, 20);
    assert!(!buffer_to_string(&buffer).contains(GENERIC_ERROR_TITLE));
}
