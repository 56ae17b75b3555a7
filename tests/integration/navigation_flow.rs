//! Integration tests for navigating between destinations
//!
//! Routes are pushed through the navigator and decoded on the receiving
//! side, the way a destination reads its arguments.

use warden::nav::{PopUpTo, QR_CODE_SCAN_ROUTE};
use warden::{
    CipherType, EnterpriseSignOnArgs, NavError, NavOptions, Navigator, VaultAddEditArgs,
    VaultAddEditMode,
};

/// Push an add/edit route and decode it from the top of the stack
#[test]
fn test_add_edit_arguments_survive_navigation() {
    let mut navigator = Navigator::new("vault");
    let args = VaultAddEditArgs::new(
        VaultAddEditMode::EditItem {
            item_id: "c0ffee".to_string(),
        },
        CipherType::Card,
    )
    .with_folder("f1");

    navigator.navigate_to_vault_add_edit(&args, NavOptions::default());

    let received = navigator.current_route().expect("stack is never empty");
    assert_eq!(VaultAddEditArgs::from_route(received), Ok(args));
    assert_eq!(navigator.back_stack().len(), 2);
}

/// Clone keeps the source id, add carries none
#[test]
fn test_clone_and_add_modes() {
    let clone = VaultAddEditArgs::new(
        VaultAddEditMode::CloneItem {
            item_id: "abc".to_string(),
        },
        CipherType::SecureNote,
    );
    let decoded = VaultAddEditArgs::from_route(&clone.to_route()).unwrap();
    assert_eq!(decoded.mode.item_id(), Some("abc"));
    assert_eq!(decoded.cipher_type, CipherType::SecureNote);

    let add = VaultAddEditArgs::new(VaultAddEditMode::AddItem, CipherType::SshKey)
        .with_collection("col-7");
    let decoded = VaultAddEditArgs::from_route(&add.to_route()).unwrap();
    assert_eq!(decoded.mode, VaultAddEditMode::AddItem);
    assert_eq!(decoded.selected_folder_id, None);
    assert_eq!(decoded.selected_collection_id.as_deref(), Some("col-7"));
}

/// Ids with route separators and URL-reserved characters round trip
#[test]
fn test_ids_survive_the_route() {
    let args = VaultAddEditArgs::new(VaultAddEditMode::AddItem, CipherType::Login)
        .with_folder("a b&c=d")
        .with_collection("f?1");
    let route = args.to_route();
    assert!(route.contains("vault_add_selected_folder_id=a%20b%26c%3Dd"));
    let decoded = VaultAddEditArgs::from_route(&route).unwrap();
    assert_eq!(decoded, args);
}

/// An id spelled "null" cannot be told apart from an unset one
#[test]
fn test_literal_null_id_reads_as_absent() {
    let args = VaultAddEditArgs::new(VaultAddEditMode::AddItem, CipherType::Login)
        .with_folder("null");
    let decoded = VaultAddEditArgs::from_route(&args.to_route()).unwrap();
    assert_eq!(decoded.selected_folder_id, None);
}

#[test]
fn test_malformed_routes_are_rejected() {
    assert!(matches!(
        VaultAddEditArgs::from_route(
            "vault_add_edit_item/move?vault_edit_id=null?vault_item_type=login\
             ?vault_add_selected_folder_id=null?vault_add_selected_collection_id=null"
        ),
        Err(NavError::UnrecognizedDiscriminator { .. })
    ));
    assert!(matches!(
        VaultAddEditArgs::from_route(
            "vault_add_edit_item/edit?vault_edit_id=null?vault_item_type=login\
             ?vault_add_selected_folder_id=null?vault_add_selected_collection_id=null"
        ),
        Err(NavError::MissingArgument(_))
    ));
    assert!(matches!(
        VaultAddEditArgs::from_route("qr_code_scan"),
        Err(NavError::RouteMismatch { .. })
    ));
}

/// Sign-on is reached from the landing screen and replaced on success
#[test]
fn test_sign_on_then_pop_up_to() {
    let mut navigator = Navigator::new("landing");
    navigator.navigate_to_enterprise_sign_on(
        &EnterpriseSignOnArgs::new("user@example.com"),
        NavOptions::default(),
    );
    assert_eq!(
        EnterpriseSignOnArgs::from_route(navigator.current_route().unwrap())
            .unwrap()
            .email_address,
        "user@example.com"
    );

    navigator.navigate(
        "vault",
        NavOptions {
            launch_single_top: false,
            pop_up_to: Some(PopUpTo {
                route_prefix: "landing".to_string(),
                inclusive: true,
            }),
        },
    );
    assert_eq!(navigator.back_stack(), ["vault".to_string()]);
    assert!(!navigator.pop_back_stack());
}

/// The scanner is pushed once even when requested twice
#[test]
fn test_qr_code_scan_single_top() {
    let mut navigator = Navigator::new("vault_add_edit_item/add");
    let single_top = NavOptions {
        launch_single_top: true,
        ..NavOptions::default()
    };
    navigator.navigate_to_qr_code_scan(single_top.clone());
    navigator.navigate_to_qr_code_scan(single_top);

    assert_eq!(navigator.back_stack().len(), 2);
    assert_eq!(navigator.current_route(), Some(QR_CODE_SCAN_ROUTE.as_str()));
    assert!(navigator.pop_back_stack());
    assert_eq!(navigator.current_route(), Some("vault_add_edit_item/add"));
}
