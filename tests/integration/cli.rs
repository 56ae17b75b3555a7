//! End-to-end tests for the `warden` binary
//!
//! Every invocation gets its own `--data-dir` so nothing touches ~/.warden.

use assert_cmd::Command;
use predicates::prelude::*;

use super::common::fixtures::TestDataDir;

fn warden(data: &TestDataDir) -> Command {
    let mut cmd = Command::cargo_bin("warden").expect("binary is built");
    cmd.arg("--data-dir").arg(data.path());
    cmd
}

#[test]
fn test_route_encode_add() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["route", "encode", "--mode", "add", "--type", "login"])
        .assert()
        .success()
        .stdout(
            "vault_add_edit_item/add?vault_edit_id=null?vault_item_type=login\
             ?vault_add_selected_folder_id=null?vault_add_selected_collection_id=null\n",
        );
}

#[test]
fn test_route_encode_uses_configured_default_type() {
    let data = TestDataDir::new();
    data.write_config("[vault]\ndefault_cipher_type = \"card\"\n");
    warden(&data)
        .args(["route", "encode", "--mode", "edit", "--id", "i1", "--folder", "f1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vault_add_edit_item/edit?vault_edit_id=i1?vault_item_type=card\
             ?vault_add_selected_folder_id=f1",
        ));
}

#[test]
fn test_route_encode_edit_requires_id() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["route", "encode", "--mode", "clone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id is required"));
}

#[test]
fn test_route_decode() {
    let data = TestDataDir::new();
    warden(&data)
        .args([
            "route",
            "decode",
            "vault_add_edit_item/clone?vault_edit_id=abc?vault_item_type=secure_note\
             ?vault_add_selected_folder_id=null?vault_add_selected_collection_id=c9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: clone"))
        .stdout(predicate::str::contains("item_id: abc"))
        .stdout(predicate::str::contains("cipher_type: secure_note"))
        .stdout(predicate::str::contains("folder_id: (none)"))
        .stdout(predicate::str::contains("collection_id: c9"));

    warden(&data)
        .args(["route", "decode", "enterprise_single_sign_on/user@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("email_address: user@example.com"));
}

#[test]
fn test_route_encode_escapes_ids() {
    let data = TestDataDir::new();
    let output = warden(&data)
        .args(["route", "encode", "--mode", "edit", "--id", "a?b", "--folder", "f/1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let route = String::from_utf8(output.stdout).unwrap();
    assert!(route.contains("vault_edit_id=a%3Fb?"), "{route}");

    warden(&data)
        .args(["route", "decode", route.trim()])
        .assert()
        .success()
        .stdout(predicate::str::contains("item_id: a?b"))
        .stdout(predicate::str::contains("folder_id: f/1"));
}

#[test]
fn test_route_encode_ssh_key_follows_feature_flag() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["route", "encode", "--mode", "add", "--type", "ssh_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ssh_key items are not enabled"));

    warden(&data)
        .args(["config", "debug-menu", "on"])
        .assert()
        .success();
    warden(&data)
        .args(["flags", "set", "ssh-key-vault-item", "on"])
        .assert()
        .success();
    warden(&data)
        .args(["route", "encode", "--mode", "add", "--type", "ssh_key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vault_item_type=ssh_key"));
}

#[test]
fn test_route_decode_rejects_unknown_type() {
    let data = TestDataDir::new();
    warden(&data)
        .args([
            "route",
            "decode",
            "vault_add_edit_item/add?vault_edit_id=null?vault_item_type=passkey\
             ?vault_add_selected_folder_id=null?vault_add_selected_collection_id=null",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("passkey"));
}

#[test]
fn test_settings_persist_between_runs() {
    let data = TestDataDir::new();
    warden(&data).args(["settings", "theme", "dark"]).assert().success();
    warden(&data).args(["settings", "clipboard", "30"]).assert().success();
    warden(&data)
        .args(["settings", "active-user", "alice"])
        .assert()
        .success();
    warden(&data)
        .args(["settings", "vault-timeout", "15", "--action", "logout"])
        .assert()
        .success();

    warden(&data)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: dark"))
        .stdout(predicate::str::contains("clipboard_clear: 30s"))
        .stdout(predicate::str::contains("active_user: alice"))
        .stdout(predicate::str::contains("vault_timeout: 15 minutes"))
        .stdout(predicate::str::contains("vault_timeout_action: logout"));
}

#[test]
fn test_forget_user_drops_their_settings() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["settings", "active-user", "alice"])
        .assert()
        .success();
    warden(&data)
        .args(["settings", "vault-timeout", "15", "--action", "logout"])
        .assert()
        .success();

    warden(&data)
        .args(["settings", "forget-user", "alice"])
        .assert()
        .success();

    warden(&data)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active_user: alice"))
        .stdout(predicate::str::contains("vault_timeout: never"))
        .stdout(predicate::str::contains("vault_timeout_action: lock"));
}

#[test]
fn test_settings_reject_bad_values() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["settings", "clipboard", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported clipboard clear duration"));
    warden(&data)
        .args(["settings", "vault-timeout", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active user"));
}

#[test]
fn test_flag_overrides_with_debug_menu() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["config", "debug-menu", "on"])
        .assert()
        .success();
    warden(&data)
        .args(["flags", "set", "import-logins-flow", "on"])
        .assert()
        .success();
    warden(&data)
        .args(["flags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"import-logins-flow\s+on\s+override=on").unwrap());

    warden(&data).args(["flags", "reset"]).assert().success();
    warden(&data)
        .args(["flags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"import-logins-flow\s+off\s+override=off").unwrap());

    warden(&data).args(["flags", "clear"]).assert().success();
    warden(&data)
        .args(["flags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"import-logins-flow\s+off\s+override=-").unwrap());
}

#[test]
fn test_flags_set_unknown_key() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["flags", "set", "no-such-flag", "on"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown feature flag"));
}

#[test]
fn test_config_path_and_server() {
    let data = TestDataDir::new();
    warden(&data)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    warden(&data)
        .args(["config", "server", "https://vault.example.com"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(data.config_path()).unwrap();
    assert!(contents.contains("base_url = \"https://vault.example.com\""));
}
