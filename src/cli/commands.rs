use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;

use super::args::{
    Commands, ConfigCommand, FlagsCommand, ModeArg, RouteCommand, ScreenCommand, SettingsCommand,
};
use crate::config::{save_debug_menu_enabled, save_server_base_url, Config};
use crate::core::WardenCore;
use crate::nav::{
    EnterpriseSignOnArgs, NavOptions, Navigator, VaultAddEditArgs, VaultAddEditMode,
    ADD_EDIT_ITEM_PREFIX, ENTERPRISE_SIGN_ON_ROUTE, QR_CODE_SCAN_ROUTE,
};
use crate::network::IdentityClient;
use crate::platform::{
    AppTheme, ClipboardClearFrequency, DispatcherManager, FeatureFlag, VaultTimeout,
    VaultTimeoutAction,
};
use crate::ui::enterprise_sign_on::{
    EnterpriseSignOnAction, EnterpriseSignOnDialog, EnterpriseSignOnEvent, SsoCallbackResult,
    SSO_CALLBACK_REDIRECT_URI,
};
use crate::ui::{
    run_enterprise_sign_on, run_qr_code_scan, EnterpriseSignOnViewModel, QrCodeScanOutcome,
    QrCodeScanViewModel, TotpCodeResult,
};
use crate::util;
use crate::vault::CipherType;

/// Route the app starts on; screens are pushed above it
const START_ROUTE: &str = "vault";

const NONE: &str = "(none)";

pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Route { command } => run_route(command),
        Commands::Settings { command } => run_settings(command, &open_core()?).await,
        Commands::Flags { command } => run_flags(command, &open_core()?),
        Commands::Config { command } => run_config(command),
        Commands::Screen { command } => run_screen(command, &open_core()?).await,
    }
}

fn open_core() -> Result<WardenCore> {
    let dispatcher = DispatcherManager::try_current().context("no tokio runtime")?;
    WardenCore::open(Config::load(), &dispatcher).context("failed to open database")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn run_route(command: RouteCommand) -> Result<()> {
    match command {
        RouteCommand::Encode {
            mode,
            id,
            cipher_type,
            folder,
            collection,
        } => {
            let mode = match (mode, id) {
                (ModeArg::Add, None) => VaultAddEditMode::AddItem,
                (ModeArg::Add, Some(_)) => bail!("--id is not used when adding an item"),
                (ModeArg::Edit, Some(item_id)) => VaultAddEditMode::EditItem { item_id },
                (ModeArg::CloneItem, Some(item_id)) => VaultAddEditMode::CloneItem { item_id },
                (_, None) => bail!("--id is required for edit and clone"),
            };
            let core = open_core()?;
            let cipher_type = match cipher_type {
                Some(token) => token.parse::<CipherType>()?,
                None => core.config().default_cipher_type,
            };
            let ssh_keys_enabled = core
                .debug_menu_repository()
                .feature_flag(FeatureFlag::SshKeyCipherItems);
            if !CipherType::available(ssh_keys_enabled).contains(&cipher_type) {
                bail!(
                    "{cipher_type} items are not enabled (feature flag {})",
                    FeatureFlag::SshKeyCipherItems.key()
                );
            }
            let mut args = VaultAddEditArgs::new(mode, cipher_type);
            args.selected_folder_id = folder;
            args.selected_collection_id = collection;
            println!("{}", args.to_route());
        }
        RouteCommand::Decode { route } => {
            let prefix = route.split(['/', '?']).next().unwrap_or_default();
            if prefix == ADD_EDIT_ITEM_PREFIX {
                let args = VaultAddEditArgs::from_route(&route)?;
                println!("destination: {ADD_EDIT_ITEM_PREFIX}");
                println!("mode: {}", args.mode.as_str());
                println!("item_id: {}", args.mode.item_id().unwrap_or(NONE));
                println!("cipher_type: {}", args.cipher_type);
                println!(
                    "folder_id: {}",
                    args.selected_folder_id.as_deref().unwrap_or(NONE)
                );
                println!(
                    "collection_id: {}",
                    args.selected_collection_id.as_deref().unwrap_or(NONE)
                );
            } else if prefix == ENTERPRISE_SIGN_ON_ROUTE.prefix() {
                let args = EnterpriseSignOnArgs::from_route(&route)?;
                println!("destination: {prefix}");
                println!("email_address: {}", args.email_address);
            } else if prefix == QR_CODE_SCAN_ROUTE.prefix() {
                QR_CODE_SCAN_ROUTE.match_route(&route)?;
                println!("destination: {prefix}");
            } else {
                bail!("unknown destination: {prefix}");
            }
        }
    }
    Ok(())
}

async fn run_settings(command: SettingsCommand, core: &WardenCore) -> Result<()> {
    let settings = core.settings_repository();
    match command {
        SettingsCommand::Show => {
            let theme = settings.app_theme();
            println!("theme: {}", theme.stored_value().unwrap_or("default"));
            println!(
                "screen_capture: {}",
                on_off(settings.is_screen_capture_allowed())
            );
            match settings.clipboard_clear_frequency().seconds() {
                Some(seconds) => println!("clipboard_clear: {seconds}s"),
                None => println!("clipboard_clear: never"),
            }
            let active_user = core.auth_disk_source().active_user_id();
            println!("active_user: {}", active_user.as_deref().unwrap_or(NONE));
            if active_user.is_some() {
                println!("vault_timeout: {}", settings.vault_timeout());
                println!(
                    "vault_timeout_action: {}",
                    settings.vault_timeout_action().as_str()
                );
                println!(
                    "biometric_unlock: {}",
                    on_off(settings.is_unlock_with_biometrics_enabled())
                );
            }
        }
        SettingsCommand::Theme { theme } => {
            let theme: AppTheme = theme.parse().map_err(|e: String| anyhow!(e))?;
            settings.set_app_theme(theme)?;
        }
        SettingsCommand::ScreenCapture { state } => {
            settings.set_screen_capture_allowed(state.enabled())?;
        }
        SettingsCommand::Clipboard { seconds } => {
            let frequency = if seconds == "never" {
                ClipboardClearFrequency::Never
            } else {
                let parsed = seconds
                    .parse::<i64>()
                    .with_context(|| format!("invalid duration: {seconds}"))?;
                let frequency = ClipboardClearFrequency::from_seconds(Some(parsed));
                if frequency.seconds() != Some(parsed) {
                    bail!("unsupported clipboard clear duration: {parsed}s");
                }
                frequency
            };
            settings.set_clipboard_clear_frequency(frequency)?;
        }
        SettingsCommand::VaultTimeout { timeout, action } => {
            let timeout: VaultTimeout = timeout.parse().map_err(|e: String| anyhow!(e))?;
            settings.set_vault_timeout(timeout)?;
            if let Some(action) = action {
                let action: VaultTimeoutAction = action.parse().map_err(|e: String| anyhow!(e))?;
                settings.set_vault_timeout_action(action)?;
            }
        }
        SettingsCommand::ActiveUser { user_id, clear } => {
            let auth = core.auth_disk_source();
            if clear {
                auth.store_active_user_id(None)?;
            } else if let Some(user_id) = user_id {
                auth.store_active_user_id(Some(&user_id))?;
            } else {
                println!("{}", auth.active_user_id().as_deref().unwrap_or(NONE));
            }
        }
        SettingsCommand::Biometrics { state } => {
            if state.enabled() {
                settings.setup_biometrics_key().await?;
            } else {
                settings.clear_biometrics_key()?;
            }
        }
        SettingsCommand::ForgetUser { user_id } => settings.clear_user_settings(&user_id)?,
    }
    Ok(())
}

fn run_flags(command: FlagsCommand, core: &WardenCore) -> Result<()> {
    let debug_menu = core.debug_menu_repository();
    match command {
        FlagsCommand::List => {
            if !debug_menu.is_debug_menu_enabled() {
                println!("# debug menu disabled, overrides are not applied");
            }
            for flag in FeatureFlag::ALL {
                let overridden = debug_menu
                    .feature_flag_override(flag)
                    .map(on_off)
                    .unwrap_or("-");
                println!(
                    "{:<40} {:<4} override={}",
                    flag.key(),
                    on_off(debug_menu.feature_flag(flag)),
                    overridden
                );
            }
            for key in debug_menu.overridden_keys()? {
                if key.parse::<FeatureFlag>().is_err() {
                    println!("{key:<40} -    override=stored (unknown flag)");
                }
            }
        }
        FlagsCommand::Set { key, state } => {
            let flag: FeatureFlag = key.parse().map_err(|e: String| anyhow!(e))?;
            debug_menu.update_feature_flag(flag, state.enabled())?;
            if !debug_menu.is_debug_menu_enabled() {
                eprintln!("note: the debug menu is disabled, so this override has no effect");
            }
        }
        FlagsCommand::Reset => debug_menu.reset_feature_flag_overrides()?,
        FlagsCommand::Clear => debug_menu.clear_feature_flag_overrides()?,
    }
    Ok(())
}

fn run_config(command: ConfigCommand) -> Result<()> {
    let path = util::config_path();
    match command {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Server { base_url } => save_server_base_url(&path, &base_url)?,
        ConfigCommand::DebugMenu { state } => save_debug_menu_enabled(&path, state.enabled())?,
    }
    Ok(())
}

async fn run_screen(command: ScreenCommand, core: &WardenCore) -> Result<()> {
    let mut navigator = Navigator::new(START_ROUTE);
    match command {
        ScreenCommand::QrScan => {
            navigator.navigate_to_qr_code_scan(NavOptions {
                launch_single_top: true,
                ..NavOptions::default()
            });
            let mut vm = QrCodeScanViewModel::new();
            match run_qr_code_scan(&mut vm).await? {
                QrCodeScanOutcome::Scanned(TotpCodeResult::Success(key)) => println!("{key}"),
                QrCodeScanOutcome::Scanned(TotpCodeResult::CodeScanningError) => {
                    bail!("not an authenticator key")
                }
                QrCodeScanOutcome::ManualEntry => {
                    eprintln!("Enter the key manually with your authenticator app.")
                }
                QrCodeScanOutcome::Closed => {}
            }
            navigator.pop_back_stack();
        }
        ScreenCommand::Sso { email } => {
            navigator.navigate_to_enterprise_sign_on(
                &EnterpriseSignOnArgs::new(email),
                NavOptions::default(),
            );
            let route = navigator.current_route().unwrap_or_default();
            let args = EnterpriseSignOnArgs::from_route(route)?;

            let config = core.config();
            let mut vm = EnterpriseSignOnViewModel::new(
                args.email_address,
                config.identity_url(),
                core.auth_disk_source().clone(),
            );
            let prevalidator = Arc::new(IdentityClient::new(config.identity_url()));
            run_sso(&mut vm, prevalidator).await?;
            navigator.pop_back_stack();
        }
    }
    Ok(())
}

async fn run_sso(vm: &mut EnterpriseSignOnViewModel, prevalidator: Arc<IdentityClient>) -> Result<()> {
    let uri = match run_enterprise_sign_on(vm, prevalidator).await? {
        None => return Ok(()),
        Some(EnterpriseSignOnEvent::NavigateToSsoLogin { uri }) => uri,
        Some(other) => bail!("unexpected screen event: {other:?}"),
    };

    println!("Open this URL in a browser to log in:\n\n{uri}\n");
    println!("Then paste the {SSO_CALLBACK_REDIRECT_URI} URL it redirects to:");
    let mut callback = String::new();
    std::io::stdin()
        .read_line(&mut callback)
        .context("failed to read callback URL")?;

    let update = vm.handle_action(EnterpriseSignOnAction::SsoCallbackResult(
        SsoCallbackResult::from_callback_uri(callback.trim()),
    ));
    if let Some(EnterpriseSignOnEvent::LoginWithSso {
        email,
        org_identifier,
        ..
    }) = update.events.into_iter().next()
    {
        println!("Authorization code received for {email} ({org_identifier}).");
        return Ok(());
    }
    match &vm.state().dialog {
        Some(EnterpriseSignOnDialog::Error { message, .. }) => bail!("{message}"),
        _ => bail!("single sign-on did not complete"),
    }
}
