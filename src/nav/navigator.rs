//! In-memory back stack

use super::add_edit::VaultAddEditArgs;
use super::destinations::{EnterpriseSignOnArgs, QR_CODE_SCAN_ROUTE};

/// Pop entries before pushing a new destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopUpTo {
    /// Pop back to the most recent entry whose route starts with this
    pub route_prefix: String,
    /// Also pop the matched entry
    pub inclusive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Skip the push when the destination is already on top
    pub launch_single_top: bool,
    pub pop_up_to: Option<PopUpTo>,
}

/// Back stack of route strings. Never empty.
#[derive(Debug, Clone)]
pub struct Navigator {
    back_stack: Vec<String>,
}

impl Navigator {
    pub fn new(start_route: impl Into<String>) -> Self {
        Self {
            back_stack: vec![start_route.into()],
        }
    }

    pub fn current_route(&self) -> Option<&str> {
        self.back_stack.last().map(String::as_str)
    }

    pub fn back_stack(&self) -> &[String] {
        &self.back_stack
    }

    pub fn navigate(&mut self, route: impl Into<String>, options: NavOptions) {
        let route = route.into();

        if let Some(pop_up_to) = &options.pop_up_to {
            match self
                .back_stack
                .iter()
                .rposition(|entry| entry.starts_with(&pop_up_to.route_prefix))
            {
                Some(index) => {
                    let keep = if pop_up_to.inclusive { index } else { index + 1 };
                    self.back_stack.truncate(keep);
                }
                None => {
                    tracing::debug!(
                        prefix = %pop_up_to.route_prefix,
                        "popUpTo destination not on back stack"
                    );
                }
            }
        }

        if options.launch_single_top && self.current_route() == Some(route.as_str()) {
            tracing::debug!(route = %route, "Destination already on top");
            return;
        }

        tracing::debug!(route = %route, depth = self.back_stack.len(), "Navigating");
        self.back_stack.push(route);
    }

    /// Pop the top entry. The start destination is never popped.
    pub fn pop_back_stack(&mut self) -> bool {
        if self.back_stack.len() > 1 {
            self.back_stack.pop();
            true
        } else {
            false
        }
    }

    pub fn navigate_to_vault_add_edit(&mut self, args: &VaultAddEditArgs, options: NavOptions) {
        self.navigate(args.to_route(), options);
    }

    pub fn navigate_to_qr_code_scan(&mut self, options: NavOptions) {
        self.navigate(QR_CODE_SCAN_ROUTE.as_str(), options);
    }

    pub fn navigate_to_enterprise_sign_on(&mut self, args: &EnterpriseSignOnArgs, options: NavOptions) {
        self.navigate(args.to_route(), options);
    }
}
