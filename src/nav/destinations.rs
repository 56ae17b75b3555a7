//! Arguments for the authentication-flow destinations

use super::pattern::{encode_argument, RoutePattern};
use super::{ArgBundle, NavError};

pub const QR_CODE_SCAN_ROUTE: RoutePattern = RoutePattern::new("qr_code_scan");

pub const EMAIL_ADDRESS: &str = "email_address";

pub const ENTERPRISE_SIGN_ON_ROUTE: RoutePattern =
    RoutePattern::new("enterprise_single_sign_on/{email_address}");

/// Arguments for the enterprise single sign-on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseSignOnArgs {
    pub email_address: String,
}

impl EnterpriseSignOnArgs {
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
        }
    }

    pub fn to_route(&self) -> String {
        format!(
            "{}/{}",
            ENTERPRISE_SIGN_ON_ROUTE.prefix(),
            encode_argument(&self.email_address)
        )
    }

    pub fn from_bundle(bundle: &ArgBundle) -> Result<Self, NavError> {
        Ok(Self::new(bundle.require(EMAIL_ADDRESS)?))
    }

    pub fn from_route(route: &str) -> Result<Self, NavError> {
        Self::from_bundle(&ENTERPRISE_SIGN_ON_ROUTE.match_route(route)?)
    }
}
