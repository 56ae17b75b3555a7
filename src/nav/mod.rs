//! Navigation routes and their argument codecs
//!
//! Destinations are addressed by flat route strings. Each destination owns a
//! [`RoutePattern`] and a typed argument struct that encodes to, and decodes
//! from, that pattern.

mod add_edit;
mod bundle;
mod destinations;
mod error;
mod navigator;
mod pattern;

pub use add_edit::{
    VaultAddEditArgs, VaultAddEditMode, ADD_EDIT_ITEM_PREFIX, ADD_EDIT_ITEM_TYPE, EDIT_ITEM_ID,
    ITEM_TYPE, SELECTED_COLLECTION_ID, SELECTED_FOLDER_ID, VAULT_ADD_EDIT_ROUTE,
};
pub use bundle::ArgBundle;
pub use destinations::{
    EnterpriseSignOnArgs, EMAIL_ADDRESS, ENTERPRISE_SIGN_ON_ROUTE, QR_CODE_SCAN_ROUTE,
};
pub use error::NavError;
pub use navigator::{NavOptions, Navigator, PopUpTo};
pub use pattern::{encode_argument, RoutePattern, NULL_ARGUMENT};
