//! Arguments for the add/edit vault item destination
//!
//! Route format:
//!
//! ```text
//! vault_add_edit_item/{mode}?vault_edit_id={id}?vault_item_type={type}?vault_add_selected_folder_id={folder}?vault_add_selected_collection_id={collection}
//! ```
//!
//! Unset optional values are written as the literal `null`. Mode and cipher
//! type tokens only exist at this boundary; everything else works with
//! [`VaultAddEditMode`] and [`CipherType`].

use super::pattern::{encode_argument, RoutePattern, NULL_ARGUMENT};
use super::{ArgBundle, NavError};
use crate::vault::CipherType;

pub const ADD_EDIT_ITEM_PREFIX: &str = "vault_add_edit_item";
pub const ADD_EDIT_ITEM_TYPE: &str = "vault_add_edit_type";
pub const EDIT_ITEM_ID: &str = "vault_edit_id";
pub const ITEM_TYPE: &str = "vault_item_type";
pub const SELECTED_FOLDER_ID: &str = "vault_add_selected_folder_id";
pub const SELECTED_COLLECTION_ID: &str = "vault_add_selected_collection_id";

const ADD: &str = "add";
const EDIT: &str = "edit";
const CLONE: &str = "clone";

pub const VAULT_ADD_EDIT_ROUTE: RoutePattern = RoutePattern::new(
    "vault_add_edit_item/{vault_add_edit_type}\
     ?vault_edit_id={vault_edit_id}\
     ?vault_item_type={vault_item_type}\
     ?vault_add_selected_folder_id={vault_add_selected_folder_id}\
     ?vault_add_selected_collection_id={vault_add_selected_collection_id}",
);

/// What the add/edit screen is opened for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VaultAddEditMode {
    AddItem,
    EditItem { item_id: String },
    CloneItem { item_id: String },
}

impl VaultAddEditMode {
    /// Path token for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultAddEditMode::AddItem => ADD,
            VaultAddEditMode::EditItem { .. } => EDIT,
            VaultAddEditMode::CloneItem { .. } => CLONE,
        }
    }

    /// Present exactly for edit and clone
    pub fn item_id(&self) -> Option<&str> {
        match self {
            VaultAddEditMode::AddItem => None,
            VaultAddEditMode::EditItem { item_id } | VaultAddEditMode::CloneItem { item_id } => {
                Some(item_id)
            }
        }
    }
}

/// Typed navigation request for the add/edit screen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultAddEditArgs {
    pub mode: VaultAddEditMode,
    pub cipher_type: CipherType,
    pub selected_folder_id: Option<String>,
    pub selected_collection_id: Option<String>,
}

impl VaultAddEditArgs {
    pub fn new(mode: VaultAddEditMode, cipher_type: CipherType) -> Self {
        Self {
            mode,
            cipher_type,
            selected_folder_id: None,
            selected_collection_id: None,
        }
    }

    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.selected_folder_id = Some(folder_id.into());
        self
    }

    pub fn with_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.selected_collection_id = Some(collection_id.into());
        self
    }

    /// Encode into a route string; ids are percent-encoded
    pub fn to_route(&self) -> String {
        let or_null = |value: Option<&str>| match value {
            Some(value) => encode_argument(value).into_owned(),
            None => NULL_ARGUMENT.to_string(),
        };
        format!(
            "{ADD_EDIT_ITEM_PREFIX}/{mode}\
             ?{EDIT_ITEM_ID}={id}\
             ?{ITEM_TYPE}={cipher_type}\
             ?{SELECTED_FOLDER_ID}={folder}\
             ?{SELECTED_COLLECTION_ID}={collection}",
            mode = self.mode.as_str(),
            id = or_null(self.mode.item_id()),
            cipher_type = self.cipher_type.as_str(),
            folder = or_null(self.selected_folder_id.as_deref()),
            collection = or_null(self.selected_collection_id.as_deref()),
        )
    }

    /// Decode from received arguments
    pub fn from_bundle(bundle: &ArgBundle) -> Result<Self, NavError> {
        let mode = match bundle.require(ADD_EDIT_ITEM_TYPE)? {
            ADD => VaultAddEditMode::AddItem,
            EDIT => VaultAddEditMode::EditItem {
                item_id: bundle.require(EDIT_ITEM_ID)?.to_string(),
            },
            CLONE => VaultAddEditMode::CloneItem {
                item_id: bundle.require(EDIT_ITEM_ID)?.to_string(),
            },
            other => {
                return Err(NavError::UnrecognizedDiscriminator {
                    kind: "vault add/edit mode",
                    value: other.to_string(),
                })
            }
        };

        let cipher_type = bundle
            .require(ITEM_TYPE)?
            .parse::<CipherType>()
            .map_err(|e| NavError::UnrecognizedDiscriminator {
                kind: "cipher type",
                value: e.0,
            })?;

        Ok(Self {
            mode,
            cipher_type,
            selected_folder_id: bundle.get(SELECTED_FOLDER_ID).map(str::to_string),
            selected_collection_id: bundle.get(SELECTED_COLLECTION_ID).map(str::to_string),
        })
    }

    /// Match a received route and decode it
    pub fn from_route(route: &str) -> Result<Self, NavError> {
        Self::from_bundle(&VAULT_ADD_EDIT_ROUTE.match_route(route)?)
    }
}
