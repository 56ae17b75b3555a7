//! Vault item domain types shared by navigation and screens

mod cipher_type;

pub use cipher_type::{CipherType, UnknownCipherType};
