//! Session storage adapters.

#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;
mod local_session_store;

#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringTokenStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringTokenStorage;
pub use local_session_store::{
    ACCESS_TOKEN_KEY, LocalSessionStore, USER_AVATAR_KEY, USER_EMAIL_KEY, USER_NAME_KEY,
};
