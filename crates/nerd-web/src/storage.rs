//! Browser Local Storage

use nerd_core::KvStore;

/// `KvStore` over `window.localStorage`
///
/// Fail-open: a missing or erroring storage backend reads as absent and
/// drops writes, so the controller never sees a storage error.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KvStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::backend() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::backend() {
            let _ = storage.remove_item(key);
        }
    }
}
