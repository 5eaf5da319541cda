use portfolio_core::{SessionStore, StorageError};
use web_sys as web;

/// `window.sessionStorage`. Private browsing modes may deny access; the store
/// then reads as empty and rejects writes, so the intro plays every visit.
pub struct BrowserSessionStore {
    storage: Option<web::Storage>,
}

impl BrowserSessionStore {
    pub fn new(window: &web::Window) -> Self {
        let storage = match window.session_storage() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[typing] sessionStorage unavailable: {:?}", e);
                None
            }
        };
        Self { storage }
    }
}

impl SessionStore for BrowserSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}
