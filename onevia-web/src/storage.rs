//! `localStorage` persistence with an optional cookie mirror.
use onevia_core::{ClientStorage, SiteConfig, cookie};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, Storage};

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum BrowserStorageError {
    #[error("Storage error: {0}")]
    Local(String),
    #[error("Cookie error: {0}")]
    Cookie(String),
    #[error("No client storage is available")]
    Unavailable,
}

/// Reads prefer `localStorage` and fall back to the cookie mirror; writes go
/// to both when mirroring is enabled.
#[derive(Clone)]
pub struct BrowserStorage {
    local: Option<Storage>,
    cookies: Option<HtmlDocument>,
    cookie_max_age_secs: u64,
}

impl BrowserStorage {
    #[must_use]
    pub fn new(document: &Document, config: &SiteConfig) -> Self {
        let local = dom::window().and_then(|win| win.local_storage().ok().flatten());
        if local.is_none() {
            log::warn!("localStorage unavailable");
        }
        let cookies = if config.mirror_to_cookie {
            document.clone().dyn_into::<HtmlDocument>().ok()
        } else {
            None
        };
        Self {
            local,
            cookies,
            cookie_max_age_secs: config.cookie_max_age_secs,
        }
    }

    fn read_local(&self, key: &str) -> Result<Option<String>, BrowserStorageError> {
        let Some(local) = &self.local else {
            return Ok(None);
        };
        local
            .get_item(key)
            .map_err(|e| BrowserStorageError::Local(dom::js_error_message(&e)))
    }

    fn read_cookie(&self, key: &str) -> Result<Option<String>, BrowserStorageError> {
        let Some(doc) = &self.cookies else {
            return Ok(None);
        };
        let jar = doc
            .cookie()
            .map_err(|e| BrowserStorageError::Cookie(dom::js_error_message(&e)))?;
        Ok(cookie::find_cookie(&jar, key))
    }
}

impl ClientStorage for BrowserStorage {
    type Error = BrowserStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let local = match self.read_local(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) if self.cookies.is_some() => {
                log::warn!("{err}; trying cookie");
                None
            }
            Err(err) => return Err(err),
        };
        match local {
            Some(value) => Ok(Some(value)),
            None => self.read_cookie(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.local.is_none() && self.cookies.is_none() {
            return Err(BrowserStorageError::Unavailable);
        }
        if let Some(local) = &self.local {
            local
                .set_item(key, value)
                .map_err(|e| BrowserStorageError::Local(dom::js_error_message(&e)))?;
        }
        if let Some(doc) = &self.cookies {
            doc.set_cookie(&cookie::set_cookie_string(
                key,
                value,
                self.cookie_max_age_secs,
            ))
            .map_err(|e| BrowserStorageError::Cookie(dom::js_error_message(&e)))?;
        }
        Ok(())
    }
}
