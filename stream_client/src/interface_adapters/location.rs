use std::sync::Mutex;
use url::Url;

use crate::domain::TokenLocation;

pub const TOKEN_QUERY_PARAM: &str = "token";

// Page address holding the connection token as `?token=...`, so a reload
// lands back on the reconnect prompt.
pub struct UrlTokenLocation {
    url: Mutex<Url>,
}

impl UrlTokenLocation {
    pub fn new(url: Url) -> Self {
        Self {
            url: Mutex::new(url),
        }
    }

    pub fn parse(address: &str) -> Result<Self, url::ParseError> {
        Url::parse(address).map(Self::new)
    }

    pub fn current(&self) -> Url {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Url> {
        // A poisoned address is still a valid Url.
        self.url.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenLocation for UrlTokenLocation {
    fn token(&self) -> Option<String> {
        self.lock()
            .query_pairs()
            .find(|(key, _)| key == TOKEN_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    fn persist_token(&self, token: &str) {
        let mut url = self.lock();
        let others: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != TOKEN_QUERY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(others)
            .append_pair(TOKEN_QUERY_PARAM, token);
    }

    // Drops the whole query and fragment, leaving the bare page address.
    fn clear_token(&self) {
        let mut url = self.lock();
        url.set_query(None);
        url.set_fragment(None);
    }
}
