/// Live refresh scheduler
///
/// A global token that moves forward on every tick. Snapshot URLs carry it
/// as `t=<token>`, so each tick gives every card a URL it has never fetched.
/// The timer itself is an iced subscription owned by the application;
/// dropping the subscription stops it.

use chrono::{DateTime, Local, Utc};
use url::Url;

/// Query parameter carrying the cache-bust token
pub const CACHE_BUST_PARAM: &str = "t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken {
    value: i64,
    refreshed_at: DateTime<Local>,
}

impl RefreshToken {
    /// A token for the current wall-clock time
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            value: now.timestamp_millis(),
            refreshed_at: now.with_timezone(&Local),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// When the last tick happened (local time, for the header)
    pub fn refreshed_at(&self) -> DateTime<Local> {
        self.refreshed_at
    }

    /// Move to the current time. Always strictly increases, even if the
    /// clock stepped backwards.
    pub fn tick(&mut self) -> i64 {
        let now = Utc::now();
        self.refreshed_at = now.with_timezone(&Local);
        self.advance(now.timestamp_millis())
    }

    /// Move to `now_millis`, or one past the previous value if that is later
    pub fn advance(&mut self, now_millis: i64) -> i64 {
        self.value = now_millis.max(self.value + 1);
        self.value
    }
}

/// Append the cache-bust token to a snapshot URL.
/// An existing `t` parameter is replaced; other parameters are kept.
pub fn cache_busted(image_url: &str, token: i64) -> String {
    match Url::parse(image_url) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| key != CACHE_BUST_PARAM)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            {
                let mut pairs = url.query_pairs_mut();
                pairs.clear();
                for (key, value) in &kept {
                    pairs.append_pair(key, value);
                }
                pairs.append_pair(CACHE_BUST_PARAM, &token.to_string());
            }
            url.to_string()
        }
        // Not an absolute URL; let the download report the problem
        Err(_) => {
            let separator = if image_url.contains('?') { '&' } else { '?' };
            format!("{}{}{}={}", image_url, separator, CACHE_BUST_PARAM, token)
        }
    }
}
