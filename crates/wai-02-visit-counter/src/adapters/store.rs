//! In-memory cookie table shared by the jar adapters.

use chrono::{DateTime, Duration, Utc};

use crate::domain::SetCookie;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredCookie {
    pub name: String,
    /// Still encoded.
    pub value: String,
    /// `None` for session cookies.
    pub expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(true, |expires| expires > now)
    }
}

/// Cookies in insertion order. Replacing a cookie keeps its position.
#[derive(Debug, Clone, Default)]
pub(crate) struct CookieTable {
    cookies: Vec<StoredCookie>,
}

impl CookieTable {
    /// Apply one `Set-Cookie` at `now`.
    pub fn apply(&mut self, cookie: SetCookie, now: DateTime<Utc>) {
        if cookie.is_deletion() {
            self.cookies.retain(|c| c.name != cookie.name);
            return;
        }
        let expires = cookie.max_age.map(|secs| now + Duration::seconds(secs));
        let stored = StoredCookie {
            name: cookie.name,
            value: cookie.value,
            expires,
        };
        match self.cookies.iter_mut().find(|c| c.name == stored.name) {
            Some(existing) => *existing = stored,
            None => self.cookies.push(stored),
        }
    }

    /// Drop expired entries.
    pub fn purge(&mut self, now: DateTime<Utc>) {
        self.cookies.retain(|c| c.is_live(now));
    }

    /// Live cookies as `a=1; b=2`.
    pub fn header(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|c| c.is_live(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// One cookie per line: `name<TAB>value<TAB>expiry-or-dash`.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for cookie in &self.cookies {
            let expires = cookie
                .expires
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());
            text.push_str(&format!("{}\t{}\t{}\n", cookie.name, cookie.value, expires));
        }
        text
    }

    /// Parse [`Self::to_text`] output. Lines that do not parse are skipped.
    pub fn from_text(text: &str) -> Self {
        let cookies = text
            .lines()
            .filter_map(|line| {
                let mut fields = line.split('\t');
                let name = fields.next().filter(|n| !n.is_empty())?;
                let value = fields.next()?;
                let expires = match fields.next()? {
                    "-" => None,
                    ts => Some(DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc)),
                };
                Some(StoredCookie {
                    name: name.to_string(),
                    value: value.to_string(),
                    expires,
                })
            })
            .collect();
        Self { cookies }
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }
}
