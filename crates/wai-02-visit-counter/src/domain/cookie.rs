//! Cookie codec: component encoding, header lookup and `Set-Cookie` lines.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::VisitError;

/// Cookie holding the visit record.
pub const COOKIE_NAME: &str = "whoami_visit";

/// One year.
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// Characters left alone by URI component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a cookie value the way URI components are encoded.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Reverse of [`encode_component`].
pub fn decode_component(value: &str) -> Result<String, VisitError> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| VisitError::Decode(e.to_string()))
}

/// Raw value of `name` in a `a=1; b=2` header.
///
/// Matches only at the start of the header or right after `"; "`, and takes
/// everything up to the next `;`.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=", name);
    header
        .match_indices(&needle)
        .find(|(idx, _)| *idx == 0 || header[..*idx].ends_with("; "))
        .map(|(idx, _)| {
            let rest = &header[idx + needle.len()..];
            rest.split(';').next().unwrap_or_default()
        })
}

/// A parsed `Set-Cookie` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    /// Still encoded.
    pub value: String,
    pub path: Option<String>,
    /// Seconds; zero or negative deletes the cookie.
    pub max_age: Option<i64>,
    pub same_site: Option<String>,
}

impl SetCookie {
    /// A persistent cookie with the given encoded value.
    pub fn persistent(name: &str, value: &str, max_age_secs: i64) -> Self {
        Self {
            name: name.to_string(),
            value: encode_component(value),
            path: Some("/".to_string()),
            max_age: Some(max_age_secs),
            same_site: Some("Lax".to_string()),
        }
    }

    /// Parse `name=value; attr=x; ...`. Unknown attributes are ignored.
    pub fn parse(line: &str) -> Result<Self, VisitError> {
        let mut parts = line.split(';').map(str::trim);
        let pair = parts.next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| VisitError::MalformedCookie(line.to_string()))?;
        if name.is_empty() {
            return Err(VisitError::MalformedCookie(line.to_string()));
        }

        let mut cookie = Self {
            name: name.to_string(),
            value: value.to_string(),
            path: None,
            max_age: None,
            same_site: None,
        };

        for attribute in parts {
            let (key, val) = attribute.split_once('=').unwrap_or((attribute, ""));
            match key.to_ascii_lowercase().as_str() {
                "path" => cookie.path = Some(val.to_string()),
                "max-age" => {
                    let secs = val
                        .parse()
                        .map_err(|_| VisitError::MalformedCookie(line.to_string()))?;
                    cookie.max_age = Some(secs);
                }
                "samesite" => cookie.same_site = Some(val.to_string()),
                _ => {}
            }
        }
        Ok(cookie)
    }

    /// Render as a `Set-Cookie` line.
    pub fn to_line(&self) -> String {
        let mut line = format!("{}={}", self.name, self.value);
        if let Some(path) = &self.path {
            line.push_str(&format!("; path={}", path));
        }
        if let Some(max_age) = self.max_age {
            line.push_str(&format!("; max-age={}", max_age));
        }
        if let Some(same_site) = &self.same_site {
            line.push_str(&format!("; samesite={}", same_site));
        }
        line
    }

    /// Whether writing this cookie removes it.
    pub fn is_deletion(&self) -> bool {
        matches!(self.max_age, Some(secs) if secs <= 0)
    }
}
