use std::fmt;

use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Bytes left alone by form encoding. Spaces are kept here and turned into
/// `+` afterwards.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b' ');

/// Form-encode a single key or value (`application/x-www-form-urlencoded`).
#[must_use]
pub fn form_encode(value: &str) -> String {
    utf8_percent_encode(value, FORM_ENCODE_SET)
        .to_string()
        .replace(' ', "+")
}

/// Decode a single form-encoded key or value. Invalid UTF-8 is replaced.
#[must_use]
pub fn form_decode(value: &str) -> String {
    percent_decode_str(&value.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Ordered multi-value mapping of query parameters.
///
/// Keys keep the position of their first insertion; each key holds every
/// value it was given, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDict {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryDict {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut dict = Self::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            dict.append(form_decode(key), form_decode(value));
        }
        dict
    }

    /// Last value given for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_list(key).last().map(String::as_str)
    }

    #[must_use]
    pub fn get_list(&self, key: &str) -> &[String] {
        match self.position(key) {
            Some(idx) => &self.entries[idx].1,
            None => &[],
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// Replace every value of `key` with `value`. A new key goes last.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = vec![value.into()],
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// Drop `key` and all of its values, returning them.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Every `(key, value)` pair, grouped by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key.as_str(), value.as_str())))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back into `key=value&key=value` form.
    #[must_use]
    pub fn urlencode(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl fmt::Display for QueryDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.urlencode())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryDict
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.append(key, value);
        }
        dict
    }
}
