//! Route parameter sources
//!
//! The codec never talks to a router. It only needs a name → string lookup,
//! which [`RouteParams`] provides.

use std::collections::HashMap;

/// Read-only lookup of query parameters by name
pub trait RouteParams {
    fn get(&self, name: &str) -> Option<String>;
}

impl RouteParams for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl<R: RouteParams + ?Sized> RouteParams for &R {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Query parameters held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string such as `?filter=%7B%7D&page=2`.
    ///
    /// A leading `?` is optional. `+` decodes to a space and malformed `%`
    /// escapes are kept as-is. When a name repeats, the first value wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = HashMap::new();

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Self { params }
    }

    /// Set (or replace) a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Drop a parameter, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    /// Set `name` to `value`, or drop it when `value` is `None`.
    ///
    /// Pairs with `PersistenceCodec::encode_for_url`, where `Ok(None)` means
    /// nothing should be persisted.
    pub fn set_or_remove(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(v) => self.insert(name, v),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Build a query string (without the leading `?`), names sorted
    pub fn to_query_string(&self) -> String {
        let mut names: Vec<&String> = self.params.keys().collect();
        names.sort();

        let mut query = form_urlencoded::Serializer::new(String::new());
        for name in names {
            query.append_pair(name, &self.params[name]);
        }
        query.finish()
    }
}

impl RouteParams for QueryParams {
    fn get(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Query parameters of the current page (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocationParams {
    search: web_sys::UrlSearchParams,
}

#[cfg(target_arch = "wasm32")]
impl LocationParams {
    /// Snapshot `window.location.search`. `None` without a window.
    pub fn current() -> Option<Self> {
        let query = web_sys::window()?.location().search().ok()?;
        let search = web_sys::UrlSearchParams::new_with_str(&query).ok()?;
        Some(Self { search })
    }
}

#[cfg(target_arch = "wasm32")]
impl RouteParams for LocationParams {
    fn get(&self, name: &str) -> Option<String> {
        self.search.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let params = QueryParams::parse("?page=2&sort=name");
        assert_eq!(params.get("page").as_deref(), Some("2"));
        assert_eq!(params.get("sort").as_deref(), Some("name"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_parse_percent_encoded_json() {
        let params = QueryParams::parse("filter=%7B%22a%22%3A123%7D");
        assert_eq!(params.get("filter").as_deref(), Some(r#"{"a":123}"#));
    }

    #[test]
    fn test_parse_plus_and_bad_escapes() {
        let params = QueryParams::parse("q=hello+world&bad=100%&worse=%zz");
        assert_eq!(params.get("q").as_deref(), Some("hello world"));
        assert_eq!(params.get("bad").as_deref(), Some("100%"));
        assert_eq!(params.get("worse").as_deref(), Some("%zz"));
    }

    #[test]
    fn test_parse_multibyte_utf8() {
        let params = QueryParams::parse("name=M%C3%BCller&city=%E6%9D%B1%E4%BA%AC&bad=%C3");
        assert_eq!(params.get("name").as_deref(), Some("Müller"));
        assert_eq!(params.get("city").as_deref(), Some("東京"));
        assert_eq!(params.get("bad").as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn test_query_string_encodes_utf8() {
        let params: QueryParams = [("q", "Müller & Söhne")].into_iter().collect();
        let query = params.to_query_string();
        assert_eq!(query, "q=M%C3%BCller+%26+S%C3%B6hne");
        assert_eq!(QueryParams::parse(&query), params);
    }

    #[test]
    fn test_parse_empty_and_repeated() {
        let params = QueryParams::parse("a=&b&a=second&&");
        assert_eq!(params.get("a").as_deref(), Some(""));
        assert_eq!(params.get("b").as_deref(), Some(""));
        assert_eq!(params.len(), 2);
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_query_string_survives_reparse() {
        let mut params = QueryParams::new();
        params.insert("filter", r#"{"name":"a b","tags":["x&y"]}"#);
        params.insert("page", "3");

        let query = params.to_query_string();
        assert!(query.starts_with("filter=%7B"));
        assert_eq!(QueryParams::parse(&query), params);
    }

    #[test]
    fn test_set_or_remove() {
        let mut params: QueryParams = [("filter", "{}")].into_iter().collect();
        params.set_or_remove("filter", None);
        assert_eq!(params.get("filter"), None);
        params.set_or_remove("filter", Some("[1]".to_string()));
        assert_eq!(params.get("filter").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_hashmap_is_route_params() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), "v".to_string());
        assert_eq!(RouteParams::get(&map, "k").as_deref(), Some("v"));
    }
}
