use serde::Serialize;
use serde_json::{Map, Value};

/// Keys this crate writes into the rendering context.
pub mod keys {
    pub const BUILD_VERSION: &str = "build_version";
    pub const BOOT: &str = "boot";
    pub const CSRF_TOKEN: &str = "csrf_token";
    pub const APP_NAME: &str = "app_name";
}

/// Key/value bag handed to the page template.
///
/// The host pipeline creates one per request; the builder only adds keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Merge several entries at once, overwriting existing keys.
    pub fn update<K, I>(&mut self, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.values
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn update_overwrites_and_keeps_existing() {
        let mut ctx = RenderContext::new();
        ctx.insert("title", "Raven");
        ctx.insert(keys::BOOT, "old");
        ctx.update([(keys::BOOT, json!("new")), (keys::CSRF_TOKEN, json!("t"))]);

        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.get_str("title"), Some("Raven"));
        assert_eq!(ctx.get_str(keys::BOOT), Some("new"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut ctx = RenderContext::new();
        ctx.insert(keys::APP_NAME, "Raven");
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({"app_name": "Raven"}));
    }
}
