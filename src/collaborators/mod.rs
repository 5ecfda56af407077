use serde_json::Value;

use crate::errors::BoxError;
use crate::sanitize::BootPayload;
use crate::session::Session;

/// Session, CSRF and transaction services owned by the host framework.
pub trait SessionService: Send + Sync {
    /// Existing CSRF token for the session, or a freshly issued one.
    fn csrf_token(&self, session: &Session) -> String;
    /// Flush pending transactional state to the shared store.
    fn commit(&self) -> Result<(), BoxError>;
    /// Full boot snapshot for an authenticated user.
    fn boot(&self, session: &Session) -> Result<BootPayload, BoxError>;
}

/// Website- and system-level settings.
pub trait SiteSettings: Send + Sync {
    /// Public, site-level boot metadata served to guests.
    fn guest_boot_data(&self) -> BootPayload;
    fn website_setting(&self, key: &str) -> Option<Value>;
    fn system_setting(&self, key: &str) -> Option<Value>;
}

/// Analytics sink. Implementations must not block the caller.
pub trait TelemetrySink: Send + Sync {
    fn capture(&self, event: &str, app: &str);
}

pub mod builtins {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde::Deserialize;
    use serde_json::Map;

    use crate::errors::{BootError, Result};
    use crate::telemetry::TelemetryEvent;

    /// Site described by a JSON fixture; serves both sessions and settings.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct FixtureSite {
        pub csrf_token: String,
        pub boot: BootPayload,
        /// When set, authenticated boot fails with this message.
        pub boot_error: Option<String>,
        pub guest_boot: BootPayload,
        pub website_settings: Map<String, Value>,
        pub system_settings: Map<String, Value>,
        #[serde(skip)]
        commits: AtomicUsize,
        #[serde(skip)]
        boot_calls: AtomicUsize,
    }

    impl FixtureSite {
        pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let display = path.display().to_string();
            let raw = fs::read_to_string(path).map_err(|source| BootError::ConfigRead {
                path: display.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| BootError::ConfigParse {
                path: display,
                source,
            })
        }

        pub fn with_boot(mut self, boot: BootPayload) -> Self {
            self.boot = boot;
            self
        }

        pub fn with_boot_error(mut self, message: impl Into<String>) -> Self {
            self.boot_error = Some(message.into());
            self
        }

        pub fn with_website_setting(mut self, key: impl Into<String>, value: Value) -> Self {
            self.website_settings.insert(key.into(), value);
            self
        }

        pub fn with_system_setting(mut self, key: impl Into<String>, value: Value) -> Self {
            self.system_settings.insert(key.into(), value);
            self
        }

        pub fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn boot_calls(&self) -> usize {
            self.boot_calls.load(Ordering::SeqCst)
        }
    }

    impl SessionService for FixtureSite {
        fn csrf_token(&self, _session: &Session) -> String {
            self.csrf_token.clone()
        }

        fn commit(&self) -> std::result::Result<(), BoxError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn boot(&self, _session: &Session) -> std::result::Result<BootPayload, BoxError> {
            self.boot_calls.fetch_add(1, Ordering::SeqCst);
            match &self.boot_error {
                Some(msg) => Err(msg.clone().into()),
                None => Ok(self.boot.clone()),
            }
        }
    }

    impl SiteSettings for FixtureSite {
        fn guest_boot_data(&self) -> BootPayload {
            self.guest_boot.clone()
        }

        fn website_setting(&self, key: &str) -> Option<Value> {
            self.website_settings.get(key).cloned()
        }

        fn system_setting(&self, key: &str) -> Option<Value> {
            self.system_settings.get(key).cloned()
        }
    }

    /// Emits each capture as a tracing event.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LogSink;

    impl TelemetrySink for LogSink {
        fn capture(&self, event: &str, app: &str) {
            tracing::info!(target: "raven_mobile_boot::telemetry", event, app, "capture");
        }
    }

    /// Keeps every captured event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn capture(&self, event: &str, app: &str) {
            if let Ok(mut events) = self.events.lock() {
                events.push(TelemetryEvent::new(event, app));
            }
        }
    }
}
