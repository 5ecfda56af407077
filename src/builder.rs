use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::branding;
use crate::collaborators::{SessionService, SiteSettings, TelemetrySink};
use crate::config::{SiteConfig, PUSH_RELAY_SERVER_URL};
use crate::context::{keys, RenderContext};
use crate::errors::{BootError, Result};
use crate::sanitize;
use crate::session::Session;
use crate::telemetry::{ACTIVE_SITE_MOBILE, RAVEN_APP};

/// Routing metadata for the page this builder renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub route: &'static str,
    /// The output embeds a per-session CSRF token and must never be cached.
    pub no_cache: bool,
}

/// Builds the template context for the mobile client's boot page.
///
/// Cheap to clone and safe to share across request threads.
#[derive(Clone)]
pub struct BootContextBuilder {
    sessions: Arc<dyn SessionService>,
    settings: Arc<dyn SiteSettings>,
    config: Arc<SiteConfig>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl BootContextBuilder {
    pub const PAGE: PageMeta = PageMeta {
        route: "raven_mobile",
        no_cache: true,
    };

    pub fn new(
        sessions: Arc<dyn SessionService>,
        settings: Arc<dyn SiteSettings>,
        config: Arc<SiteConfig>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            sessions,
            settings,
            config,
            telemetry,
        }
    }

    /// Populate `build_version`, `boot`, `csrf_token` and `app_name`.
    ///
    /// The CSRF token is committed before anything else and stays committed
    /// even when a later step fails, so a failed authenticated boot still
    /// leaves a durable token behind. On error no context key is written.
    #[instrument(skip_all, fields(user = session.user()))]
    pub fn build<'c>(
        &self,
        context: &'c mut RenderContext,
        session: &Session,
    ) -> Result<&'c mut RenderContext> {
        let csrf_token = self.sessions.csrf_token(session);
        self.sessions.commit().map_err(BootError::Commit)?;

        let mut boot = if session.is_guest() {
            self.settings.guest_boot_data()
        } else {
            self.sessions.boot(session).map_err(|cause| {
                warn!(error = %cause, "session boot failed");
                BootError::SessionBootFailed(cause)
            })?
        };

        let relay = self
            .config
            .get(PUSH_RELAY_SERVER_URL)
            .cloned()
            .unwrap_or(Value::Null);
        boot.insert(PUSH_RELAY_SERVER_URL.to_string(), relay);

        let encoded = sanitize::encode_boot(&boot)?;

        context.update([
            (keys::BUILD_VERSION, Value::from(self.config.build_version())),
            (keys::BOOT, Value::from(encoded)),
            (keys::CSRF_TOKEN, Value::from(csrf_token)),
        ]);
        context.insert(keys::APP_NAME, branding::resolve_app_name(self.settings.as_ref()));

        if !session.is_guest() {
            self.telemetry.capture(ACTIVE_SITE_MOBILE, RAVEN_APP);
        }

        debug!(boot_keys = boot.len(), "boot context rendered");
        Ok(context)
    }
}
