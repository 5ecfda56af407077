use serde_json::Value;

use crate::collaborators::SiteSettings;

/// Title shown when no site-specific branding is configured.
pub const APP_TITLE: &str = "Raven";
/// Name the host framework ships with; an override equal to it is ignored.
pub const FRAMEWORK_NAME: &str = "Frappe";
/// Settings key looked up in website settings, then system settings.
pub const APP_NAME_SETTING: &str = "app_name";

/// Website setting first, system setting second. Empty or non-string values
/// count as unset.
pub fn resolve_app_name(settings: &dyn SiteSettings) -> String {
    let override_name = non_empty(settings.website_setting(APP_NAME_SETTING))
        .or_else(|| non_empty(settings.system_setting(APP_NAME_SETTING)));
    app_title(override_name.as_deref())
}

pub fn app_title(override_name: Option<&str>) -> String {
    match override_name {
        Some(name) if name != FRAMEWORK_NAME => format!("{name} | {APP_TITLE}"),
        _ => APP_TITLE.to_string(),
    }
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
