//! Script-tag stripping for JSON that gets embedded in an HTML `<script>` block.
//!
//! This is a textual filter, not an HTML parser. It only guards against the
//! `</script>` breakout vector and has known gaps:
//! - matching is case-sensitive, so `</SCRIPT>` passes through;
//! - only the exact `</script>` form is removed; `</script ` and `</script/`
//!   also end a script element in HTML and are left alone;
//! - a `<script ... </script>` span may cross JSON string boundaries, in which
//!   case removing it can leave the document structurally invalid.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::Result;

/// Boot payload as built by the session service or site settings.
pub type BootPayload = Map<String, Value>;

// Open tag through the first close tag, with no `<` in between.
static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<script[^<]*</script>").expect("valid regex"));
static CLOSING_SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</script>").expect("valid regex"));

/// Remove complete `<script>...</script>` spans, then any leftover `</script>`.
///
/// The second pass runs until nothing matches: removing one closing tag can
/// splice a new one together (`</</script>script>`).
pub fn strip_script_tags(text: &str) -> String {
    let mut out = SCRIPT_TAG.replace_all(text, "").into_owned();
    while CLOSING_SCRIPT_TAG.is_match(&out) {
        out = CLOSING_SCRIPT_TAG.replace_all(&out, "").into_owned();
    }
    out
}

/// Compact JSON (no whitespace, sorted keys).
pub fn to_compact_json(payload: &BootPayload) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// Serialize, sanitize, then wrap the result in a JSON string literal.
///
/// The client decodes the string and parses it again at runtime.
pub fn encode_boot(payload: &BootPayload) -> Result<String> {
    let compact = to_compact_json(payload)?;
    let sanitized = strip_script_tags(&compact);
    Ok(serde_json::to_string(&sanitized)?)
}

/// Inverse of [`encode_boot`], as the client performs it.
pub fn decode_boot(encoded: &str) -> Result<BootPayload> {
    let inner: String = serde_json::from_str(encoded)?;
    Ok(serde_json::from_str(&inner)?)
}
