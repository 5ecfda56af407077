pub mod errors;
pub mod context;
pub mod session;
pub mod config;
pub mod collaborators; // host-framework seams
pub mod sanitize;
pub mod branding;
pub mod telemetry;
mod builder;

pub use builder::{BootContextBuilder, PageMeta};
pub use context::RenderContext;
pub use errors::{BootError, BoxError, Result};
pub use sanitize::{decode_boot, encode_boot, strip_script_tags, BootPayload};
pub use session::Session;

/// Convenience: render into a fresh context.
pub fn render(builder: &BootContextBuilder, session: &Session) -> Result<RenderContext> {
    let mut context = RenderContext::new();
    builder.build(&mut context, session)?;
    Ok(context)
}
