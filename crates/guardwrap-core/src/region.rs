//! Marker-bounded region wrapping.
//!
//! A region runs from the first start-marker match to the nearest end-marker
//! match after it. Wrapping splices the guard element around that span:
//!
//! ```text
//! <indent><Guard key="k">\n<span bytes>\n<indent></Guard>
//! ```
//!
//! The opening tag lands outside the span, so "already wrapped" is decided by
//! looking inside the span for any guard, and right before it for this key's
//! opening tag.

use crate::config::GuardSettings;
use crate::error::WrapError;
use crate::mapping::PermissionKey;
use crate::marker::{locate, Marker, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapOutcome {
    Wrapped,
    AlreadyWrapped,
}

/// Wrap the first start/end region of `doc` in a guard for `key`, unless it
/// is already guarded.
pub fn wrap_region(
    doc: &str,
    start: &Marker,
    end: &Marker,
    key: &PermissionKey,
    guard: &GuardSettings,
) -> Result<(String, WrapOutcome), WrapError> {
    let span = locate(doc, start, end).ok_or_else(|| WrapError::RegionNotFound {
        key: key.to_string(),
        start: start.as_str().to_string(),
        end: end.as_str().to_string(),
    })?;

    if is_wrapped(doc, span, key, guard) {
        tracing::debug!(%key, start = span.start, end = span.end, "region already wrapped");
        return Ok((doc.to_string(), WrapOutcome::AlreadyWrapped));
    }

    let wrapped = format!(
        "{indent}{open}\n{body}\n{indent}{close}",
        indent = guard.indent,
        open = guard.open_tag(key.as_str()),
        body = span.text(doc),
        close = guard.close_tag(),
    );
    tracing::debug!(%key, start = span.start, end = span.end, "wrapping region");
    Ok((span.splice(doc, &wrapped), WrapOutcome::Wrapped))
}

fn is_wrapped(doc: &str, span: Span, key: &PermissionKey, guard: &GuardSettings) -> bool {
    span.text(doc).contains(&guard.open_tag_prefix())
        || follows_open_tag(&doc[..span.start], &guard.open_tag(key.as_str()))
}

/// `text`, minus trailing whitespace, ends in exactly `open`.
fn follows_open_tag(text: &str, open: &str) -> bool {
    text.trim_end().ends_with(open)
}
