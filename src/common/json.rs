//! Deterministic JSON rendering for output artefacts.
//!
//! Values go through `serde_json::Value` first so object keys come out
//! sorted, then get printed with four-space indentation.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render `value` as pretty JSON with sorted keys and a trailing newline.
pub fn to_sorted_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let tree = serde_json::to_value(value)?;
    let mut out = Vec::with_capacity(256);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    tree.serialize(&mut ser)?;
    out.push(b'\n');
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
