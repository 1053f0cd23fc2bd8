//! Parsing and canonical serialization of definitions and the index.
//!
//! Parsing is two-stage so the caller can tell the failure tiers apart:
//! malformed bytes ([`ParseError::MalformedSyntax`]) versus well-formed JSON
//! that does not fit the schema ([`ParseError::SchemaMismatch`]). The split
//! matters because the two map to different exit codes, and because a
//! schema mismatch is forgiven for inputs not named `*.json`.
//!
//! Canonical output is deterministic: four-space indentation, record fields
//! in declaration order, map keys in natural string order, zero-valued
//! optional fields absent, `&` `<` `>` literal, one trailing newline.
//! Serializing a parsed document is idempotent by construction.

use crate::error::ParseError;
use crate::models::index::Index;
use crate::models::rockon::RockOn;
use serde::Serialize;
use serde_json::Value as Json;

/// Indentation unit used for all canonical output.
pub const INDENT: &str = "    ";

/// Parse raw bytes into a definition document.
pub fn parse(raw: &str) -> Result<RockOn, ParseError> {
    let value: Json = serde_json::from_str(raw).map_err(ParseError::MalformedSyntax)?;
    from_value(value)
}

/// Schema stage of [`parse`], for callers that already hold a JSON value.
pub fn from_value(value: Json) -> Result<RockOn, ParseError> {
    let doc: RockOn =
        serde_json::from_value(value).map_err(|e| ParseError::SchemaMismatch(e.to_string()))?;
    if doc.0.len() != 1 {
        return Err(ParseError::SchemaMismatch(format!(
            "expected exactly one top-level entry, found {}",
            doc.0.len()
        )));
    }
    Ok(doc)
}

/// Parse raw bytes into the name index.
pub fn parse_index(raw: &str) -> Result<Index, ParseError> {
    let value: Json = serde_json::from_str(raw).map_err(ParseError::MalformedSyntax)?;
    index_from_value(value)
}

/// Schema stage of [`parse_index`].
pub fn index_from_value(value: Json) -> Result<Index, ParseError> {
    serde_json::from_value(value).map_err(|e| ParseError::SchemaMismatch(e.to_string()))
}

/// Serialize a document or the index into its canonical byte form.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf).expect("serializer emits UTF-8"))
}
