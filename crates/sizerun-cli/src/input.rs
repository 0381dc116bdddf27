//! Loading of product identifiers from a JSON input file.

use serde_json::Value;

/// Object field read when the input is an array of objects.
pub(crate) const DEFAULT_FIELD: &str = "sneaker_link";

/// Parses the identifier list out of `json`.
///
/// Accepts either an array of strings or an array of objects, in which case
/// each identifier is read from `field`. Input order is kept. Blank entries
/// and objects without `field` are dropped with a warning.
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON, is not an array, or holds an
/// element that is neither a string, an object, nor `null`, or an object
/// whose `field` is not a string.
pub(crate) fn parse_identifiers(json: &str, field: &str) -> anyhow::Result<Vec<String>> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| anyhow::anyhow!("input is not valid JSON: {e}"))?;
    let Value::Array(entries) = document else {
        anyhow::bail!("input must be a JSON array of identifiers or objects");
    };

    let mut identifiers = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Null => None,
            Value::Object(map) => match map.get(field) {
                Some(Value::String(s)) => Some(s.as_str()),
                None | Some(Value::Null) => None,
                Some(other) => {
                    anyhow::bail!("entry {index}: field '{field}' must be a string, got {other}")
                }
            },
            other => anyhow::bail!("entry {index}: expected a string or an object, got {other}"),
        };

        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(identifier) => identifiers.push(identifier.to_owned()),
            None => tracing::warn!(index, field, "skipping entry without an identifier"),
        }
    }

    Ok(identifiers)
}
