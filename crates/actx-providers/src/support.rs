use actx_types::Error;
use serde_json::Value;
use uuid::Uuid;

/// `arguments` is always stored as a JSON-encoded string on the canonical
/// tool-call Part, regardless of whether the ingress payload sent an
/// object or already-encoded string (§3.3).
pub fn arguments_to_canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Re-parses a canonical `arguments` string back into a JSON value for a
/// target provider that requires an object (provider B's `input`,
/// provider C's `args`). Fails with `MalformedArguments` if the stored
/// string isn't valid JSON.
pub fn arguments_from_canonical_string(s: &str, message_id: Option<Uuid>) -> Result<Value, Error> {
    serde_json::from_str(s)
        .map_err(|e| Error::malformed_arguments(format!("arguments is not valid JSON: {e}"), message_id))
}

/// Derives a deterministic id for an ingress payload that didn't supply
/// one, so repeated normalization of byte-identical input is idempotent.
/// `namespace` should be stable per call site (e.g. the session id);
/// `suffix` should be something that varies per distinct logical part
/// (e.g. an index or a hash of its content).
pub fn deterministic_id(namespace: &str, suffix: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{namespace}:{suffix}").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_round_trip_through_string() {
        let obj = serde_json::json!({"city": "SF"});
        let s = arguments_to_canonical_string(&obj);
        assert_eq!(s, r#"{"city":"SF"}"#);
        let back = arguments_from_canonical_string(&s, None).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn arguments_already_string_passes_through() {
        let v = Value::String(r#"{"a":1}"#.to_string());
        assert_eq!(arguments_to_canonical_string(&v), r#"{"a":1}"#);
    }

    #[test]
    fn deterministic_id_is_stable() {
        let a = deterministic_id("session-1", "0");
        let b = deterministic_id("session-1", "0");
        let c = deterministic_id("session-1", "1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
