//! Response envelope normalization.
//!
//! The backend wraps payloads inconsistently (`data._id` vs `data.id` vs
//! top-level `_id`). All shape tolerance lives here, at the client
//! boundary; everything past this module sees one canonical form.

use serde_json::Value;

/// The payload object: `data` when present, else the whole body.
pub fn data(value: &Value) -> &Value {
    value.get("data").unwrap_or(value)
}

/// Extract the order id from an order-creation response.
pub fn order_id(value: &Value) -> Option<String> {
    ["/data/_id", "/data/id", "/_id", "/order/_id"]
        .iter()
        .find_map(|path| value.pointer(path).and_then(Value::as_str))
        .map(str::to_string)
}

/// Extract `(paymentIntentId, clientSecret)` from a payment-intent
/// response.
pub fn payment_intent(value: &Value) -> Option<(String, String)> {
    let intent = value
        .pointer("/data/paymentIntentId")
        .or_else(|| value.get("paymentIntentId"))
        .and_then(Value::as_str);
    let secret = value
        .pointer("/data/clientSecret")
        .or_else(|| value.get("clientSecret"))
        .and_then(Value::as_str);
    match (intent, secret) {
        (Some(intent), Some(secret)) => Some((intent.to_string(), secret.to_string())),
        _ => None,
    }
}

/// Extract a payment/processor status string.
pub fn status(value: &Value) -> Option<String> {
    value
        .pointer("/data/status")
        .or_else(|| value.get("status"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
