use serde::Serialize;
use serde_json::Value;

/// Log `data` under `message`: strings inline, anything else as pretty JSON.
pub fn log_json<T: Serialize + ?Sized>(message: &str, data: &T) {
    match serde_json::to_value(data) {
        Ok(Value::String(s)) => tracing::info!("{message}: {s}"),
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            tracing::info!("{message}: {pretty}");
        }
        Err(e) => tracing::warn!(error = %e, "{message}: <unserializable>"),
    }
}
