use std::io;

use moneta_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use moneta_client::ClientError;
    use serde_json::Value;

    use super::render_error_json;

    #[test]
    fn error_json_uses_universal_shape() {
        let error = ClientError::new("not_found", "missing", vec!["run list".to_string()]);
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["error"]["code"], Value::String("not_found".to_string()));
                assert!(value.get("ok").is_none());
            }
        }
    }
}
