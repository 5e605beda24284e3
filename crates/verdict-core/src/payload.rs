use serde::{Deserialize, Serialize};

/// Response body sent for an error
///
/// ```json
/// { "error": { "code": "VALIDATION", "message": "bad input", "stack": "..." } }
/// ```
///
/// The HTTP status travels separately through the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Only set in stack-enabled environments; omitted from JSON otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_is_omitted_when_absent() {
        let payload = Payload {
            error: ErrorBody {
                code: "UNKNOWN_ERROR".to_owned(),
                message: "boom".to_owned(),
                stack: None,
            },
        };

        insta::assert_json_snapshot!(payload, @r#"
        {
          "error": {
            "code": "UNKNOWN_ERROR",
            "message": "boom"
          }
        }
        "#);
    }

    #[test]
    fn stack_is_serialized_when_present() {
        let payload = Payload {
            error: ErrorBody {
                code: "VALIDATION".to_owned(),
                message: "bad input".to_owned(),
                stack: Some("Error: bad input".to_owned()),
            },
        };

        insta::assert_json_snapshot!(payload, @r#"
        {
          "error": {
            "code": "VALIDATION",
            "message": "bad input",
            "stack": "Error: bad input"
          }
        }
        "#);
    }
}
