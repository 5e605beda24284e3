use std::io::{Read, Write};

use anyhow::Context;
use serde_json::Value;
use verdict_core::{ConfigOverrides, ErrorResponder, ErrorSource, ResponderScope, is_present};

use crate::args::RenderArgs;
use crate::sink::TextSink;

/// Build a responder from the error document and write it to `out`
pub fn run(scope: &ResponderScope, args: &RenderArgs, input: &str, out: impl Write) -> anyhow::Result<()> {
    if let Some(ref raw) = args.overrides {
        let overrides: ConfigOverrides = serde_json::from_str(raw).context("invalid configuration overrides")?;
        scope.configure(overrides);
    }

    let mut responder = ErrorResponder::build(scope, parse_error(input)?);

    if let Some(ref code) = args.code {
        responder.set_error_code(code.clone());
    }
    if let Some(status) = args.status {
        responder.set_status(status);
    }

    responder
        .send(TextSink::new(out))
        .context("failed to write response")?;

    Ok(())
}

/// Read the error document from the input file or stdin
pub fn read_input(args: &RenderArgs) -> anyhow::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read error document from stdin")?;
            Ok(input)
        }
    }
}

/// Blank input and falsy documents (`null`, `false`, `0`, `""`) mean "no error"
fn parse_error(input: &str) -> anyhow::Result<Option<Box<dyn ErrorSource>>> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let document: Value = serde_json::from_str(input).context("error document is not valid JSON")?;

    Ok(is_present(&document).then(|| Box::new(document) as Box<dyn ErrorSource>))
}

#[cfg(test)]
mod tests {
    use verdict_core::FixedEnvironment;

    use super::*;

    fn render(environment: &str, args: &RenderArgs, input: &str) -> String {
        let scope = ResponderScope::default().with_environment(FixedEnvironment::new(environment));
        let mut out = Vec::new();
        run(&scope, args, input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn args() -> RenderArgs {
        RenderArgs {
            input: None,
            code: None,
            status: None,
            overrides: None,
        }
    }

    #[test]
    fn document_without_code() {
        let output = render("production", &args(), r#"{"message": "boom"}"#);

        insta::assert_snapshot!(output, @r#"
        HTTP 500
        {
          "error": {
            "code": "UNKNOWN_ERROR",
            "message": "boom"
          }
        }
        "#);
    }

    #[test]
    fn overrides_map_the_code() {
        let args = RenderArgs {
            overrides: Some(r#"{"codeStatusMap": {"VALIDATION": 400}}"#.to_owned()),
            ..args()
        };
        let output = render(
            "development",
            &args,
            r#"{"message": "bad input", "code": "VALIDATION", "stack": "at validate"}"#,
        );

        insta::assert_snapshot!(output, @r#"
        HTTP 400
        {
          "error": {
            "code": "VALIDATION",
            "message": "bad input",
            "stack": "at validate"
          }
        }
        "#);
    }

    #[test]
    fn empty_input_is_unknown_error() {
        let output = render("production", &args(), "  \n");
        assert!(output.starts_with("HTTP 500\n"));
        assert!(output.contains("\"message\": \"Unknown error\""));
    }

    #[test]
    fn falsy_documents_are_unknown_error() {
        for input in ["null", "false", "0", "\"\""] {
            let output = render("production", &args(), input);
            assert!(output.starts_with("HTTP 500\n"), "input {input}");
            assert!(output.contains("\"code\": \"UNKNOWN_ERROR\""), "input {input}");
            assert!(output.contains("\"message\": \"Unknown error\""), "input {input}");
        }
    }

    #[test]
    fn truthy_scalar_document_is_the_message() {
        let output = render("production", &args(), "\"disk full\"");
        assert!(output.contains("\"message\": \"disk full\""));
    }

    #[test]
    fn code_then_status() {
        let args = RenderArgs {
            code: Some("X".to_owned()),
            status: Some(999),
            ..args()
        };
        let output = render("production", &args, r#"{"message": "boom"}"#);

        assert!(output.starts_with("HTTP 999\n"));
        assert!(output.contains("\"code\": \"X\""));
    }

    #[test]
    fn invalid_document() {
        let scope = ResponderScope::default();
        let err = run(&scope, &args(), "{not json", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn invalid_overrides() {
        let scope = ResponderScope::default();
        let args = RenderArgs {
            overrides: Some(r#"{"fallbackStatus": "teapot"}"#.to_owned()),
            ..args()
        };
        let err = run(&scope, &args, "{}", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("invalid configuration overrides"));
    }
}
