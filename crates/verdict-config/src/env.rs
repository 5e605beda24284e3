use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Substitute environment placeholders in raw configuration text
///
/// Runs before TOML parsing so that the configuration types only ever
/// see plain values. Comment lines are copied through as-is, which keeps
/// commented-out settings from requiring their variables.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let lines = input
        .lines()
        .map(expand_line)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> anyhow::Result<String> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(captures: &Captures<'_>) -> anyhow::Result<String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let default = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        anyhow::bail!("only variables scoped with 'env.' are supported: `{key}`");
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable not found: `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[responder]\nfallback_status = 500\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_variable() {
        temp_env::with_var("VERDICT_TEST_CODE", Some("INTERNAL"), || {
            let result = expand_env("fallback_error_code = \"{{ env.VERDICT_TEST_CODE }}\"").unwrap();
            assert_eq!(result, "fallback_error_code = \"INTERNAL\"");
        });
    }

    #[test]
    fn substitutes_several_variables_across_lines() {
        let vars = [("VERDICT_TEST_A", Some("a")), ("VERDICT_TEST_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("x = \"{{ env.VERDICT_TEST_A }}{{env.VERDICT_TEST_B}}\"\ny = \"{{ env.VERDICT_TEST_B }}\"").unwrap();
            assert_eq!(result, "x = \"ab\"\ny = \"b\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("VERDICT_TEST_MISSING", || {
            let err = expand_env("x = \"{{ env.VERDICT_TEST_MISSING }}\"").unwrap_err();
            assert!(err.to_string().contains("VERDICT_TEST_MISSING"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("VERDICT_TEST_OPTIONAL", || {
            let result = expand_env("x = \"{{ env.VERDICT_TEST_OPTIONAL | default(\"staging\") }}\"").unwrap();
            assert_eq!(result, "x = \"staging\"");
        });

        temp_env::with_var("VERDICT_TEST_OPTIONAL", Some("production"), || {
            let result = expand_env("x = \"{{ env.VERDICT_TEST_OPTIONAL | default(\"staging\") }}\"").unwrap();
            assert_eq!(result, "x = \"production\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("VERDICT_TEST_MISSING", || {
            let input = "  # name = \"{{ env.VERDICT_TEST_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn rejects_other_scopes() {
        let err = expand_env("x = \"{{ vault.TOKEN }}\"").unwrap_err();
        assert!(err.to_string().contains("only variables scoped with 'env.'"));
    }
}
