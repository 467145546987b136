//! Extraction classifier: decide whether page content satisfies the
//! objective, and extract the data when it does.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::{ExtractorError, Result};
use crate::pipeline::prompts::{format_classify_prompt, CLASSIFY_SYSTEM_PROMPT};
use crate::traits::llm::{CompletionRequest, LanguageModel};
use crate::types::config::ModelConfig;
use crate::types::run::ExtractionResult;

/// Literal reply meaning "this page does not satisfy the objective".
pub const NOT_MET_SENTINEL: &str = "Objective not met";

lazy_static! {
    static ref THINK_SPAN: Regex = Regex::new(r"(?s)<think>.*?</think>").unwrap();
}

/// Remove every `<think>...</think>` span, including multi-line ones.
pub fn strip_think_spans(text: &str) -> String {
    THINK_SPAN.replace_all(text, "").into_owned()
}

/// Strip a surrounding triple-backtick fence and an optional `json` tag.
///
/// Text that does not open with a fence is returned unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }

    let inner = text.trim_matches('`');
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.trim()
}

/// JSON truthiness: false, null, 0, "", [] and {} are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Interpret a raw classifier reply.
///
/// Malformed JSON is an error, never `NotFound`, so the caller can tell a
/// rejection apart from a broken reply.
pub fn parse_classification(raw: &str) -> Result<ExtractionResult> {
    let cleaned = strip_think_spans(raw);
    let text = cleaned.trim();

    if text.eq_ignore_ascii_case(NOT_MET_SENTINEL) {
        return Ok(ExtractionResult::NotFound);
    }

    let text = strip_code_fence(text);
    let parsed: Value = serde_json::from_str(text)?;

    let Value::Object(mut object) = parsed else {
        return Err(ExtractorError::response_shape(
            "classifier reply is not a JSON object",
        ));
    };

    if !object.get("found").is_some_and(is_truthy) {
        return Ok(ExtractionResult::NotFound);
    }

    match object.remove("data") {
        None | Some(Value::Null) => Err(ExtractorError::response_shape(
            "classifier reported found without data",
        )),
        Some(data) => Ok(ExtractionResult::Found(data)),
    }
}

/// Classify one page's content. One completion call.
pub async fn classify<L: LanguageModel + ?Sized>(
    model: &L,
    config: &ModelConfig,
    content: &str,
    objective: &str,
) -> Result<ExtractionResult> {
    let request = CompletionRequest::new(config, format_classify_prompt(objective, content))
        .with_system(CLASSIFY_SYSTEM_PROMPT);

    let reply = model.complete(&request).await?;
    parse_classification(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::MockLanguageModel;
    use serde_json::json;

    #[test]
    fn test_sentinel_any_casing() {
        for reply in ["Objective not met", "OBJECTIVE NOT MET", "  objective Not Met\n"] {
            assert_eq!(parse_classification(reply).unwrap(), ExtractionResult::NotFound);
        }
    }

    #[test]
    fn test_think_span_then_sentinel() {
        let reply = "<think>\nThe page lists products.\nNo email here.\n</think>\nObjective not met";
        assert_eq!(parse_classification(reply).unwrap(), ExtractionResult::NotFound);
    }

    #[test]
    fn test_multiple_think_spans_removed() {
        let reply = r#"<think>a</think>{"found": true, <think>b</think>"data": {"x": 1}}"#;
        assert_eq!(
            parse_classification(reply).unwrap(),
            ExtractionResult::Found(json!({"x": 1}))
        );
    }

    #[test]
    fn test_found_returns_data_unchanged() {
        let reply = r#"{"found": true, "data": {"email": "a@b.com", "phones": ["1", "2"], "n": 1.5}}"#;
        assert_eq!(
            parse_classification(reply).unwrap(),
            ExtractionResult::Found(json!({"email": "a@b.com", "phones": ["1", "2"], "n": 1.5}))
        );
    }

    #[test]
    fn test_found_false_is_not_found() {
        let reply = r#"{"found": false, "data": {"email": "a@b.com"}}"#;
        assert_eq!(parse_classification(reply).unwrap(), ExtractionResult::NotFound);
    }

    #[test]
    fn test_missing_found_is_not_found() {
        assert_eq!(
            parse_classification(r#"{"data": {}}"#).unwrap(),
            ExtractionResult::NotFound
        );
    }

    #[test]
    fn test_fenced_equals_unfenced() {
        let plain = r#"{"found":true,"data":{}}"#;
        let tagged = "```json\n{\"found\":true,\"data\":{}}\n```";
        let untagged = "```\n{\"found\":true,\"data\":{}}\n```";

        let expected = parse_classification(plain).unwrap();
        assert_eq!(parse_classification(tagged).unwrap(), expected);
        assert_eq!(parse_classification(untagged).unwrap(), expected);
    }

    #[test]
    fn test_malformed_json_is_error_not_not_found() {
        let err = parse_classification(r#"{"found": true, "data": {"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseShape);
    }

    #[test]
    fn test_non_object_json_is_error() {
        assert!(parse_classification("[1, 2]").is_err());
    }

    #[test]
    fn test_found_without_data_is_error() {
        assert!(parse_classification(r#"{"found": true}"#).is_err());

        let err = parse_classification(r#"{"found": true, "data": null}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseShape);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
    }

    #[test]
    fn test_strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```JSON\n[]\n```"), "[]");
    }

    #[tokio::test]
    async fn test_classify_sends_system_prompt() {
        let model = MockLanguageModel::new().with_reply(r#"{"found": true, "data": {"a": 1}}"#);

        let result = classify(&model, &ModelConfig::default(), "# Page", "Find a")
            .await
            .unwrap();

        assert_eq!(result, ExtractionResult::Found(json!({"a": 1})));
        let calls = model.calls();
        assert_eq!(calls[0].system.as_deref(), Some(CLASSIFY_SYSTEM_PROMPT));
        assert!(calls[0].user.contains("Scraped content: # Page"));
    }
}
