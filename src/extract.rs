//! Normalization of raw language model replies into plain text
//!
//! Providers hand back text in a few shapes: a bare string, a message object
//! whose `content` is either a single value or a list of chunks, or something
//! else entirely. Everything downstream of the model only ever sees the
//! `String` produced here.

use serde_json::Value;

/// Raw reply as returned by a [`crate::llm::LanguageModel`]
pub type RawResponse = Value;

/// Flatten a raw model reply into a single string.
#[must_use]
pub fn extract(response: &RawResponse) -> String {
    match response {
        Value::String(text) => text.clone(),
        Value::Object(fields) => match fields.get("content") {
            Some(Value::Array(chunks)) => chunks.iter().map(chunk_text).collect(),
            Some(content) => stringify(content),
            None => stringify(response),
        },
        other => stringify(other),
    }
}

fn chunk_text(chunk: &Value) -> String {
    match chunk {
        Value::Object(fields) => fields.get("text").map(stringify).unwrap_or_default(),
        other => stringify(other),
    }
}

/// Text values render without quotes, everything else as JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::plain_text(json!("hello"), "hello")]
    #[case::single_content(json!({"content": "x"}), "x")]
    #[case::text_chunks(json!({"content": [{"text": "a"}, {"text": "b"}]}), "ab")]
    #[case::mixed_chunks(json!({"content": [{"text": "a"}, "b"]}), "ab")]
    #[case::number(json!(42), "42")]
    fn test_extract_shapes(#[case] response: Value, #[case] expected: &str) {
        assert_eq!(extract(&response), expected);
    }

    #[test]
    fn test_chunk_without_text_key_is_empty() {
        let response = json!({"content": [{"text": "a"}, {"type": "thought"}, {"text": "c"}]});
        assert_eq!(extract(&response), "ac");
    }

    #[test]
    fn test_non_text_content_is_stringified() {
        assert_eq!(extract(&json!({"content": 7})), "7");
        assert_eq!(extract(&json!({"content": [1, {"text": 2}]})), "12");
    }

    #[test]
    fn test_object_without_content_is_stringified_whole() {
        let response = json!({"answer": "yes"});
        assert_eq!(extract(&response), r#"{"answer":"yes"}"#);
    }

    #[test]
    fn test_extract_is_idempotent_on_text() {
        let once = extract(&json!({"content": [{"text": "Day 1: "}, "beach"]}));
        assert_eq!(extract(&Value::String(once.clone())), once);
    }
}
