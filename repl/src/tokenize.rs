//! Input tokenizing.

use regex_lite::Regex;
use std::sync::OnceLock;

fn token_pattern() -> Result<&'static Regex, String> {
    static PATTERN: OnceLock<Result<Regex, regex_lite::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"(\S+?=)?"([^"]*)"|(\S+)"#))
        .as_ref()
        .map_err(|e| format!("tokenizer unavailable: {}", e))
}

/// Split a line into words. Double quotes group words, also after `key=`,
/// and are dropped.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let pattern = token_pattern()?;
    Ok(pattern
        .captures_iter(line)
        .map(|caps| match caps.get(2) {
            Some(quoted) => {
                let key = caps.get(1).map_or("", |m| m.as_str());
                format!("{}{}", key, quoted.as_str())
            }
            None => caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
        })
        .collect())
}

/// Split `key=value`; `None` for a bare word.
pub fn key_value(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    (!key.is_empty()).then_some((key, value))
}
