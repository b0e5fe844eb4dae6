//! Frontmatter parsing for topic documents
//!
//! Handles extraction of the YAML frontmatter block from a markdown topic
//! file. Schema checks on the extracted fields live in the validator so a
//! single pass can accumulate every finding per file; this module only
//! deals with the mechanics of the `---` delimited block.

use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

/// Delimiter for frontmatter sections
const FRONTMATTER_DELIMITER: &str = "---";

/// Why a frontmatter block could not be read from a topic file
///
/// Never fatal to a validation run; the validator records one accumulated
/// violation per affected file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontmatterError {
    #[error("no frontmatter found - file must start with '---'")]
    Missing,

    #[error("unclosed frontmatter - missing closing '---'")]
    Unclosed,

    #[error("{0}")]
    Yaml(String),
}

/// Result of extracting frontmatter from content
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFrontmatter {
    /// The raw YAML content of the frontmatter
    pub yaml: String,
    /// The content body after the frontmatter
    pub body: String,
    /// Line number where frontmatter ends (for error reporting)
    pub end_line: usize,
}

/// Extract frontmatter from file content
///
/// Frontmatter must be at the start of the file, delimited by `---` lines.
///
/// # Example
/// ```text
/// ---
/// title: Overview
/// slug: overview
/// ---
/// # Topic content here
/// ```
pub fn extract_frontmatter(content: &str) -> Result<ExtractedFrontmatter, FrontmatterError> {
    let lines: Vec<&str> = content.lines().collect();

    // File must start with ---
    if lines.is_empty() || lines[0].trim() != FRONTMATTER_DELIMITER {
        return Err(FrontmatterError::Missing);
    }

    // Find closing ---
    let mut closing_line: Option<usize> = None;
    for (i, line) in lines.iter().enumerate().skip(1) {
        if line.trim() == FRONTMATTER_DELIMITER {
            closing_line = Some(i);
            break;
        }
    }

    let closing_line = closing_line.ok_or(FrontmatterError::Unclosed)?;

    // Extract YAML content (between delimiters)
    let yaml = lines[1..closing_line].join("\n");

    // Extract body (after closing delimiter)
    let body = if closing_line + 1 < lines.len() {
        lines[closing_line + 1..].join("\n")
    } else {
        String::new()
    };

    Ok(ExtractedFrontmatter {
        yaml,
        body,
        end_line: closing_line + 1, // 1-indexed line number
    })
}

/// Parse extracted frontmatter YAML into a key/value mapping
///
/// An empty block yields an empty mapping (every required field will then
/// be reported missing by the validator, which is the useful outcome).
pub fn parse_mapping(yaml: &str) -> Result<Mapping, FrontmatterError> {
    let value: Value = serde_yaml_ng::from_str(yaml)
        .map_err(|e| FrontmatterError::Yaml(format_yaml_error(yaml, &e)))?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(FrontmatterError::Yaml(format!(
            "frontmatter must be a mapping, found {}",
            yaml_type_name(&other)
        ))),
    }
}

/// Human-readable name for a YAML value's type
pub fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn format_yaml_error(yaml: &str, err: &serde_yaml_ng::Error) -> String {
    let err_str = err.to_string();
    let mut message = match err.location() {
        Some(loc) => format!("line {}: invalid YAML - {}", loc.line(), err_str),
        None => format!("invalid YAML - {}", err_str),
    };

    if should_hint_colon_quotes(yaml, &err_str) {
        message.push_str("\nhint: strings containing colons need quotes: description: \"My: Topic\"");
    }

    message
}

fn should_hint_colon_quotes(yaml: &str, err_str: &str) -> bool {
    // Heuristic: common YAML parse error when unquoted scalars contain `: `.
    err_str.contains("mapping values are not allowed")
        || yaml
            .lines()
            .any(|l| l.contains(": ") && l.matches(':').count() > 1)
}
