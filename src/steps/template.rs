//! Placeholder substitution for task templates.
//!
//! Task templates use `{variable}` placeholders resolved by exact key match
//! against a [`Context`].
//!
//! # Syntax
//!
//! - `{name}` - replaced with the value of `name`
//! - `{{` and `}}` - literal `{` and `}`
//!
//! # Example
//!
//! ```
//! use grc_flow::context::Context;
//! use grc_flow::steps::template::render;
//! use serde_json::json;
//!
//! let mut ctx = Context::new();
//! ctx.insert("topic".to_string(), json!("data privacy"));
//! assert_eq!(render("Research {topic}", &ctx).unwrap(), "Research data privacy");
//! ```

use std::collections::BTreeSet;

use crate::context::{value_text, Context};
use crate::error::{FlowError, Result};

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Placeholder reference: {name}
    Placeholder(String),
}

/// Parse a template into literal and placeholder segments.
///
/// # Errors
///
/// Returns `MalformedTemplate` for an unclosed `{`, an empty `{}`, or a
/// lone `}`.
pub fn parse_template(input: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                current_literal.push('{');
            }
            '{' => {
                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if !closed {
                    return Err(FlowError::MalformedTemplate {
                        message: format!("unclosed '{{' before '{}'", name),
                    });
                }
                if name.is_empty() {
                    return Err(FlowError::MalformedTemplate {
                        message: "empty placeholder '{}'".to_string(),
                    });
                }

                segments.push(Segment::Placeholder(name));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                current_literal.push('}');
            }
            '}' => {
                return Err(FlowError::MalformedTemplate {
                    message: "single '}' encountered".to_string(),
                });
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Extract all placeholder names from a template.
pub fn placeholders(input: &str) -> Result<BTreeSet<String>> {
    Ok(parse_template(input)?
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Render a template against a context.
///
/// # Errors
///
/// Returns `TemplateResolution` if a placeholder names a key missing from
/// the context, or `MalformedTemplate` if the template cannot be parsed.
pub fn render(input: &str, context: &Context) -> Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_template(input)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Placeholder(name) => {
                let value = context
                    .get(&name)
                    .ok_or(FlowError::TemplateResolution { variable: name })?;
                result.push_str(&value_text(value));
            }
        }
    }

    Ok(result)
}
