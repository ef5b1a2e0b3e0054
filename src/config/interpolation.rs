//! `${key}` interpolation against run state.
//!
//! # Syntax
//!
//! - `${key}` - replaced with the rendered state value for `key`
//! - `$${key}` - produces a literal `${key}`
//!
//! Keys missing from state render as the empty string.

use std::collections::BTreeSet;
use tracing::debug;

use crate::state::State;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Split a template into literal text and variable references.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                literal.push('$');
                if chars.peek() == Some(&'{') {
                    // $${...} stays verbatim up to the closing brace
                    for c in chars.by_ref() {
                        literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                }
            }
            Some('{') => {
                chars.next();
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                segments.push(Segment::Variable(name.trim().to_string()));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Unique variable names referenced by a template.
pub fn extract_variables(input: &str) -> BTreeSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Check if a string contains any interpolation.
pub fn has_interpolation(input: &str) -> bool {
    parse_interpolation(input)
        .iter()
        .any(|seg| matches!(seg, Segment::Variable(_)))
}

/// Render a template against state.
///
/// `extra` entries shadow state keys of the same name; output handlers use it
/// to expose `${output}`.
pub fn interpolate(template: &str, state: &State, extra: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());

    for segment in parse_interpolation(template) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                if let Some((_, value)) = extra.iter().find(|(k, _)| *k == name) {
                    result.push_str(value);
                } else if let Some(value) = state.render(&name) {
                    result.push_str(&value);
                } else {
                    debug!("Interpolation key '{}' is not set; using empty string", name);
                }
            }
        }
    }

    result
}
