//! Best-effort rewriting of type-annotation strings
//!
//! Type names arrive as free-form strings (`Promise<Point>`, `Array.<T>`,
//! `Map<string, T>`). This module strips generic suffixes, unwraps async and
//! optional/collection wrappers, and substitutes bound template parameters.
//! It is a tolerant transformer, not a grammar: malformed input degrades to
//! partial stripping and is never an error.

use std::collections::HashMap;

/// Wrappers whose sole purpose is to denote an async or optional result
const VALUE_WRAPPERS: &[&str] = &["Promise", "PromiseLike", "Optional", "Nullable"];

/// The extractor's "no value" type sentinel
const NO_VALUE: &str = "undefined";

/// Unwrap guard; deeply nested or self-referential syntax stops here
const MAX_UNWRAP: usize = 16;

/// Strip a trailing `<...>` generic-argument suffix, yielding the bare name
///
/// `Container<string>` and `Container.<string>` both become `Container`.
/// A dangling `<` with no closer is stripped the same way.
pub fn strip_generics(name: &str) -> &str {
    let bare = match name.find('<') {
        Some(pos) => &name[..pos],
        None => name,
    };
    bare.strip_suffix('.').unwrap_or(bare).trim_end()
}

/// Positional generic arguments from a use-site reference
///
/// `Pair<string, number>` yields `["string", "number"]`; splitting honors
/// nesting depth, so `Map<string, Array<number>>` yields two arguments.
pub fn generic_args(name: &str) -> Vec<String> {
    let Some(open) = name.find('<') else {
        return Vec::new();
    };
    let inner = name[open + 1..].strip_suffix('>').unwrap_or(&name[open + 1..]);

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        args.push(current.trim().to_string());
    }
    args
}

/// Rewrite one type name: unwrap wrappers, then substitute bindings
///
/// `Promise<T>` unwraps to `T`; `Array<T>` becomes `T[]` (nesting appends
/// further `[]`); any identifier bound in `bindings` is replaced by its
/// bound value.
pub fn rewrite(name: &str, bindings: &HashMap<String, String>) -> String {
    let mut current = name.trim().to_string();
    let mut array_depth = 0usize;

    for _ in 0..MAX_UNWRAP {
        let Some((outer, inner)) = split_single_arg(&current) else {
            break;
        };
        if VALUE_WRAPPERS.contains(&outer.as_str()) {
            current = inner;
        } else if outer == "Array" {
            array_depth += 1;
            current = inner;
        } else {
            break;
        }
    }

    let mut rewritten = substitute_idents(&current, bindings);
    for _ in 0..array_depth {
        rewritten.push_str("[]");
    }
    rewritten
}

/// Rewrite a type-name list in place: substitute, dedup, drop the sentinel
pub fn rewrite_list(names: &mut Vec<String>, bindings: &HashMap<String, String>) {
    let mut seen = Vec::new();
    for name in names.drain(..) {
        let rewritten = rewrite(&name, bindings);
        if rewritten == NO_VALUE || rewritten.is_empty() {
            continue;
        }
        if !seen.contains(&rewritten) {
            seen.push(rewritten);
        }
    }
    *names = seen;
}

/// Split `Outer<inner>` when `inner` is a single argument
///
/// Returns the bare outer name (dotted form tolerated) and the inner text.
/// Multi-argument generics and plain names return `None`.
fn split_single_arg(name: &str) -> Option<(String, String)> {
    name.find('<')?;
    if !name.ends_with('>') {
        return None;
    }
    let outer = strip_generics(name).to_string();
    if outer.is_empty() {
        return None;
    }
    let mut args = generic_args(name);
    if args.len() != 1 {
        return None;
    }
    Some((outer, args.pop().unwrap_or_default()))
}

/// Replace every identifier token that has a binding
fn substitute_idents(text: &str, bindings: &HashMap<String, String>) -> String {
    if bindings.is_empty() {
        return text.to_string();
    }
    let mut result = String::with_capacity(text.len());
    let mut token = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            token.push(c);
        } else {
            flush_token(&mut result, &mut token, bindings);
            result.push(c);
        }
    }
    flush_token(&mut result, &mut token, bindings);
    result
}

fn flush_token(result: &mut String, token: &mut String, bindings: &HashMap<String, String>) {
    if token.is_empty() {
        return;
    }
    match bindings.get(token.as_str()) {
        Some(bound) => result.push_str(bound),
        None => result.push_str(token),
    }
    token.clear();
}
