//! Union normalization for rendered output
//!
//! Post-processes rendered text so equivalent variant sets always read
//! the same: duplicates removed, variants in lexicographic order. One
//! implementation per target form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// A `" | "`-joined run of `name` / `name[]` tokens in declaration text
static UNION_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[A-Za-z_$][A-Za-z0-9_$]*(?:\[\])?(?:\s*\|\s*[A-Za-z_$][A-Za-z0-9_$]*(?:\[\])?)+",
    )
    .unwrap()
});

/// Normalize union runs in declaration text
///
/// Each run is parsed into its token list, sorted lexicographically and
/// deduplicated, then rewritten with `" | "` separators. The rewrite is
/// repeated to a fixed point, so the result is independent of the
/// original variant order and idempotent:
/// `"string | number | string"` becomes `"number | string"`.
///
/// Pure string rewriting; cannot fail.
pub fn normalize_declaration(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let rewritten = UNION_RUN_REGEX
            .replace_all(&current, |caps: &regex::Captures<'_>| {
                let mut tokens: Vec<&str> = caps[0].split('|').map(str::trim).collect();
                tokens.sort_unstable();
                tokens.dedup();
                tokens.join(" | ")
            })
            .into_owned();
        if rewritten == current {
            return current;
        }
        current = rewritten;
    }
}

/// Normalize `anyOf` lists in a rendered validation document
///
/// Parses the text back into a document tree and, bottom-up at every
/// node carrying a variant list: sorts variants by their canonical
/// serialized form, removes exact duplicates, splices a sole surviving
/// variant's fields into the parent, and replaces an emptied list with a
/// diagnostic `description`. A document that cannot be parsed is
/// returned unchanged with a warning.
pub fn normalize_validation_document(text: &str, pretty: bool) -> String {
    let mut doc: Value = match serde_json::from_str(text) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("could not normalize validation-document unions, text unchanged: {e}");
            return text.to_string();
        }
    };

    normalize_node(&mut doc);

    let serialized = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    match serialized {
        Ok(serialized) => serialized,
        Err(e) => {
            tracing::warn!("could not reserialize normalized document, text unchanged: {e}");
            text.to_string()
        }
    }
}

fn normalize_node(node: &mut Value) {
    match node {
        Value::Array(items) => {
            for item in items {
                normalize_node(item);
            }
        }
        Value::Object(map) => {
            // Children first, so nested unions are already canonical when
            // the parent compares serialized forms
            for (_, value) in map.iter_mut() {
                normalize_node(value);
            }
            match map.remove("anyOf") {
                Some(Value::Array(variants)) => normalize_any_of(map, variants),
                Some(other) => {
                    map.insert("anyOf".to_string(), other);
                }
                None => {}
            }
        }
        _ => {}
    }
}

fn normalize_any_of(map: &mut Map<String, Value>, variants: Vec<Value>) {
    let mut keyed: Vec<(String, Value)> = variants
        .into_iter()
        .map(|variant| {
            let key = serde_json::to_string(&variant).unwrap_or_default();
            (key, variant)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);

    match keyed.len() {
        0 => {
            map.entry("description")
                .or_insert_with(|| Value::String("Empty union after deduplication".to_string()));
        }
        1 => {
            let (_, variant) = keyed.into_iter().next().unwrap_or_default();
            match variant {
                // The sole variant's fields move into the parent node
                Value::Object(fields) => {
                    for (key, value) in fields {
                        map.insert(key, value);
                    }
                }
                other => {
                    map.insert("anyOf".to_string(), Value::Array(vec![other]));
                }
            }
        }
        _ => {
            map.insert(
                "anyOf".to_string(),
                Value::Array(keyed.into_iter().map(|(_, variant)| variant).collect()),
            );
        }
    }
}
