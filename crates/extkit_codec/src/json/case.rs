use serde_json::{Map, Value};

// -----------------------------------------------------------------------------
// Lower camel case

/// Converts a field name to lower camel case.
///
/// `_`, `-` and spaces separate words and are dropped. Every word but the
/// first gets an upper-case initial. In the first word the leading run of
/// upper-case letters is lowered, except for the last letter of a run that
/// directly precedes a lower-case letter, which starts the next word
/// (`URLValue` -> `urlValue`).
///
/// A name made only of separators is returned unchanged.
pub(crate) fn lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    let words = name.split(['_', '-', ' ']).filter(|w| !w.is_empty());
    for (index, word) in words.enumerate() {
        if index == 0 {
            push_lowered_head(&mut out, word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }

    if out.is_empty() {
        out.push_str(name);
    }
    out
}

fn push_lowered_head(out: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();

    let mut lowered = 0;
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }
        if i > 0 && i + 1 < chars.len() && !chars[i + 1].is_uppercase() {
            break;
        }
        lowered = i + 1;
    }

    for (i, c) in chars.into_iter().enumerate() {
        if i < lowered {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
}

/// Rewrites every object key in `value`, at any depth, to lower camel case.
pub(crate) fn camelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (lower_camel(&key), camelize_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_keys).collect()),
        other => other,
    }
}
