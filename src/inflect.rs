//! Name derivation for implicit identifiers: index names and reference columns.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid unsafe-character pattern"));
static UNDERSCORE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_{2,}").expect("valid underscore-run pattern"));

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "news",
    "series",
    "species",
    "sheep",
    "fish",
];

/// Convert `CamelCase` and `mixedCase` words to `snake_case`.
///
/// Acronym runs stay together: `HTTPServer` becomes `http_server`.
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && prev != '_' {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Derive the name of an index on `field` of `table`.
///
/// The result only contains `[a-zA-Z0-9_]` and never two underscores in a row.
pub fn index_name(table: &str, field: &str) -> String {
    let joined = snake_case(&format!("{}_{}", table, field));
    let safe = UNSAFE_CHARS.replace_all(&joined, "_");
    UNDERSCORE_RUNS.replace_all(&safe, "_").into_owned()
}

/// Singular form of a plural table name: `posts` -> `post`,
/// `blog_categories` -> `blog_category`.
///
/// Only the last `_`-separated word is inflected.
pub fn singularize(plural: &str) -> String {
    let (prefix, word) = match plural.rfind('_') {
        Some(idx) => plural.split_at(idx + 1),
        None => ("", plural),
    };

    format!("{}{}", prefix, singularize_word(word))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return singular.to_string();
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }

    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if lower.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }

    match word.strip_suffix(['s', 'S']) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
