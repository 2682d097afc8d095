/// Normalizes a distribution name the way package indexes compare them
/// (PEP 503): lowercase, with runs of `-`, `_` and `.` collapsed to a single `-`.
pub fn normalize_package_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
                in_separator = true;
            }
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    normalized
}

/// Names starting with an underscore are private by Python convention.
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_')
}

/// Splits a Python identifier into the words a spell checker looks at.
///
/// Underscores and other punctuation separate words, as do case changes
/// (`DataFrame` -> `Data`, `Frame`; `HTTPServer` -> `HTTP`, `Server`) and
/// letter/digit boundaries. Fragments without any letter are dropped.
pub fn split_identifier(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();

    for segment in identifier.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut start = 0;

        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next = chars.get(i + 1).copied();

            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || prev.is_alphabetic() != cur.is_alphabetic()
                || (prev.is_uppercase()
                    && cur.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));

            if boundary {
                words.push(chars[start..i].iter().collect::<String>());
                start = i;
            }
        }

        if start < chars.len() {
            words.push(chars[start..].iter().collect::<String>());
        }
    }

    words.retain(|w| w.chars().any(char::is_alphabetic));
    words
}
