/// Prefix of conventional setter method names.
pub const SETTER_PREFIX: &str = "set";

/// Title-case the first character of `s`, leaving the rest untouched. An empty string stays empty.
///
/// The first character is replaced with exactly one character. When its upper case form is longer than that (`ß`
/// becomes `SS`) it is kept as is; the Latin digraphs map to their title case forms (`ǆ` becomes `ǅ`, not `Ǆ`).
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(s.len());
            capitalized.push(to_titlecase(first));
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}

fn to_titlecase(c: char) -> char {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        }
    }
}

/// Conventional setter name for a property: `name` -> `setName`.
pub fn setter_name(property: &str) -> String {
    format!("{SETTER_PREFIX}{}", capitalize_first_letter(property))
}
