use serde_json::Value;

use super::record::Dependency;

/// Parses a numeric field the way a form would: surrounding whitespace is
/// ignored, `0x`/`0o`/`0b` prefixes are honoured, and only finite results
/// count.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return i64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }
    // `f64::from_str` also takes "inf"/"nan" spellings; the finiteness check
    // below rejects them.
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a free-text dependency field.
///
/// A JSON array is taken verbatim. Anything else is read as a comma-separated
/// list where numeric pieces become ids and the rest stay text.
pub fn parse_dependencies(raw: &str) -> Vec<Dependency> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return items.into_iter().map(Dependency::from).collect();
    }

    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| match parse_number(piece) {
            Some(n) => Dependency::from_f64(n),
            None => Dependency::Name(piece.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn as_json(deps: &[Dependency]) -> Value {
        serde_json::to_value(deps).unwrap()
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_dependencies("").is_empty());
        assert!(parse_dependencies("   \t").is_empty());
    }

    #[test]
    fn comma_separated_numbers() {
        assert_eq!(
            parse_dependencies("1,2,3"),
            vec![Dependency::from(1), Dependency::from(2), Dependency::from(3)]
        );
    }

    #[test]
    fn comma_separated_tokens_drop_empty_pieces() {
        assert_eq!(
            parse_dependencies("a, b , ,c"),
            vec![
                Dependency::from("a"),
                Dependency::from("b"),
                Dependency::from("c")
            ]
        );
    }

    #[test]
    fn json_array_is_verbatim() {
        assert_eq!(as_json(&parse_dependencies(r#"[1,"x"]"#)), json!([1, "x"]));
        assert_eq!(
            as_json(&parse_dependencies(r#"  [" 1 ", null, true] "#)),
            json!([" 1 ", null, true])
        );
    }

    #[test]
    fn non_array_json_falls_through_to_csv() {
        assert_eq!(parse_dependencies("7"), vec![Dependency::from(7)]);
        assert_eq!(
            as_json(&parse_dependencies(r#"{"a":1}"#)),
            json!([r#"{"a":1}"#])
        );
        assert_eq!(as_json(&parse_dependencies("[1, 2")), json!(["[1", 2]));
    }

    #[test]
    fn mixed_and_special_numbers() {
        assert_eq!(
            as_json(&parse_dependencies("1.5, Infinity, NaN, 0x10, -2")),
            json!([1.5, "Infinity", "NaN", 16, -2])
        );
    }

    #[test]
    fn parse_number_rejects_non_finite_and_garbage() {
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("0b101"), Some(5.0));
    }
}
