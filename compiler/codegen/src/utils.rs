//! Identifier helpers shared by the definition builders.

/// Convert a snake_case metadata name to CamelCase.
///
/// Each `_`-separated part is title-cased, so `get_value` becomes `GetValue`
/// and `ZERO` becomes `Zero`.
pub fn camel_case(name: &str) -> String { name.split('_').map(title_case).collect() }

/// Upper-case the first letter and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("get_value"), "GetValue");
        assert_eq!(camel_case("activate"), "Activate");
        assert_eq!(camel_case("ZERO"), "Zero");
        assert_eq!(camel_case("my_value_one"), "MyValueOne");
        assert_eq!(camel_case("MY_VALUE_ONE"), "MyValueOne");
        assert_eq!(camel_case("ellipsize_END"), "EllipsizeEnd");
        assert_eq!(camel_case("set_has_frame"), "SetHasFrame");
        assert_eq!(camel_case("_private"), "Private");
        assert_eq!(camel_case("trailing__gap_"), "TrailingGap");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("SECOND"), "Second");
        assert_eq!(title_case("x"), "X");
        assert_eq!(title_case(""), "");
    }
}
