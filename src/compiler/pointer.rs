//! JSON Pointer helpers (RFC 6901)
//!
//! Location keys use the fragment form: `#` for the document root,
//! `#/$defs/node` for nested locations. `$ref` resolution is an exact
//! string match against these keys.

/// Escapes a single reference token: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescapes a single reference token.
pub fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Appends an escaped token to a pointer.
pub fn join(base: &str, token: &str) -> String {
    format!("{}/{}", base, escape(token))
}

/// Appends an array index to a pointer.
pub fn join_index(base: &str, index: usize) -> String {
    format!("{}/{}", base, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_order_matters() {
        // "~/" must become "~0~1", never "~01"
        assert_eq!(escape("~/"), "~0~1");
        assert_eq!(unescape("~0~1"), "~/");
    }

    #[test]
    fn test_join_escapes_tokens() {
        assert_eq!(join("#", "a/b"), "#/a~1b");
        assert_eq!(join_index("#/items", 3), "#/items/3");
    }
}
