// Helpers shared by the protobuf-text builders.

/// Escape a string for use inside a quoted protobuf-text field value.
/// Applying it twice yields the double-escaped form embedded component
/// descriptors need.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
