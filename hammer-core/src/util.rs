#[macro_export]
/// Shorten long statements for logging and error messages purpose.
///
/// Returns a `format_args!` that yields at most 497 characters from the start of the
/// input, trimmed, followed by `...` when something was cut.
///
/// # Examples
/// ```ignore
/// use hammer_core::truncate_long;
/// let short = "SELECT * FROM local";
/// assert_eq!(format!("{}", truncate_long!(short)), "SELECT * FROM local");
/// let long = format!("INSERT INTO t (v) VALUES ('{}')", "x".repeat(600));
/// assert!(format!("{}", truncate_long!(long)).ends_with("..."));
/// ```
macro_rules! truncate_long {
    ($statement:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_str(&$statement, 497).trim(),
            if $statement.len() > 497 { "..." } else { "" },
        )
    };
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate_str(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
