//! String conversion utilities.

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// # Examples
///
/// ```
/// use herosheet_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("hello"), Some("hello"));
/// assert_eq!(none_if_empty(""), None);
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Extension methods for the free-text values the sheet stores.
pub trait StringExt {
    /// Converts this string to `None` if empty, otherwise `Some(self)`.
    fn into_option(self) -> Option<String>;

    /// Parses a leading integer the way form inputs are read
    /// (`" 12 "` → 12, `"3abc"` → 3, `"abc"` → `None`).
    fn parse_leading_int(&self) -> Option<i64>;
}

impl StringExt for String {
    fn into_option(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    fn parse_leading_int(&self) -> Option<i64> {
        self.as_str().parse_leading_int()
    }
}

impl StringExt for &str {
    fn into_option(self) -> Option<String> {
        none_if_empty(self).map(str::to_string)
    }

    fn parse_leading_int(&self) -> Option<i64> {
        let trimmed = self.trim_start();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse::<i64>().ok().map(|n| sign * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty_whitespace_is_not_empty() {
        assert_eq!(none_if_empty(" "), Some(" "));
        assert_eq!(none_if_empty(""), None);
    }

    #[test]
    fn test_string_ext_into_option() {
        assert_eq!("hello".to_string().into_option(), Some("hello".to_string()));
        assert_eq!(String::new().into_option(), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!("12".parse_leading_int(), Some(12));
        assert_eq!(" 7 ".parse_leading_int(), Some(7));
        assert_eq!("-3".parse_leading_int(), Some(-3));
        assert_eq!("4d6".parse_leading_int(), Some(4));
        assert_eq!("abc".parse_leading_int(), None);
        assert_eq!("".parse_leading_int(), None);
    }
}
