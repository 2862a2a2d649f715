//! Quote-aware field splitting
//!
//! A comma separates fields unless it sits inside a double-quoted span,
//! judged by the number of `"` between the comma and the end of the line:
//! an even count (including zero) means the comma is a separator. Quotes are
//! kept in the field text. Empty fields, trailing ones included, are kept.

use heapless::Vec;

/// Most fields any inbound command carries
pub const MAX_FIELDS: usize = 7;

/// Fields of one line
///
/// Only the first [`MAX_FIELDS`] are stored; [`count`](Fields::count)
/// still reports how many the line had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    fields: Vec<&'a str, MAX_FIELDS>,
    count: usize,
}

impl<'a> Fields<'a> {
    /// Number of fields in the line
    pub fn count(&self) -> usize {
        self.count
    }

    /// Field at `index`, if stored
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// The stored fields
    pub fn as_slice(&self) -> &[&'a str] {
        &self.fields
    }
}

/// Split a line into fields
///
/// A line without separators is a single field, so `""` yields one empty
/// field.
pub fn split_fields(line: &str) -> Fields<'_> {
    let mut quotes_after = line.bytes().filter(|&b| b == b'"').count();
    let mut fields = Vec::new();
    let mut count = 0;
    let mut start = 0;

    for (i, b) in line.bytes().enumerate() {
        match b {
            b'"' => quotes_after -= 1,
            b',' if quotes_after % 2 == 0 => {
                let _ = fields.push(&line[start..i]);
                count += 1;
                start = i + 1;
            }
            _ => {}
        }
    }

    // Overflow past MAX_FIELDS is counted, not stored
    let _ = fields.push(&line[start..]);
    count += 1;

    Fields { fields, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        let f = split_fields("4,#FF00FF00,1,1,1,3,3");
        assert_eq!(f.count(), 7);
        assert_eq!(f.as_slice(), &["4", "#FF00FF00", "1", "1", "1", "3", "3"]);
    }

    #[test]
    fn test_empty_fields_kept() {
        let f = split_fields("4,,,,0,,");
        assert_eq!(f.count(), 7);
        assert_eq!(f.get(4), Some("0"));
        assert_eq!(f.get(5), Some(""));
        assert_eq!(f.get(6), Some(""));
    }

    #[test]
    fn test_empty_line_is_one_field() {
        let f = split_fields("");
        assert_eq!(f.count(), 1);
        assert_eq!(f.get(0), Some(""));
    }

    #[test]
    fn test_quoted_comma_not_split() {
        let f = split_fields("3,2,\"Blue, Dot\"");
        assert_eq!(f.count(), 3);
        assert_eq!(f.get(2), Some("\"Blue, Dot\""));
    }

    #[test]
    fn test_unbalanced_quote() {
        // Commas before the lone quote see an odd count and are not separators
        let f = split_fields("a,b\",c");
        assert_eq!(f.count(), 2);
        assert_eq!(f.as_slice(), &["a,b\"", "c"]);
    }

    #[test]
    fn test_overflow_counted() {
        let f = split_fields("1,2,3,4,5,6,7,8,9");
        assert_eq!(f.count(), 9);
        assert_eq!(f.as_slice().len(), MAX_FIELDS);
        assert_eq!(f.get(6), Some("7"));
        assert_eq!(f.get(7), None);
    }
}
