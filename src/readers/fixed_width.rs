use crate::error::{GhcndError, Result};

/// One fixed-width column: 1-indexed inclusive start, as the archive
/// documentation numbers columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub start: usize,
    pub len: usize,
}

/// Shorthand for building column tables.
pub const fn col(start: usize, len: usize) -> ColumnSpec {
    ColumnSpec { start, len }
}

impl ColumnSpec {
    /// Extract the raw column text, untrimmed. Fails if the line is too
    /// short or the slice is not on a character boundary.
    pub fn extract<'a>(&self, line: &'a str, line_no: usize) -> Result<&'a str> {
        let begin = self.start - 1;
        line.get(begin..begin + self.len).ok_or_else(|| {
            GhcndError::malformed(
                line_no,
                format!(
                    "line of {} chars is too short for columns {}-{}",
                    line.len(),
                    self.start,
                    self.start + self.len - 1
                ),
            )
        })
    }

    /// Extract and trim the column text.
    pub fn field_str<'a>(&self, line: &'a str, line_no: usize) -> Result<&'a str> {
        Ok(self.extract(line, line_no)?.trim())
    }

    pub fn field_i32(&self, line: &str, line_no: usize) -> Result<i32> {
        let text = self.field_str(line, line_no)?;
        text.parse::<i32>().map_err(|_| {
            GhcndError::malformed(
                line_no,
                format!("expected integer in columns {}..: '{}'", self.start, text),
            )
        })
    }

    pub fn field_f64(&self, line: &str, line_no: usize) -> Result<f64> {
        let text = self.field_str(line, line_no)?;
        text.parse::<f64>().map_err(|_| {
            GhcndError::malformed(
                line_no,
                format!("expected float in columns {}..: '{}'", self.start, text),
            )
        })
    }

    /// Extract a single-character flag column, space when blank.
    pub fn field_char(&self, line: &str, line_no: usize) -> Result<char> {
        Ok(self.extract(line, line_no)?.chars().next().unwrap_or(' '))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_columns() {
        let line = "USW00094728  40.7789  -73.9692   39.6";
        assert_eq!(col(1, 11).field_str(line, 1).unwrap(), "USW00094728");
        assert!((col(13, 8).field_f64(line, 1).unwrap() - 40.7789).abs() < 1e-9);
        assert!((col(22, 9).field_f64(line, 1).unwrap() - -73.9692).abs() < 1e-9);
    }

    #[test]
    fn test_signed_integer_field() {
        let line = "xxxx-9999yyy";
        assert_eq!(col(5, 5).field_i32(line, 1).unwrap(), -9999);
    }

    #[test]
    fn test_short_line_is_malformed() {
        let err = col(13, 8).field_str("USW00094728", 7).unwrap_err();
        match err {
            GhcndError::MalformedRecord { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        assert!(col(1, 4).field_i32("abcd", 1).is_err());
        assert!(col(1, 4).field_f64("abcd", 1).is_err());
    }

    #[test]
    fn test_flag_field_blank_is_space() {
        assert_eq!(col(4, 1).field_char("ab c", 1).unwrap(), 'c');
        assert_eq!(col(3, 1).field_char("ab c", 1).unwrap(), ' ');
    }
}
