//! Generic delimited-table to JSON parser with encoding and delimiter
//! auto-detection.
//!
//! Converts table rows into JSON objects keyed by header. No network-specific
//! logic here; typed extraction lives in [`crate::models`].

use serde_json::{json, Map, Value};
use std::path::Path;

/// Table parsing error with line context
#[derive(Debug, Clone)]
pub struct TableError {
    pub line: usize,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.column, &self.value) {
            (Some(col), Some(val)) => {
                write!(f, "Line {}, column '{}' (value '{}'): {}", self.line, col, val, self.message)
            }
            (Some(col), None) => {
                write!(f, "Line {}, column '{}': {}", self.line, col, self.message)
            }
            _ => {
                write!(f, "Line {}: {}", self.line, self.message)
            }
        }
    }
}

impl std::error::Error for TableError {}

impl TableError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows as JSON objects
    pub records: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> Result<String, TableError> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => {
            String::from_utf8(bytes.to_vec())
                .or_else(|_| Ok(String::from_utf8_lossy(bytes).to_string()))
        }
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => {
            Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string())
        }
        _ => {
            // Fallback: try UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
    .map_err(|e: std::string::FromUtf8Error| TableError::new(0, format!("Encoding error: {}", e)))
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// Network tables from inference runs are tab-separated; tab is also the
/// fallback when no candidate appears in the header.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = ['\t', ',', ';', '|'];
    let mut best_sep = '\t';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a delimited table into JSON objects with explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers.
///
/// # Example
/// ```ignore
/// use grnmerge::table_to_json;
///
/// let tsv = "regulator\ttarget\tbeta.sign.sum\nATF1\tMYC\t12.0";
/// let rows = table_to_json(tsv, '\t').unwrap();
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["regulator"], "ATF1");
/// assert_eq!(rows[0]["beta.sign.sum"], "12.0");
/// ```
pub fn table_to_json(content: &str, delimiter: char) -> Result<Vec<Value>, TableError> {
    parse_string_with_metadata(content, delimiter, "utf-8".to_string()).map(|r| r.records)
}

/// Parse a table file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_table_file_auto("network_BBSR_ChromPrior.tsv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.records.len());
/// ```
pub fn parse_table_file_auto<P: AsRef<Path>>(path: P) -> Result<ParseResult, TableError> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| TableError::new(0, format!("Cannot read file: {}", e)))?;

    parse_table_bytes_auto(&bytes)
}

/// Parse table bytes with auto-detection of encoding and delimiter.
pub fn parse_table_bytes_auto(bytes: &[u8]) -> Result<ParseResult, TableError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse a table string with explicit delimiter and return metadata.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> Result<ParseResult, TableError> {
    let mut lines = content.lines();

    // Headers come from the first line
    let header_line = lines.next()
        .ok_or_else(|| TableError::new(1, "Empty table file"))?;

    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|s| s.trim().trim_matches('"').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(TableError::new(1, "No headers found"));
    }

    // Parse data rows
    let mut records = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        let mut obj = Map::new();

        for (i, header) in headers.iter().enumerate() {
            let raw_value = values.get(i)
                .map(|s| s.trim().trim_matches('"'))
                .unwrap_or("");

            obj.insert(header.clone(), json!(raw_value));
        }

        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tsv() {
        let tsv = "regulator\ttarget\tbeta.sign.sum\nATF1\tMYC\t12.0\nJUN\tFOS\t-3.5";
        let rows = table_to_json(tsv, '\t').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["regulator"], "ATF1");
        assert_eq!(rows[0]["target"], "MYC");
        assert_eq!(rows[0]["beta.sign.sum"], "12.0");
        assert_eq!(rows[1]["beta.sign.sum"], "-3.5");
    }

    #[test]
    fn test_comma_delimiter() {
        let csv = "a,b,c\n1,2,3";
        let rows = table_to_json(csv, ',').unwrap();

        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "2");
        assert_eq!(rows[0]["c"], "3");
    }

    #[test]
    fn test_quoted_values() {
        let tsv = "regulator\ttarget\n\"RFXANK\"\t\"HLA-DRA\"";
        let rows = table_to_json(tsv, '\t').unwrap();

        assert_eq!(rows[0]["regulator"], "RFXANK");
        assert_eq!(rows[0]["target"], "HLA-DRA");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let tsv = "a\tb\n1\t2\n\n3\t4\n";
        let rows = table_to_json(tsv, '\t').unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_values_read_as_empty() {
        let tsv = "regulator\ttarget\tbeta.sign.sum\nATF1\tMYC";
        let rows = table_to_json(tsv, '\t').unwrap();

        assert_eq!(rows[0]["regulator"], "ATF1");
        assert_eq!(rows[0]["beta.sign.sum"], "");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let tsv = "a\tb\n1\t2\t3\t4";
        let rows = table_to_json(tsv, '\t').unwrap();

        assert_eq!(rows[0]["a"], "1");
        assert_eq!(rows[0]["b"], "2");
    }

    #[test]
    fn test_error_message_format() {
        let err = TableError::new(5, "Invalid value")
            .with_column("beta.sign.sum")
            .with_value("abc");

        let msg = err.to_string();
        assert!(msg.contains("Line 5"));
        assert!(msg.contains("column 'beta.sign.sum'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_empty_table_error() {
        let result = table_to_json("", '\t');
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.message.contains("Empty"));
    }

    #[test]
    fn test_detect_delimiter_tab() {
        let content = "regulator\ttarget\tbeta.sign.sum\nATF1\tMYC\t1.0";
        assert_eq!(detect_delimiter(content), '\t');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        let content = "a,b,c\n1,2,3";
        assert_eq!(detect_delimiter(content), ',');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_tab() {
        let content = "single_column\nvalue";
        assert_eq!(detect_delimiter(content), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let tsv = "regulator\ttarget\tbeta.sign.sum\nATF1\tMYC\t12.0\nJUN\tFOS\t-3.5";
        let result = parse_table_bytes_auto(tsv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, '\t');
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.headers, vec!["regulator", "target", "beta.sign.sum"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }
}
