//! `.env`-style overlay file parsing.
//!
//! The grammar is the usual dotenv subset: one `KEY=value` per line, blank
//! lines and `#` comment lines skipped, an optional leading `export `, keys
//! and values trimmed. A value may be wrapped in single or double quotes —
//! the quotes are stripped and the inner text (including spaces) kept
//! verbatim. Unquoted values lose a trailing ` # comment`. Lines without a
//! `=` are skipped.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::EnvfillError;

/// Read and parse an overlay file into key/value pairs, in file order.
///
/// A missing file yields no pairs; any other I/O failure propagates.
pub(crate) fn load_env_file(path: &Path) -> Result<Vec<(String, String)>, EnvfillError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(EnvfillError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    Ok(contents.lines().filter_map(parse_line).collect())
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let rest = rest.trim();
    let value = match unquote(rest) {
        Some(inner) => inner,
        None => strip_inline_comment(rest),
    };

    Some((key.to_owned(), value.to_owned()))
}

/// Strip one level of matching surrounding quotes, if present.
fn unquote(value: &str) -> Option<&str> {
    let first = value.chars().next()?;
    if (first == '"' || first == '\'') && value.len() >= 2 && value.ends_with(first) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Cut an unquoted value at a `#` that follows whitespace. A `#` glued to
/// the value (`COLOR=#ff8800`) is part of it.
fn strip_inline_comment(value: &str) -> &str {
    match value.find('#') {
        Some(pos) if value[..pos].ends_with(char::is_whitespace) => value[..pos].trim_end(),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Vec<(String, String)> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        load_env_file(file.path()).unwrap()
    }

    fn owned(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_file_is_silently_empty() {
        let got = load_env_file(Path::new("definitely_does_not_exist.env")).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn empty_file_is_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn simple_pairs_in_order() {
        let got = parse("KEY1=value1\nKEY2=value2");
        assert_eq!(got, owned(&[("KEY1", "value1"), ("KEY2", "value2")]));
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let got = parse("# leading comment\n\nKEY3=value3\n# another\nKEY4=value4\n");
        assert_eq!(got, owned(&[("KEY3", "value3"), ("KEY4", "value4")]));
    }

    #[test]
    fn export_prefix_stripped() {
        let got = parse("export KEY1=value1\nexport KEY2='value2'");
        assert_eq!(got, owned(&[("KEY1", "value1"), ("KEY2", "value2")]));
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let got = parse("  KEY  =  value  ");
        assert_eq!(got, owned(&[("KEY", "value")]));
    }

    #[test]
    fn quoted_values_keep_inner_spaces() {
        let got = parse("VAR1=\" value with spaces \"\nVAR2='another value'");
        assert_eq!(
            got,
            owned(&[("VAR1", " value with spaces "), ("VAR2", "another value")])
        );
    }

    #[test]
    fn inline_comment_cut_from_unquoted_value() {
        let got = parse("VAR1=value1   # inline comment\nVAR2=value2");
        assert_eq!(got, owned(&[("VAR1", "value1"), ("VAR2", "value2")]));
    }

    #[test]
    fn hash_without_whitespace_stays_in_value() {
        let got = parse("COLOR=#ff8800");
        assert_eq!(got, owned(&[("COLOR", "#ff8800")]));
    }

    #[test]
    fn malformed_lines_skipped() {
        let got = parse("VAR1=value1\nmalformed_line\nVAR2=value2");
        assert_eq!(got, owned(&[("VAR1", "value1"), ("VAR2", "value2")]));
    }

    #[test]
    fn value_may_contain_equals() {
        let got = parse("KEY=value=with=equals");
        assert_eq!(got, owned(&[("KEY", "value=with=equals")]));
    }
}
