use crate::error::{Error, Result};

/// Literal that starts every encoded record.
pub(crate) const SET_PREFIX: &str = "SET ";

/// Field delimiter of the line encoding.
pub(crate) const DELIMITER: char = ' ';

/// One `SET` write: the unit stored in the log and applied to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    value: String,
}

impl Record {
    /// Builds a record, rejecting anything the line encoding cannot carry.
    ///
    /// The key must be non-empty and may contain neither a space nor a newline.
    /// The value must be non-empty and may contain spaces but no newline.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(Error::Malformed("key is empty".to_string()));
        }
        if key.contains(DELIMITER) || key.contains('\n') {
            return Err(Error::Malformed(format!(
                "key {key:?} contains a delimiter"
            )));
        }
        if value.is_empty() {
            return Err(Error::Malformed(format!("value for key {key:?} is empty")));
        }
        if value.contains('\n') {
            return Err(Error::Malformed(format!(
                "value for key {key:?} contains a newline"
            )));
        }

        Ok(Self { key, value })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }

    /// Encodes the record as one log line, terminator included.
    pub fn encode(&self) -> String {
        format!("{SET_PREFIX}{}{DELIMITER}{}\n", self.key, self.value)
    }

    /// Decodes one log line (without its `\n`).
    ///
    /// A line is a record iff it starts with `SET ` and splitting it on spaces at
    /// most twice yields three fields. Everything after the second space is the
    /// value verbatim, so `SET k ` decodes to an empty value.
    pub fn decode(line: &str) -> Option<Self> {
        if !line.starts_with(SET_PREFIX) {
            return None;
        }

        let mut fields = line.splitn(3, DELIMITER);
        let (_, key, value) = (fields.next()?, fields.next()?, fields.next()?);

        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_set_prefix_and_single_spaces() {
        let record = Record::new("name", "Ada Lovelace").unwrap();
        assert_eq!(record.encode(), "SET name Ada Lovelace\n");
    }

    #[test]
    fn decode_keeps_spaces_in_value() {
        let record = Record::decode("SET a hello world").unwrap();
        assert_eq!(record.key(), "a");
        assert_eq!(record.value(), "hello world");
    }

    #[test]
    fn decode_keeps_leading_and_trailing_value_spaces() {
        let record = Record::decode("SET a  padded ").unwrap();
        assert_eq!(record.value(), " padded ");
    }

    #[test]
    fn decode_trailing_delimiter_is_empty_value() {
        let record = Record::decode("SET k ").unwrap();
        assert_eq!(record.key(), "k");
        assert_eq!(record.value(), "");
    }

    #[test]
    fn decode_does_not_strip_carriage_return() {
        let record = Record::decode("SET k v\r").unwrap();
        assert_eq!(record.value(), "v\r");
    }

    #[test]
    fn decode_rejects_malformed_lines() {
        for line in ["", "GARBAGE", "SET", "SET k", "SET ", "set k v", " SET k v", "GET k"] {
            assert_eq!(Record::decode(line), None, "line {line:?}");
        }
    }

    #[test]
    fn decode_accepts_what_it_encodes() {
        let record = Record::new("k", "v with  spaces").unwrap();
        let line = record.encode();
        assert_eq!(Record::decode(line.trim_end_matches('\n')), Some(record));
    }

    #[test]
    fn new_rejects_unencodable_records() {
        assert!(Record::new("", "v").is_err());
        assert!(Record::new("a b", "v").is_err());
        assert!(Record::new("a\nb", "v").is_err());
        assert!(Record::new("k", "").is_err());
        assert!(Record::new("k", "line\nbreak").is_err());
    }

    #[test]
    fn new_rejection_is_malformed_not_storage() {
        let err = Record::new("", "v").unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
        assert!(!err.is_storage());
    }
}
