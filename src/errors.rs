use std::fmt;

/// An error that can occur when decoding RobTop text, plist or binary data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }

    pub(crate) fn eof(offset: usize, needed: usize) -> Error {
        Error::new(ErrorKind::Eof { offset, needed })
    }

    pub(crate) fn token(key: &str, token: &str, expected: &'static str) -> Error {
        Error::new(ErrorKind::Token {
            key: key.to_string(),
            token: token.to_string(),
            expected,
        })
    }

    pub(crate) fn schema(record: &'static str, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::Schema {
            record,
            message: message.into(),
        })
    }

    pub(crate) fn in_section(self, section: &str) -> Error {
        Error::new(ErrorKind::Section {
            section: section.to_string(),
            source: self,
        })
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// Unexpected end of input while reading a fixed width value
    Eof { offset: usize, needed: usize },

    /// A length prefixed sequence claims more data than what remains
    SequenceLength { offset: usize, count: usize },

    /// A count or length is too large for the prefix it is written into
    CountOverflow { offset: usize, count: usize },

    /// A text token could not be parsed as the type that its key demands
    Token {
        key: String,
        token: String,
        expected: &'static str,
    },

    /// The data does not have the shape that the record requires
    Schema {
        record: &'static str,
        message: String,
    },

    /// An unknown binary tag in a position where decoding can't continue
    Discriminant {
        record: &'static str,
        tag: i64,
        offset: usize,
    },

    /// Malformed property list
    Plist { offset: usize, message: String },

    /// Invalid base64 character
    Base64 { position: usize },

    /// Invalid UTF-8 within a binary string
    Utf8 { offset: usize },

    /// A save section failed to decode
    Section { section: String, source: Error },

    /// The external save transform failed
    Compression(String),
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { offset, .. } => Some(offset),
            ErrorKind::SequenceLength { offset, .. } => Some(offset),
            ErrorKind::CountOverflow { offset, .. } => Some(offset),
            ErrorKind::Discriminant { offset, .. } => Some(offset),
            ErrorKind::Plist { offset, .. } => Some(offset),
            ErrorKind::Base64 { position } => Some(position),
            ErrorKind::Utf8 { offset } => Some(offset),
            ErrorKind::Section { ref source, .. } => source.offset(),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Section { ref source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Eof { offset, needed } => write!(
                f,
                "unexpected end of input, needed {} more bytes (offset: {})",
                needed, offset
            ),
            ErrorKind::SequenceLength { offset, count } => write!(
                f,
                "sequence of {} elements exceeds remaining input (offset: {})",
                count, offset
            ),
            ErrorKind::CountOverflow { offset, count } => write!(
                f,
                "count of {} does not fit its prefix (offset: {})",
                count, offset
            ),
            ErrorKind::Token {
                ref key,
                ref token,
                expected,
            } => write!(
                f,
                "unable to parse {:?} as {} (key: {})",
                token, expected, key
            ),
            ErrorKind::Schema {
                record,
                ref message,
            } => write!(f, "invalid {}: {}", record, message),
            ErrorKind::Discriminant {
                record,
                tag,
                offset,
            } => write!(
                f,
                "unknown {} tag encountered (tag: {}, offset: {})",
                record, tag, offset
            ),
            ErrorKind::Plist { offset, ref message } => {
                write!(f, "malformed plist: {} (offset: {})", message, offset)
            }
            ErrorKind::Base64 { position } => {
                write!(f, "invalid base64 character (position: {})", position)
            }
            ErrorKind::Utf8 { offset } => write!(f, "invalid utf-8 string (offset: {})", offset),
            ErrorKind::Section {
                ref section,
                ref source,
            } => write!(f, "section {}: {}", section, source),
            ErrorKind::Compression(ref msg) => write!(f, "save transform failed: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_offset_is_inherited() {
        let err = Error::eof(12, 4).in_section("GS_value");
        assert_eq!(err.offset(), Some(12));
        assert_eq!(
            err.to_string(),
            "section GS_value: unexpected end of input, needed 4 more bytes (offset: 12)"
        );
    }

    #[test]
    fn token_error_names_key() {
        let err = Error::token("k18", "abc", "an integer");
        assert!(err.to_string().contains("k18"));
        assert_eq!(err.offset(), None);
    }
}
