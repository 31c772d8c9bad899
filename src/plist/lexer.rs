use crate::{Error, ErrorKind};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// `<name ...>` or `<name .../>`
    Open { name: &'a str, empty: bool },

    /// `</name>`
    Close { name: &'a str },

    /// Character data between tags with entities resolved
    Text(Cow<'a, str>),
}

/// Splits XML into tags and text, skipping the declaration, doctype and
/// comments
#[derive(Debug)]
pub(crate) struct Lexer<'a> {
    data: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a str) -> Self {
        Lexer { data, position: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::Plist {
            offset: self.position,
            message: message.into(),
        })
    }

    fn rest(&self) -> &'a str {
        &self.data[self.position..]
    }

    fn skip_until(&mut self, terminator: &str) -> Result<(), Error> {
        match self.rest().find(terminator) {
            Some(idx) => {
                self.position += idx + terminator.len();
                Ok(())
            }
            None => Err(self.error(format!("unterminated markup, expected {}", terminator))),
        }
    }

    /// Next token, skipping whitespace-only text
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, Error> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }

            if rest.starts_with("<?") {
                self.skip_until("?>")?;
            } else if rest.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if rest.starts_with("<!") {
                self.skip_until(">")?;
            } else if rest.starts_with('<') {
                return self.read_tag().map(Some);
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                let text = &rest[..end];
                let start = self.position;
                self.position += end;
                if !text.trim().is_empty() {
                    return unescape(text, start).map(|x| Some(Token::Text(x)));
                }
            }
        }
    }

    /// Text up to the next tag, which may be empty
    pub fn read_text(&mut self) -> Result<Cow<'a, str>, Error> {
        let rest = self.rest();
        let end = rest.find('<').unwrap_or(rest.len());
        let start = self.position;
        self.position += end;
        unescape(&rest[..end], start)
    }

    fn read_tag(&mut self) -> Result<Token<'a>, Error> {
        let rest = self.rest();
        let end = rest
            .find('>')
            .ok_or_else(|| self.error("unterminated tag"))?;
        let inner = &rest[1..end];
        self.position += end + 1;

        if let Some(name) = inner.strip_prefix('/') {
            return Ok(Token::Close { name: name.trim() });
        }

        let (inner, empty) = match inner.strip_suffix('/') {
            Some(x) => (x, true),
            None => (inner, false),
        };

        let name = inner
            .split(|c: char| c.is_ascii_whitespace())
            .next()
            .unwrap_or("");
        if name.is_empty() {
            return Err(self.error("empty tag name"));
        }

        Ok(Token::Open { name, empty })
    }
}

fn unescape(text: &str, offset: usize) -> Result<Cow<'_, str>, Error> {
    if !text.contains('&') {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let end = after.find(';').ok_or_else(|| {
            Error::new(ErrorKind::Plist {
                offset: offset + text.len() - rest.len() + idx,
                message: String::from("unterminated entity"),
            })
        })?;
        let entity = &after[..end];
        let c = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|x| u32::from_str_radix(x, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|x| x.parse().ok()))
                .and_then(char::from_u32),
        };

        let c = c.ok_or_else(|| {
            Error::new(ErrorKind::Plist {
                offset: offset + text.len() - rest.len() + idx,
                message: format!("unknown entity &{};", entity),
            })
        })?;
        out.push(c);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        let mut lexer = Lexer::new(r#"<?xml version="1.0"?><plist version="1.0"><d><k>a</k><t /></d></plist>"#);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token().unwrap() {
            tokens.push(token);
        }

        assert_eq!(
            tokens,
            vec![
                Token::Open { name: "plist", empty: false },
                Token::Open { name: "d", empty: false },
                Token::Open { name: "k", empty: false },
                Token::Text(Cow::Borrowed("a")),
                Token::Close { name: "k" },
                Token::Open { name: "t", empty: true },
                Token::Close { name: "d" },
                Token::Close { name: "plist" },
            ]
        );
    }

    #[test]
    fn entities() {
        assert_eq!(unescape("a &amp; b &lt;&#65;&#x42;", 0).unwrap(), "a & b <AB");
        assert!(unescape("&bogus;", 0).is_err());
        assert!(unescape("&amp", 0).is_err());
    }
}
