use super::lexer::{Lexer, Token};
use super::{Dict, Value};
use crate::{Error, ErrorKind};

const MAX_DEPTH: usize = 64;

/// Parse a property list document whose root value is a dictionary
pub fn parse(data: &[u8]) -> Result<Dict, Error> {
    let text = std::str::from_utf8(data).map_err(|e| {
        Error::new(ErrorKind::Utf8 {
            offset: e.valid_up_to(),
        })
    })?;

    let mut parser = Parser {
        lexer: Lexer::new(text),
        depth: 0,
    };

    match parser.lexer.next_token()? {
        Some(Token::Open { name: "plist", empty: false }) => {}
        Some(Token::Open { name: "dict", .. }) | Some(Token::Open { name: "d", .. }) => {
            return Err(parser.lexer.error("missing plist root element"));
        }
        Some(Token::Open { name: "plist", empty: true }) | None => return Ok(Dict::new()),
        Some(_) => return Err(parser.lexer.error("expected plist root element")),
    }

    let root = match parser.lexer.next_token()? {
        Some(Token::Close { name: "plist" }) => return Ok(Dict::new()),
        Some(Token::Open { name, empty }) => parser.value(name, empty)?,
        _ => return Err(parser.lexer.error("expected root value")),
    };

    match parser.lexer.next_token()? {
        Some(Token::Close { name: "plist" }) => {}
        _ => return Err(parser.lexer.error("expected end of plist")),
    }

    match root {
        Value::Dict(dict) => Ok(dict),
        _ => Err(parser.lexer.error("root value is not a dictionary")),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn value(&mut self, name: &'a str, empty: bool) -> Result<Value, Error> {
        match name {
            "d" | "dict" => {
                if empty {
                    Ok(Value::Dict(Dict::new()))
                } else {
                    self.nested(|p| p.dict(name)).map(Value::Dict)
                }
            }
            "a" | "array" => {
                if empty {
                    Ok(Value::Array(Vec::new()))
                } else {
                    self.nested(|p| p.array(name)).map(Value::Array)
                }
            }
            "s" | "string" => self.scalar(name, empty).map(Value::String),
            "i" | "integer" => {
                let text = self.scalar(name, empty)?;
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Value::Integer(0));
                }
                text.parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| self.lexer.error(format!("invalid integer {:?}", text)))
            }
            "r" | "real" => {
                let text = self.scalar(name, empty)?;
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Value::Real(0.0));
                }
                text.parse::<f64>()
                    .map(Value::Real)
                    .map_err(|_| self.lexer.error(format!("invalid real {:?}", text)))
            }
            "t" | "true" => self.flag(name, empty, true),
            "f" | "false" => self.flag(name, empty, false),
            _ => Err(self.lexer.error(format!("unknown tag <{}>", name))),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.lexer.error("nesting too deep"));
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn dict(&mut self, tag: &str) -> Result<Dict, Error> {
        let mut dict = Dict::new();
        loop {
            match self.lexer.next_token()? {
                Some(Token::Close { name }) if name == tag => return Ok(dict),
                Some(Token::Open { name: "k", empty }) | Some(Token::Open { name: "key", empty }) => {
                    let key = if empty {
                        String::new()
                    } else {
                        let key = self.lexer.read_text()?.into_owned();
                        self.expect_close("k", "key")?;
                        key
                    };

                    let value = match self.lexer.next_token()? {
                        Some(Token::Open { name, empty }) => self.value(name, empty)?,
                        _ => return Err(self.lexer.error(format!("missing value for key {}", key))),
                    };
                    dict.insert(key, value);
                }
                _ => return Err(self.lexer.error("expected key in dictionary")),
            }
        }
    }

    fn array(&mut self, tag: &str) -> Result<Vec<Value>, Error> {
        let mut values = Vec::new();
        loop {
            match self.lexer.next_token()? {
                Some(Token::Close { name }) if name == tag => return Ok(values),
                Some(Token::Open { name, empty }) => values.push(self.value(name, empty)?),
                _ => return Err(self.lexer.error("expected value in array")),
            }
        }
    }

    fn scalar(&mut self, name: &str, empty: bool) -> Result<String, Error> {
        if empty {
            return Ok(String::new());
        }

        let text = self.lexer.read_text()?.into_owned();
        self.expect_close(name, name)?;
        Ok(text)
    }

    fn flag(&mut self, name: &str, empty: bool, value: bool) -> Result<Value, Error> {
        if !empty {
            self.lexer.read_text()?;
            self.expect_close(name, name)?;
        }
        Ok(Value::Bool(value))
    }

    fn expect_close(&mut self, short: &str, long: &str) -> Result<(), Error> {
        match self.lexer.next_token()? {
            Some(Token::Close { name }) if name == short || name == long => Ok(()),
            _ => Err(self.lexer.error(format!("expected </{}>", short))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> String {
        format!(r#"<?xml version="1.0"?><plist version="1.0" gjver="2.0">{}</plist>"#, body)
    }

    #[test]
    fn short_and_long_tags() {
        let data = doc("<dict><k>a</k><i>1</i><key>b</key><d><k>c</k><s>x &amp; y</s><k>d</k><t/><k>e</k><false/></d><k>f</k><real>1.5</real></dict>");
        let dict = parse(data.as_bytes()).unwrap();
        assert_eq!(dict["a"], Value::Integer(1));
        assert_eq!(dict["f"], Value::Real(1.5));
        let nested = dict["b"].as_dict().unwrap();
        assert_eq!(nested["c"], Value::from("x & y"));
        assert_eq!(nested["d"], Value::Bool(true));
        assert_eq!(nested["e"], Value::Bool(false));
    }

    #[test]
    fn empty_values() {
        let data = doc("<dict><k>a</k><s></s><k>b</k><s/><k>c</k><d/><k>d</k><array><i>1</i><i>2</i></array></dict>");
        let dict = parse(data.as_bytes()).unwrap();
        assert_eq!(dict["a"], Value::from(""));
        assert_eq!(dict["b"], Value::from(""));
        assert_eq!(dict["c"], Value::Dict(Dict::new()));
        assert_eq!(dict["d"], Value::Array(vec![Value::from(1), Value::from(2)]));
    }

    #[test]
    fn empty_document() {
        assert!(parse(doc("").as_bytes()).unwrap().is_empty());
        assert!(parse(b"").unwrap().is_empty());
    }

    #[test]
    fn malformed_documents() {
        assert!(parse(doc("<dict><k>a</k></dict>").as_bytes()).is_err());
        assert!(parse(doc("<dict><k>a</k><i>x</i></dict>").as_bytes()).is_err());
        assert!(parse(doc("<dict><k>a</k><zz/></dict>").as_bytes()).is_err());
        assert!(parse(doc("<dict><k>a</k><i>1</i>").as_bytes()).is_err());
        assert!(parse(doc("<s>a</s>").as_bytes()).is_err());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut body = String::from("<dict>");
        for _ in 0..100 {
            body.push_str("<k>a</k><d>");
        }
        let err = parse(doc(&body).as_bytes()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Plist { .. }));
    }
}
