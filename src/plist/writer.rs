use super::{Dict, Value};
use crate::text::float_str;

const DECLARATION: &str = r#"<?xml version="1.0"?>"#;
const PLIST_OPEN: &str = r#"<plist version="1.0" gjver="2.0">"#;
const PLIST_CLOSE: &str = "</plist>";

/// Construct a customized property list writer
///
/// The defaults match how the game writes its own saves: short tags after the
/// root dictionary and falsy values omitted.
///
/// ```
/// use robtop::plist::{Dict, PlistWriter, Value};
///
/// let mut dict = Dict::new();
/// dict.insert(String::from("a"), Value::from(1));
/// dict.insert(String::from("b"), Value::from(0));
/// dict.insert(String::from("c"), Value::Bool(true));
///
/// let short = PlistWriter::builder().declaration(false).build().write(&dict);
/// assert_eq!(short, r#"<plist version="1.0" gjver="2.0"><dict><k>a</k><i>1</i><k>c</k><t /></dict></plist>"#);
///
/// let long = PlistWriter::builder()
///     .declaration(false)
///     .short(false)
///     .ignore_falsy(false)
///     .build()
///     .write(&dict);
/// assert_eq!(long, r#"<plist version="1.0" gjver="2.0"><dict><key>a</key><integer>1</integer><key>b</key><integer>0</integer><key>c</key><true /></dict></plist>"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlistWriterBuilder {
    short: bool,
    ignore_falsy: bool,
    declaration: bool,
}

impl Default for PlistWriterBuilder {
    fn default() -> Self {
        PlistWriterBuilder {
            short: true,
            ignore_falsy: true,
            declaration: true,
        }
    }
}

impl PlistWriterBuilder {
    /// Use single letter tags below the root dictionary
    pub fn short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    /// Drop zeros, empty strings, empty containers and false values
    pub fn ignore_falsy(mut self, ignore_falsy: bool) -> Self {
        self.ignore_falsy = ignore_falsy;
        self
    }

    /// Emit the `<?xml?>` declaration
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn build(self) -> PlistWriter {
        PlistWriter { options: self }
    }
}

struct Tags {
    dict: &'static str,
    key: &'static str,
    string: &'static str,
    integer: &'static str,
    real: &'static str,
    truthy: &'static str,
    falsy: &'static str,
    array: &'static str,
}

const SHORT: Tags = Tags {
    dict: "d",
    key: "k",
    string: "s",
    integer: "i",
    real: "r",
    truthy: "t",
    falsy: "f",
    array: "a",
};

const LONG: Tags = Tags {
    dict: "dict",
    key: "key",
    string: "string",
    integer: "integer",
    real: "real",
    truthy: "true",
    falsy: "false",
    array: "array",
};

/// Writes a dictionary as a property list document
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistWriter {
    options: PlistWriterBuilder,
}

impl PlistWriter {
    pub fn builder() -> PlistWriterBuilder {
        PlistWriterBuilder::default()
    }

    /// Write the document with the dictionary as the root value
    pub fn write(&self, root: &Dict) -> String {
        let mut out = String::new();
        if self.options.declaration {
            out.push_str(DECLARATION);
        }
        out.push_str(PLIST_OPEN);
        self.write_dict(&mut out, root, LONG.dict);
        out.push_str(PLIST_CLOSE);
        out
    }

    fn tags(&self) -> &'static Tags {
        if self.options.short {
            &SHORT
        } else {
            &LONG
        }
    }

    fn write_dict(&self, out: &mut String, dict: &Dict, tag: &str) {
        let tags = self.tags();
        open(out, tag);
        for (key, value) in dict {
            if self.options.ignore_falsy && value.is_falsy() {
                continue;
            }
            open(out, tags.key);
            escape(out, key);
            close(out, tags.key);
            self.write_value(out, value);
        }
        close(out, tag);
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        let tags = self.tags();
        match value {
            Value::Dict(dict) => self.write_dict(out, dict, tags.dict),
            Value::Array(values) => {
                open(out, tags.array);
                for value in values {
                    if !(self.options.ignore_falsy && value.is_falsy()) {
                        self.write_value(out, value);
                    }
                }
                close(out, tags.array);
            }
            Value::String(x) if x.is_empty() => empty(out, tags.string),
            Value::String(x) => {
                open(out, tags.string);
                escape(out, x);
                close(out, tags.string);
            }
            Value::Integer(x) => {
                open(out, tags.integer);
                out.push_str(&x.to_string());
                close(out, tags.integer);
            }
            Value::Real(x) => {
                open(out, tags.real);
                out.push_str(&float_str(*x));
                close(out, tags.real);
            }
            Value::Bool(true) => empty(out, tags.truthy),
            Value::Bool(false) => empty(out, tags.falsy),
        }
    }
}

fn open(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn empty(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" />");
}

fn escape(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plist::{array_from_values, parse};

    #[test]
    fn nested_round_trip() {
        let mut inner = Dict::new();
        inner.insert(String::from("name"), Value::from("a < b & \"c\""));
        inner.insert(String::from("size"), Value::Real(2.25));

        let mut root = Dict::new();
        root.insert(String::from("inner"), Value::Dict(inner));
        root.insert(String::from("list"), Value::Dict(array_from_values(vec![Value::from(5), Value::from(6)])));
        root.insert(String::from("flag"), Value::Bool(true));

        for short in [true, false] {
            let text = PlistWriter::builder().short(short).build().write(&root);
            assert_eq!(parse(text.as_bytes()).unwrap(), root);
        }
    }

    #[test]
    fn nested_dicts_use_short_tag() {
        let mut inner = Dict::new();
        inner.insert(String::from("x"), Value::from(1));
        let mut root = Dict::new();
        root.insert(String::from("a"), Value::Dict(inner));
        let text = PlistWriter::builder().declaration(false).build().write(&root);
        assert!(text.contains("<dict><k>a</k><d><k>x</k><i>1</i></d></dict>"));
    }

    #[test]
    fn falsy_values_are_dropped() {
        let mut root = Dict::new();
        root.insert(String::from("a"), Value::from(""));
        root.insert(String::from("b"), Value::Real(0.0));
        root.insert(String::from("c"), Value::Bool(false));
        root.insert(String::from("d"), Value::Dict(Dict::new()));
        let text = PlistWriter::builder().build().write(&root);
        assert!(parse(text.as_bytes()).unwrap().is_empty());
    }
}
