//! Source syntaxes a configuration document can be written in.
//!
//! JSON and YAML go straight to their serde parsers. The JavaScript form
//! (`tailwind.config.js`) is a module exporting a single object literal,
//! usually behind `module.exports =` or `export default`. It is read by a
//! small recursive-descent parser that accepts literal data only: objects,
//! arrays, strings in any quote style, numbers, `true`/`false`/`null` and
//! `require('<module>')`. Comments and trailing commas are allowed. Any other
//! expression is a [`ConfigError::ParseError`] carrying the source line.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::loader::ConfigError;

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Plain JSON.
    Json,
    /// YAML.
    Yaml,
    /// A JavaScript module exporting an object literal.
    JavaScript,
}

impl SourceFormat {
    /// Pick the syntax from a file extension; unknown extensions are JavaScript.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::JavaScript,
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::JavaScript => "js",
        }
    }
}

/// Parse source text into an untyped value.
pub(crate) fn parse_source(contents: &str, format: SourceFormat) -> Result<Value, ConfigError> {
    match format {
        SourceFormat::Json => serde_json::from_str(contents).map_err(|e| ConfigError::ParseError {
            line: Some(e.line()),
            message: e.to_string(),
        }),
        SourceFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        }),
        SourceFormat::JavaScript => parse_js(contents),
    }
}

fn wrapper_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:module\s*\.\s*exports\s*=|export\s+default\b)")
            .expect("wrapper pattern is valid")
    })
}

/// Parse a JavaScript module whose only statement exports an object literal.
pub(crate) fn parse_js(source: &str) -> Result<Value, ConfigError> {
    let mut parser = LiteralParser::new(source);

    parser.skip_trivia()?;
    parser.skip_module_wrapper();
    parser.skip_trivia()?;

    let value = match parser.peek() {
        Some('{' | '[') => parser.parse_value()?,
        _ => return Err(parser.error("expected an object literal")),
    };

    parser.skip_trivia()?;
    if parser.peek() == Some(';') {
        parser.bump();
        parser.skip_trivia()?;
    }
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.unexpected(c)),
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct LiteralParser<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.chars
            .get(pos)
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn line_at(&self, pos: usize) -> usize {
        self.source[..self.byte_offset(pos)].matches('\n').count() + 1
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ConfigError {
        ConfigError::ParseError {
            line: Some(self.line_at(pos)),
            message: message.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        self.error_at(self.pos, message)
    }

    fn unexpected(&self, c: char) -> ConfigError {
        if c == '.' && self.peek_at(1) == Some('.') {
            return self.error("spread syntax is not supported");
        }
        self.error(format!("unexpected character `{c}`"))
    }

    fn expect(&mut self, want: char) -> Result<(), ConfigError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) if c == '.' && self.peek_at(1) == Some('.') => Err(self.unexpected(c)),
            Some(c) => Err(self.error(format!("expected `{want}`, found `{c}`"))),
            None => Err(self.error(format!("expected `{want}`, found end of input"))),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut taken = String::new();
        while let Some(c) = self.peek().filter(|&c| pred(c)) {
            taken.push(c);
            self.pos += 1;
        }
        taken
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ConfigError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (None, _) => return Err(self.error_at(start, "unterminated comment")),
                            (Some('*'), Some('/')) => {
                                self.pos += 2;
                                break;
                            }
                            _ => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_module_wrapper(&mut self) {
        let offset = self.byte_offset(self.pos);
        if let Some(m) = wrapper_regex().find(&self.source[offset..]) {
            let end = offset + m.end();
            while self.byte_offset(self.pos) < end {
                self.pos += 1;
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ConfigError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('\'' | '"' | '`') => self.parse_string().map(Value::String),
            Some(c)
                if c.is_ascii_digit()
                    || matches!(c, '-' | '+')
                    || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                self.parse_number()
            }
            Some(c) if is_ident_start(c) => self.parse_word(),
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ConfigError> {
        let start = self.pos;
        self.bump();
        let mut map = Map::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                None => return Err(self.error_at(start, "unterminated object")),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                None => return Err(self.error_at(start, "unterminated object")),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ConfigError> {
        match self.peek() {
            Some('\'' | '"' | '`') => self.parse_string(),
            Some(c) if is_ident_start(c) => Ok(self.take_while(is_ident_continue)),
            Some(c) if c.is_ascii_digit() => {
                Ok(self.take_while(|c| c.is_ascii_alphanumeric() || c == '.'))
            }
            Some('[') => Err(self.error("computed keys are not supported")),
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, ConfigError> {
        let start = self.pos;
        self.bump();
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error_at(start, "unterminated array")),
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {}
                None => return Err(self.error_at(start, "unterminated array")),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
    }

    /// `true`, `false`, `null` or `require('<module>')`.
    fn parse_word(&mut self) -> Result<Value, ConfigError> {
        let start = self.pos;
        let word = self.take_while(is_ident_continue);
        match word.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            "require" => self.parse_require(),
            _ => Err(self.error_at(
                start,
                format!("unsupported expression `{word}`, only literal values are allowed"),
            )),
        }
    }

    fn parse_require(&mut self) -> Result<Value, ConfigError> {
        self.skip_trivia()?;
        self.expect('(')?;
        self.skip_trivia()?;
        if !matches!(self.peek(), Some('\'' | '"' | '`')) {
            return Err(self.error("require() takes a single string literal"));
        }
        let module = self.parse_string()?;
        self.skip_trivia()?;
        self.expect(')')?;
        Ok(Value::String(module))
    }

    fn parse_string(&mut self) -> Result<String, ConfigError> {
        let start = self.pos;
        let quote = self.bump();
        let mut out = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error_at(start, "unterminated string")),
                Some('\\') => self.parse_escape(start, &mut out)?,
                Some(c) if Some(c) == quote => return Ok(out),
                Some('\n') if quote != Some('`') => {
                    return Err(self.error_at(start, "unterminated string"))
                }
                Some('$') if quote == Some('`') && self.peek() == Some('{') => {
                    return Err(self.error("template literal interpolation is not supported"));
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, start: usize, out: &mut String) -> Result<(), ConfigError> {
        let Some(escaped) = self.bump() else {
            return Err(self.error_at(start, "unterminated string"));
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(self.code_point(code)?);
            }
            'u' => {
                let c = self.parse_unicode_escape()?;
                out.push(c);
            }
            // Line continuations.
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self) -> Result<char, ConfigError> {
        if self.peek() == Some('{') {
            self.bump();
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            self.expect('}')?;
            let code = u32::from_str_radix(&digits, 16)
                .map_err(|_| self.error("invalid unicode escape"))?;
            return self.code_point(code);
        }

        let high = self.hex_digits(4)?;
        if (0xD800..0xDC00).contains(&high)
            && self.peek() == Some('\\')
            && self.peek_at(1) == Some('u')
        {
            self.pos += 2;
            let low = self.hex_digits(4)?;
            if (0xDC00..0xE000).contains(&low) {
                return self.code_point(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00));
            }
        }
        self.code_point(high)
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32, ConfigError> {
        let mut code = 0;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid escape sequence"))?;
            self.bump();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn code_point(&self, code: u32) -> Result<char, ConfigError> {
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_number(&mut self) -> Result<Value, ConfigError> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            self.bump();
            if sign == '-' {
                text.push('-');
            }
        }

        let radix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_digit(radix));
            i64::from_str_radix(&format!("{text}{digits}"), radix)
                .ok()
                .map(Value::from)
        } else {
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
            if self.peek() == Some('.') {
                self.bump();
                text.push('.');
                text.push_str(&self.take_while(|c| c.is_ascii_digit()));
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.bump();
                text.push('e');
                if let Some(sign @ ('-' | '+')) = self.peek() {
                    self.bump();
                    text.push(sign);
                }
                text.push_str(&self.take_while(|c| c.is_ascii_digit()));
            }
            number_value(&text)
        };

        match (value, self.peek()) {
            (Some(value), next) if !next.is_some_and(is_ident_continue) => Ok(value),
            _ => Err(self.error_at(start, "invalid number literal")),
        }
    }
}

fn number_value(text: &str) -> Option<Value> {
    if !text.contains(|c| c == '.' || c == 'e') {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Value::from(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Some(Value::from(n));
        }
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use test_case::test_case;

    #[test]
    fn test_format_from_extension() {
        let cases = vec![
            ("tailwind.config.json", SourceFormat::Json),
            ("tailwind.config.yaml", SourceFormat::Yaml),
            ("tailwind.config.YML", SourceFormat::Yaml),
            ("tailwind.config.js", SourceFormat::JavaScript),
            ("tailwind.config.cjs", SourceFormat::JavaScript),
            ("tailwind.config", SourceFormat::JavaScript),
        ];
        for (name, expected) in cases {
            assert_eq!(SourceFormat::from_path(&PathBuf::from(name)), expected, "{name}");
        }
    }

    #[test]
    fn test_compact_object_literal() {
        let src = r#"{darkMode:"class", content:["./templates/**/*.html"], theme:{extend:{}}, plugins:[]}"#;
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(
            value,
            json!({
                "darkMode": "class",
                "content": ["./templates/**/*.html"],
                "theme": { "extend": {} },
                "plugins": []
            })
        );
    }

    #[test]
    fn test_module_exports_with_comments_and_trailing_commas() {
        let src = r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  darkMode: 'class', // ✅ important!
  /* scanned by the JIT engine */
  content: [
    './templates/**/*.html',
    'https://cdn.example.com/*.html',
  ],
  theme: {
    extend: {
      spacing: { '128': '32rem', half: 0.5 },
    },
  },
  plugins: [
    require('@tailwindcss/forms'),
    require("@tailwindcss/typography"),
  ],
};
"#;
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(value["darkMode"], "class");
        assert_eq!(value["content"][1], "https://cdn.example.com/*.html");
        assert_eq!(value["theme"]["extend"]["spacing"]["128"], "32rem");
        assert_eq!(value["theme"]["extend"]["spacing"]["half"], 0.5);
        assert_eq!(
            value["plugins"],
            json!(["@tailwindcss/forms", "@tailwindcss/typography"])
        );
    }

    #[test]
    fn test_export_default_and_escapes() {
        let src = "export default {\n  content: ['./it\\'s/*.html', \"./say \\\"hi\\\"/*.html\"],\n}\n";
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(value["content"][0], "./it's/*.html");
        assert_eq!(value["content"][1], "./say \"hi\"/*.html");
    }

    #[test]
    fn test_reserved_words_as_keys() {
        let src = "{ null: 1, true: 'yes', on: false }";
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(value, json!({ "null": 1, "true": "yes", "on": false }));
    }

    #[test]
    fn test_unterminated_structure_is_parse_error() {
        let src = "module.exports = {\n  darkMode: 'class',\n  content: ['./a/*.html',\n";
        assert!(matches!(
            parse_source(src, SourceFormat::JavaScript),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_unterminated_string_reports_line() {
        let src = "{\n  darkMode: 'class,\n}";
        match parse_source(src, SourceFormat::JavaScript).unwrap_err() {
            ConfigError::ParseError { line, message } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("string"));
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_comment_is_parse_error() {
        let src = "{ content: ['./a/*.html'] } /* trailing";
        assert!(matches!(
            parse_source(src, SourceFormat::JavaScript),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_template_interpolation_rejected() {
        let src = "{ content: [`${dir}/*.html`] }";
        match parse_source(src, SourceFormat::JavaScript).unwrap_err() {
            ConfigError::ParseError { message, .. } => assert!(message.contains("interpolation")),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test_case("{ darkMode: class, content: ['./a/*.html'] }", "`class`" ; "bare identifier value")]
    #[test_case("{ content: ['./a/*.html', ...extra] }", "spread" ; "spread in array")]
    #[test_case("{ ...base, content: ['./a/*.html'] }", "spread" ; "spread in object")]
    #[test_case("{ content: ['./a/*.html'], plugins: [forms()] }", "`forms`" ; "call expression")]
    #[test_case("{ theme: { extend: { colors: colors.blue } } }", "`colors`" ; "member access")]
    #[test_case("{ theme: { colors: palette['blue'] } }", "`palette`" ; "index access")]
    #[test_case("{ important: true.valueOf() }", "`.`" ; "member access on a literal")]
    #[test_case("{ important: &x }", "`&`" ; "yaml anchor")]
    #[test_case("{ important: *x }", "`*`" ; "yaml alias")]
    #[test_case("{ prefix: !tag 'tw-' }", "`!`" ; "yaml tag")]
    #[test_case("{ prefix: | }", "`|`" ; "yaml block scalar")]
    #[test_case("{ content }", "expected `:`" ; "shorthand property")]
    #[test_case("{ [key]: 1 }", "computed" ; "computed key")]
    #[test_case("{ plugins: [require(name)] }", "string literal" ; "require without literal")]
    #[test_case("darkMode class content", "object literal" ; "missing braces")]
    #[test_case("module.exports = config", "object literal" ; "exported identifier")]
    #[test_case("'use strict'; module.exports = {}", "object literal" ; "leading statement")]
    #[test_case("module.exports = {}; module.exports.x = 1", "`m`" ; "trailing statement")]
    #[test_case("{ content: ['a',, 'b'] }", "`,`" ; "array hole")]
    #[test_case("{ spacing: 1_000 }", "number" ; "numeric separator")]
    #[test_case("{ content: ['\\u{110000}'] }", "unicode" ; "out of range escape")]
    fn test_non_literal_javascript_rejected(src: &str, expected: &str) {
        match parse_source(src, SourceFormat::JavaScript).unwrap_err() {
            ConfigError::ParseError { line, message } => {
                assert_eq!(line, Some(1));
                assert!(message.contains(expected), "{message:?} lacks {expected:?}");
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_values() {
        let src = "{ a: -5, b: 1e3, c: .5, d: 0x1F, e: +2, f: null, g: true, 'h-i': `x`, 42: 'n' }";
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(
            value,
            json!({
                "a": -5, "b": 1000.0, "c": 0.5, "d": 31, "e": 2,
                "f": null, "g": true, "h-i": "x", "42": "n"
            })
        );
    }

    #[test]
    fn test_string_escapes() {
        let src = r#"{ a: '\x41\u00e9\u{1F600}\uD83D\uDE00', b: "tab\tnew\nline", c: 'line \
continued' }"#;
        let value = parse_source(src, SourceFormat::JavaScript).unwrap();
        assert_eq!(value["a"], "A\u{e9}\u{1F600}\u{1F600}");
        assert_eq!(value["b"], "tab\tnew\nline");
        assert_eq!(value["c"], "line continued");
    }

    #[test]
    fn test_error_line_counts_comments() {
        let src = "/*\n header\n*/\nmodule.exports = {\n  // note\n  content: [oops],\n}\n";
        match parse_source(src, SourceFormat::JavaScript).unwrap_err() {
            ConfigError::ParseError { line, message } => {
                assert_eq!(line, Some(6));
                assert!(message.contains("`oops`"));
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_and_yaml() {
        assert!(matches!(
            parse_source("{\"darkMode\": }", SourceFormat::Json),
            Err(ConfigError::ParseError { line: Some(1), .. })
        ));
        assert!(matches!(
            parse_source("content: [a, b\n", SourceFormat::Yaml),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
