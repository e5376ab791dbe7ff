//! Test method extraction
//!
//! Locates `public void test<Name>(<params>) { ... }` declarations with a regex rather than a Java
//! parser. The body pattern allows one nested brace level in its shape, but the leading `[^}]+`
//! also consumes `{`, so the first `}` inside the body ends the match. Methods with nested blocks
//! are therefore cut at the first inner closing brace. This is a known limitation of the heuristic
//! and is kept as-is; callers must not rely on brace balance of the captured body.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Method declaration with a brace-delimited body.
///
/// Groups: 1 = signature, 2 = method name, 3 = body between the outer braces.
pub const METHOD_REGEX: &str = r"(public void (test\w+)\([^)]*\)) \{([^}]+(?:\{[^}]*\}[^}]*)*)\}";

static METHOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(METHOD_REGEX).expect("INVARIANT: method pattern is a valid regex"));

/// A matched test method, borrowed from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatch<'a> {
    /// Byte range of the whole declaration in the scanned text
    pub span: Range<usize>,
    /// `public void testName(params)`
    pub signature: &'a str,
    /// `testName`
    pub name: &'a str,
    /// Text between the outer braces, untrimmed
    pub body: &'a str,
    /// Leading whitespace of the line the declaration starts on
    pub indent: &'a str,
}

impl<'a> MethodMatch<'a> {
    fn from_captures(source: &'a str, caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            span: whole.range(),
            signature: caps.get(1)?.as_str(),
            name: caps.get(2)?.as_str(),
            body: caps.get(3)?.as_str(),
            indent: line_indent(source, whole.start()),
        })
    }
}

/// Scan `source` for test methods, in file order.
pub fn extract(source: &str) -> impl Iterator<Item = MethodMatch<'_>> {
    METHOD_PATTERN
        .captures_iter(source)
        .filter_map(move |caps| MethodMatch::from_captures(source, &caps))
}

/// Match `text` as a single method declaration.
///
/// Only leading whitespace may precede the declaration and nothing may follow it.
pub fn parse_method(text: &str) -> Option<MethodMatch<'_>> {
    let caps = METHOD_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    if whole.end() != text.len() || !text[..whole.start()].trim().is_empty() {
        return None;
    }
    MethodMatch::from_captures(text, &caps)
}

fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..offset];
    let width = line.len() - line.trim_start().len();
    &line[..width]
}
