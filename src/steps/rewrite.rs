//! Method rewriting
//!
//! Re-emits a matched test method with its body nested inside a step lambda:
//!
//! ```text
//! public void testGetAllUsers() {
//!     Step("Отправляем GET запрос для получения всех данных", () -> {
//!         assertTrue(true);
//!     });
//! }
//! ```

use std::borrow::Cow;

use super::config::StepConfig;
use super::describe::describe_with;
use super::extract::{MethodMatch, extract, parse_method};

/// Result of rewriting a whole source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// The rewritten text
    pub text: String,
    /// Number of methods wrapped in a step
    pub methods_wrapped: usize,
}

impl RewriteOutcome {
    /// Whether the rewrite changed anything compared to `source`.
    pub fn changed(&self, source: &str) -> bool {
        self.text != source
    }
}

/// Rewrite a single method declaration.
///
/// Text that is not exactly one `public void test*` declaration is returned unchanged.
pub fn rewrite<'a>(text: &'a str, config: &StepConfig) -> Cow<'a, str> {
    match parse_method(text) {
        Some(method) => {
            let prefix = &text[..method.span.start];
            let wrapped = render(&method, config, line_ending(text));
            Cow::Owned(format!("{prefix}{wrapped}"))
        }
        None => Cow::Borrowed(text),
    }
}

/// Render the wrapped form of a matched method.
///
/// The result replaces exactly `method.span`; the indentation before the signature stays in place.
/// Lines end with `\r\n` when the method body uses them.
pub fn rewrite_match(method: &MethodMatch<'_>, config: &StepConfig) -> String {
    render(method, config, line_ending(method.body))
}

fn render(method: &MethodMatch<'_>, config: &StepConfig, eol: &str) -> String {
    let unit = config.indent_unit();
    let inner = format!("{}{}", method.indent, unit);
    let description = escape_java_string(describe_with(method.name, config));
    let body = reindent_body(method.body, &inner, &unit, eol);

    let mut out = String::with_capacity(method.signature.len() + method.body.len() * 2 + 64);
    out.push_str(method.signature);
    out.push_str(" {");
    out.push_str(eol);
    out.push_str(&format!(
        "{inner}{}(\"{description}\", () -> {{{eol}",
        config.step_function
    ));
    if !body.is_empty() {
        out.push_str(&body);
        out.push_str(eol);
    }
    out.push_str(&format!("{inner}}});{eol}"));
    out.push_str(method.indent);
    out.push('}');
    out
}

/// `\r\n` if the text contains any, `\n` otherwise.
fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Rewrite every matched method in `source` in a single pass.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn rewrite_source(source: &str, config: &StepConfig) -> RewriteOutcome {
    let mut text = String::with_capacity(source.len() + source.len() / 4);
    let mut last = 0;
    let mut methods_wrapped = 0;
    let eol = line_ending(source);

    for method in extract(source) {
        text.push_str(&source[last..method.span.start]);
        text.push_str(&render(&method, config, eol));
        last = method.span.end;
        methods_wrapped += 1;
        tracing::debug!(method = method.name, "wrapped test method");
    }
    text.push_str(&source[last..]);

    RewriteOutcome { text, methods_wrapped }
}

/// Line diff between `source` and its rewritten form, `None` when nothing changes.
pub fn rewrite_diff(source: &str, config: &StepConfig) -> Option<String> {
    let rewritten = rewrite_source(source, config).text;
    if rewritten == source {
        return None;
    }

    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let rewritten_lines: Vec<&str> = rewritten.lines().collect();

    let max_lines = original_lines.len().max(rewritten_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).unwrap_or(&"");
        let new = rewritten_lines.get(i).unwrap_or(&"");

        if orig != new {
            if !orig.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if !new.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, new));
            }
        }
    }

    Some(diff)
}

/// Shift body lines one unit deeper.
///
/// Leading and trailing blank lines are dropped and blank lines in between stay empty. A statement
/// sharing the line with the opening brace has no indentation of its own, so it is placed at body
/// depth explicitly.
fn reindent_body(body: &str, inner: &str, unit: &str, eol: &str) -> String {
    let lines: Vec<String> = body
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim_end();
            if line.is_empty() {
                String::new()
            } else if i == 0 {
                format!("{inner}{unit}{}", line.trim_start())
            } else {
                format!("{unit}{line}")
            }
        })
        .collect();

    let Some(start) = lines.iter().position(|l| !l.is_empty()) else {
        return String::new();
    };
    let end = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(start);
    lines[start..=end].join(eol)
}

fn escape_java_string(s: &str) -> Cow<'_, str> {
    if s.contains(['"', '\\']) {
        Cow::Owned(s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(s)
    }
}
