//! Allure step wrapping
//!
//! Turns plain Java API test methods into step-annotated ones:
//! - `describe` maps a method name to a report label
//! - `extract` finds `public void test*` methods with a regex
//! - `rewrite` nests each method body inside `Step("<label>", () -> { ... })`
//!
//! Matching is textual. No Java parser is involved and the output is not validated.

mod config;
mod describe;
mod extract;
mod rewrite;

pub use config::StepConfig;
pub use describe::{DESCRIPTION_RULES, DescriptionRule, FALLBACK_DESCRIPTION, Keywords, describe, describe_with};
pub use extract::{METHOD_REGEX, MethodMatch, extract, parse_method};
pub use rewrite::{RewriteOutcome, rewrite, rewrite_diff, rewrite_match, rewrite_source};
