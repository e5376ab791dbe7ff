//! Step description registry.
//!
//! Maps a test method name to the human-readable label shown in the Allure report. Rules are
//! checked in table order and the first one whose keywords appear in the name wins, so fetch-all
//! is tested before fetch-by-id, and creation before update before deletion.

use super::config::StepConfig;

/// Description used when no rule matches.
pub const FALLBACK_DESCRIPTION: &str = "Выполняем API запрос";

/// How a rule's keywords are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keywords {
    /// Every keyword must occur in the method name.
    AllOf(&'static [&'static str]),
    /// At least one keyword must occur in the method name.
    AnyOf(&'static [&'static str]),
}

impl Keywords {
    /// Case-sensitive substring test against a method name.
    pub fn matches(&self, method_name: &str) -> bool {
        match self {
            Keywords::AllOf(words) => words.iter().all(|w| method_name.contains(w)),
            Keywords::AnyOf(words) => words.iter().any(|w| method_name.contains(w)),
        }
    }
}

/// A single entry of the description table.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionRule {
    pub keywords: Keywords,
    pub description: &'static str,
}

const fn rule(keywords: Keywords, description: &'static str) -> DescriptionRule {
    DescriptionRule { keywords, description }
}

/// Ordered description table.
pub const DESCRIPTION_RULES: &[DescriptionRule] = &[
    rule(
        Keywords::AllOf(&["Get", "All"]),
        "Отправляем GET запрос для получения всех данных",
    ),
    rule(
        Keywords::AllOf(&["Get", "ById"]),
        "Отправляем GET запрос для получения данных по ID",
    ),
    rule(
        Keywords::AnyOf(&["Create", "Post"]),
        "Отправляем POST запрос для создания нового ресурса",
    ),
    rule(
        Keywords::AnyOf(&["Update", "Put"]),
        "Отправляем PUT запрос для обновления данных",
    ),
    rule(Keywords::AnyOf(&["Delete"]), "Отправляем DELETE запрос для удаления данных"),
    rule(Keywords::AnyOf(&["Login"]), "Выполняем аутентификацию пользователя"),
    rule(Keywords::AnyOf(&["Register"]), "Регистрируем нового пользователя"),
    rule(Keywords::AnyOf(&["Performance"]), "Проверяем производительность API"),
    rule(Keywords::AnyOf(&["Validation"]), "Выполняем валидацию данных"),
    rule(Keywords::AnyOf(&["Error", "Negative"]), "Проверяем обработку ошибок"),
    rule(
        Keywords::AnyOf(&["Retry"]),
        "Выполняем тест с возможностью повторных попыток",
    ),
];

/// Find the first rule matching `method_name`.
pub fn matching_rule(method_name: &str) -> Option<&'static DescriptionRule> {
    DESCRIPTION_RULES.iter().find(|r| r.keywords.matches(method_name))
}

/// Describe a method with the built-in fallback.
pub fn describe(method_name: &str) -> &'static str {
    matching_rule(method_name).map_or(FALLBACK_DESCRIPTION, |r| r.description)
}

/// Describe a method, falling back to the configured description.
pub fn describe_with<'a>(method_name: &str, config: &'a StepConfig) -> &'a str {
    match matching_rule(method_name) {
        Some(r) => r.description,
        None => config.fallback_description.as_str(),
    }
}
