//! Rewrite configuration
//!
//! Defaults reproduce the layout Allure step wrappers have in the existing API tests.

use super::describe::FALLBACK_DESCRIPTION;

/// Step wrapping configuration
#[derive(Debug, Clone)]
pub struct StepConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Name of the step function invoked around the body
    pub step_function: String,
    /// Description used when no keyword rule matches the method name
    pub fallback_description: String,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            step_function: "Step".to_string(),
            fallback_description: FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

impl StepConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the step function name
    pub fn with_step_function(mut self, name: impl Into<String>) -> Self {
        self.step_function = name.into();
        self
    }

    /// Set the fallback description
    pub fn with_fallback_description(mut self, description: impl Into<String>) -> Self {
        self.fallback_description = description.into();
        self
    }

    /// One indentation unit as a string of spaces
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_config_indent_width() {
        let config = StepConfig::default();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.indent_unit(), "    ");
    }

    #[test]
    fn test_default_config_step_function() {
        let config = StepConfig::default();
        assert_eq!(config.step_function, "Step");
    }

    #[test]
    fn test_default_config_fallback() {
        let config = StepConfig::default();
        assert_eq!(config.fallback_description, "Выполняем API запрос");
    }

    // ========================================
    // Builder method tests
    // ========================================

    #[test]
    fn test_with_indent_width() {
        let config = StepConfig::new().with_indent_width(2);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.indent_unit(), "  ");
        // Other fields unchanged
        assert_eq!(config.step_function, "Step");
    }

    #[test]
    fn test_with_indent_width_zero() {
        let config = StepConfig::new().with_indent_width(0);
        assert_eq!(config.indent_unit(), "");
    }

    #[test]
    fn test_builder_chain_all() {
        let config = StepConfig::new()
            .with_indent_width(8)
            .with_step_function("step")
            .with_fallback_description("Run request");

        assert_eq!(config.indent_width, 8);
        assert_eq!(config.step_function, "step");
        assert_eq!(config.fallback_description, "Run request");
    }

    #[test]
    fn test_builder_override() {
        let config = StepConfig::new().with_step_function("a").with_step_function("b");
        assert_eq!(config.step_function, "b"); // Last value wins
    }
}
