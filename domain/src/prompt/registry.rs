//! Objective-type → strategy lookup.

use super::strategy::PromptStrategy;
use crate::core::error::DomainError;
use std::collections::HashMap;

/// Maps objective-type tags to [`PromptStrategy`] values.
///
/// Lookups are exact: an unregistered tag is an error, never a fallback.
#[derive(Debug, Clone)]
pub struct PromptStrategyRegistry {
    strategies: HashMap<String, PromptStrategy>,
}

impl PromptStrategyRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register `strategy` under its objective-type tag.
    pub fn register(mut self, strategy: PromptStrategy) -> Self {
        self.strategies
            .insert(strategy.objective_type().to_string(), strategy);
        self
    }

    pub fn resolve(&self, objective_type: &str) -> Result<PromptStrategy, DomainError> {
        self.strategies
            .get(objective_type)
            .copied()
            .ok_or_else(|| DomainError::UnknownObjectiveType(objective_type.to_string()))
    }

    /// Registered tags, sorted.
    pub fn objective_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for PromptStrategyRegistry {
    /// Registry with every built-in strategy.
    fn default() -> Self {
        PromptStrategy::ALL
            .into_iter()
            .fold(Self::empty(), |registry, strategy| registry.register(strategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_resolves_builtin_types() {
        let registry = PromptStrategyRegistry::default();
        assert_eq!(
            registry.resolve("top_5_recommendation").unwrap(),
            PromptStrategy::TopRecommendation
        );
        assert_eq!(
            registry.resolve("main_competitors").unwrap(),
            PromptStrategy::CompetitorAnalysis
        );
        assert_eq!(registry.resolve("pros_and_cons").unwrap(), PromptStrategy::ProsCons);
        assert_eq!(
            registry.objective_types(),
            vec!["main_competitors", "pros_and_cons", "top_5_recommendation"]
        );
    }

    #[test]
    fn test_unknown_type_fails() {
        let registry = PromptStrategyRegistry::default();
        assert_eq!(
            registry.resolve("top_10").unwrap_err(),
            DomainError::UnknownObjectiveType("top_10".to_string())
        );
        // Lookup is exact
        assert!(registry.resolve("TOP_5_RECOMMENDATION").is_err());
    }

    #[test]
    fn test_empty_registry_has_no_fallback() {
        assert!(PromptStrategyRegistry::empty().resolve("pros_and_cons").is_err());
    }

    #[test]
    fn test_register_single_strategy() {
        let registry = PromptStrategyRegistry::empty().register(PromptStrategy::ProsCons);
        assert_eq!(registry.objective_types(), vec!["pros_and_cons"]);
        assert!(registry.resolve("main_competitors").is_err());
    }
}
