use std::collections::HashMap;

use super::normalizers::{RecipeDbNormalizer, SourceNormalizer, TastyNormalizer};
use crate::error::{PipelineError, Result};
use crate::types::{NormalizedRecipe, RawRecipe, SourceKind};

/// Registry of source-specific normalization strategies
pub struct NormalizationRegistry {
    normalizers: HashMap<SourceKind, Box<dyn SourceNormalizer>>,
}

impl Default for NormalizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationRegistry {
    /// Create a registry with the built-in normalizers
    pub fn new() -> Self {
        let mut registry = Self {
            normalizers: HashMap::new(),
        };
        registry.register(Box::new(TastyNormalizer::new()));
        registry.register(Box::new(RecipeDbNormalizer::new()));
        registry
    }

    pub fn register(&mut self, normalizer: Box<dyn SourceNormalizer>) {
        self.normalizers.insert(normalizer.source_kind(), normalizer);
    }

    pub fn get_normalizer(&self, kind: SourceKind) -> Option<&dyn SourceNormalizer> {
        self.normalizers.get(&kind).map(|n| n.as_ref())
    }

    /// Normalize a record with the normalizer registered for `kind`
    pub fn normalize(&self, raw: &RawRecipe, kind: SourceKind) -> Result<NormalizedRecipe> {
        match self.get_normalizer(kind) {
            Some(normalizer) => normalizer.normalize(raw),
            None => Err(PipelineError::Config(format!(
                "No normalizer registered for source: {}",
                kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_built_in_normalizers() {
        let registry = NormalizationRegistry::new();
        assert!(registry.get_normalizer(SourceKind::Tasty).is_some());
        assert!(registry.get_normalizer(SourceKind::RecipeDb).is_some());
    }
}
