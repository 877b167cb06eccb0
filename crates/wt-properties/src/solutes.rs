//! Flowsheet-wide solute registry.

use std::collections::HashSet;

use crate::error::{PropertyError, PropertyResult};

/// Component name reserved for the solvent.
pub const WATER: &str = "H2O";

/// Ordered, duplicate-free set of solute identifiers.
///
/// Fixed at flowsheet construction and never mutated afterwards; unit models
/// share it through the property package. The solvent (`"H2O"`) is implicit
/// and cannot be registered as a solute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoluteRegistry {
    solutes: Vec<String>,
}

impl SoluteRegistry {
    /// Build a registry from solute identifiers, preserving order.
    pub fn new<I, S>(solutes: I) -> PropertyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for name in solutes {
            let name: String = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(PropertyError::EmptyName);
            }
            if trimmed == WATER {
                return Err(PropertyError::ReservedName {
                    name: trimmed.to_string(),
                });
            }
            if !seen.insert(trimmed.to_string()) {
                return Err(PropertyError::DuplicateSolute {
                    name: trimmed.to_string(),
                });
            }
            ordered.push(trimmed.to_string());
        }
        Ok(Self { solutes: ordered })
    }

    /// Solute identifiers in registration order.
    pub fn solutes(&self) -> &[String] {
        &self.solutes
    }

    pub fn len(&self) -> usize {
        self.solutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.solutes.iter().any(|s| s == name)
    }

    /// Position of a solute in registration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.solutes.iter().position(|s| s == name)
    }

    /// All components: the solvent first, then the solutes.
    pub fn component_list(&self) -> Vec<&str> {
        std::iter::once(WATER)
            .chain(self.solutes.iter().map(String::as_str))
            .collect()
    }

    /// Solutes not present in `catalog`.
    pub fn missing_from<'a, I>(&self, catalog: I) -> Vec<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<&str> = catalog.into_iter().collect();
        self.solutes
            .iter()
            .map(String::as_str)
            .filter(|s| !known.contains(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let reg = SoluteRegistry::new(["tss", "sulfur", "toc"]).unwrap();
        assert_eq!(reg.solutes(), &["tss", "sulfur", "toc"]);
        assert_eq!(reg.position("toc"), Some(2));
        assert_eq!(reg.component_list(), vec!["H2O", "tss", "sulfur", "toc"]);
    }

    #[test]
    fn rejects_duplicates() {
        let err = SoluteRegistry::new(["toc", "tss", "toc"]).unwrap_err();
        assert_eq!(err, PropertyError::DuplicateSolute { name: "toc".into() });
    }

    #[test]
    fn rejects_water_as_solute() {
        let err = SoluteRegistry::new(["H2O"]).unwrap_err();
        assert!(matches!(err, PropertyError::ReservedName { .. }));
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            SoluteRegistry::new(["toc", "  "]).unwrap_err(),
            PropertyError::EmptyName
        );
    }

    #[test]
    fn empty_registry_is_water_only() {
        let reg = SoluteRegistry::new(Vec::<String>::new()).unwrap();
        assert!(reg.is_empty());
        assert_eq!(reg.component_list(), vec![WATER]);
    }

    #[test]
    fn missing_from_catalog() {
        let reg = SoluteRegistry::new(["sulfur", "foo"]).unwrap();
        let missing = reg.missing_from(["sulfur", "toc", "tss"]);
        assert_eq!(missing, vec!["foo"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn registry_keeps_first_seen_order(
                names in proptest::collection::btree_set("[a-z]{1,6}", 0..8)
            ) {
                let ordered: Vec<String> = names.into_iter().rev().collect();
                let reg = SoluteRegistry::new(ordered.clone()).unwrap();
                prop_assert_eq!(reg.solutes(), ordered.as_slice());
                for (i, name) in ordered.iter().enumerate() {
                    prop_assert_eq!(reg.position(name), Some(i));
                }
                prop_assert_eq!(reg.component_list().len(), ordered.len() + 1);
            }

            #[test]
            fn repeated_name_is_rejected(name in "[a-z]{1,6}", extra in "[a-z]{1,6}") {
                let err = SoluteRegistry::new([name.clone(), extra, name.clone()]).unwrap_err();
                let is_duplicate = matches!(err, PropertyError::DuplicateSolute { .. });
                prop_assert!(is_duplicate);
            }
        }
    }
}
