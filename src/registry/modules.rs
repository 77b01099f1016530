//! Ordered registry of route groups contributed by modules.

use std::collections::{BTreeSet, HashSet};

use super::error::RegistryError;

/// One module's contribution to the route table.
///
/// Immutable once registered. `R` is the route collection type; the server uses
/// `axum::Router<AppState>`.
#[derive(Debug, Clone)]
pub struct RouteGroup<R> {
    module_name: String,
    routes: R,
    prefix: String,
    tags: BTreeSet<String>,
}

impl<R> RouteGroup<R> {
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn routes(&self) -> &R {
        &self.routes
    }

    /// URL prefix, always with a leading `/` and no trailing `/`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Collects route groups in registration order.
///
/// The first module registered is mounted first. Names are unique.
#[derive(Debug)]
pub struct ModuleRegistry<R> {
    groups: Vec<RouteGroup<R>>,
    names: HashSet<String>,
}

impl<R> Default for ModuleRegistry<R> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            names: HashSet::new(),
        }
    }
}

impl<R> ModuleRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a route group for `module_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateModule`] if the name was already used.
    pub fn register<I, T>(
        &mut self,
        module_name: &str,
        routes: R,
        prefix: &str,
        tags: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if !self.names.insert(module_name.to_string()) {
            return Err(RegistryError::DuplicateModule {
                name: module_name.to_string(),
            });
        }

        self.groups.push(RouteGroup {
            module_name: module_name.to_string(),
            routes,
            prefix: normalize_prefix(prefix),
            tags: tags.into_iter().map(Into::into).collect(),
        });

        Ok(())
    }

    /// Registered route groups, in registration order.
    pub fn get_routes(&self) -> &[RouteGroup<R>] {
        &self.groups
    }

    pub fn contains(&self, module_name: &str) -> bool {
        self.names.contains(module_name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_keep_registration_order() {
        let mut registry = ModuleRegistry::new();
        registry
            .register("rbac", "rbac_routes", "/rbac", ["RBAC"])
            .unwrap();
        registry
            .register("finance", "finance_routes", "/finance", ["Finance"])
            .unwrap();

        let names: Vec<_> = registry
            .get_routes()
            .iter()
            .map(|g| (g.module_name(), *g.routes()))
            .collect();

        assert_eq!(
            names,
            vec![("rbac", "rbac_routes"), ("finance", "finance_routes")]
        );
    }

    #[test]
    fn test_duplicate_module_is_rejected() {
        let mut registry = ModuleRegistry::new();
        registry.register("rbac", 1, "/rbac", ["RBAC"]).unwrap();

        let err = registry.register("rbac", 2, "/other", ["Other"]).unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateModule {
                name: "rbac".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(*registry.get_routes()[0].routes(), 1);
    }

    #[test]
    fn test_prefix_is_normalized() {
        let mut registry = ModuleRegistry::new();
        registry.register("files", (), "files/", ["Files"]).unwrap();
        registry
            .register("erp", (), "/erp", Vec::<String>::new())
            .unwrap();

        assert_eq!(registry.get_routes()[0].prefix(), "/files");
        assert_eq!(registry.get_routes()[1].prefix(), "/erp");
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let mut registry = ModuleRegistry::new();
        registry
            .register("finance", (), "/finance", ["Finance", "Currency", "Finance"])
            .unwrap();

        let tags: Vec<_> = registry.get_routes()[0].tags().iter().cloned().collect();
        assert_eq!(tags, vec!["Currency".to_string(), "Finance".to_string()]);
    }

    #[test]
    fn test_empty_registry() {
        let registry: ModuleRegistry<()> = ModuleRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("rbac"));
    }
}
