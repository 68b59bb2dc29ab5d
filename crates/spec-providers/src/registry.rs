//! Provider registry
//!
//! Maps each [`Cloud`] to the [`CloudProvider`] supplying its sub-spec
//! schemas. Specs with a per-cloud union build their branch tables from the
//! registry, so the set of registered clouds is exactly the set of values
//! their `cloud` discriminator accepts.

use std::collections::BTreeMap;

use spec_core::SpecSchema;

use crate::aws::AwsProvider;
use crate::azure::AzureProvider;
use crate::cloud::Cloud;
use crate::error::{Error, Result};
use crate::gcp::GcpProvider;
use crate::provider::CloudProvider;

/// Registry of cloud providers keyed by cloud
///
/// # Example
///
/// ```
/// use spec_providers::{Cloud, ProviderRegistry};
///
/// let registry = ProviderRegistry::with_builtins();
/// assert!(registry.has_provider(Cloud::Gcp));
/// assert_eq!(registry.supported_names(), vec!["GCP", "AWS", "Azure"]);
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<Cloud, Box<dyn CloudProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Create a registry with every built-in provider registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(GcpProvider);
        registry.register(AwsProvider);
        registry.register(AzureProvider);
        registry
    }

    /// Register a provider, replacing any previous one for the same cloud.
    pub fn register(&mut self, provider: impl CloudProvider + 'static) {
        let cloud = provider.cloud();
        tracing::trace!(%cloud, "Registering cloud provider");
        self.providers.insert(cloud, Box::new(provider));
    }

    pub fn get(&self, cloud: Cloud) -> Result<&dyn CloudProvider> {
        self.providers
            .get(&cloud)
            .map(|p| p.as_ref())
            .ok_or(Error::ProviderNotRegistered { cloud })
    }

    pub fn has_provider(&self, cloud: Cloud) -> bool {
        self.providers.contains_key(&cloud)
    }

    /// Registered clouds in declaration order of [`Cloud`]
    pub fn supported(&self) -> Vec<Cloud> {
        self.providers.keys().copied().collect()
    }

    pub fn supported_names(&self) -> Vec<&'static str> {
        self.providers.keys().map(Cloud::as_str).collect()
    }

    /// Branch table for a `vm_spec` union
    pub fn vm_branches(&self) -> spec_core::Result<Vec<(String, SpecSchema)>> {
        self.providers
            .iter()
            .map(|(cloud, provider)| Ok((cloud.as_str().to_string(), provider.vm_schema()?)))
            .collect()
    }

    /// Branch table for a `disk_spec` union
    pub fn disk_branches(&self) -> spec_core::Result<Vec<(String, SpecSchema)>> {
        self.providers
            .iter()
            .map(|(cloud, provider)| Ok((cloud.as_str().to_string(), provider.disk_schema()?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.vm_branches().unwrap().is_empty());
    }

    #[test]
    fn test_with_builtins() {
        let registry = ProviderRegistry::with_builtins();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.supported(), Cloud::ALL.to_vec());
        for cloud in Cloud::ALL {
            assert_eq!(registry.get(cloud).unwrap().cloud(), cloud);
        }
    }

    #[test]
    fn test_unregistered_cloud() {
        let mut registry = ProviderRegistry::new();
        registry.register(GcpProvider);

        assert!(!registry.has_provider(Cloud::Aws));
        assert!(matches!(
            registry.get(Cloud::Aws),
            Err(Error::ProviderNotRegistered { cloud: Cloud::Aws })
        ));
    }

    #[test]
    fn test_branches_are_keyed_by_cloud_name() {
        let registry = ProviderRegistry::with_builtins();

        let vm: Vec<(String, String)> = registry
            .vm_branches()
            .unwrap()
            .into_iter()
            .map(|(k, s)| (k, s.name().to_string()))
            .collect();
        assert_eq!(
            vm,
            vec![
                ("GCP".to_string(), "gce_vm_spec".to_string()),
                ("AWS".to_string(), "aws_vm_spec".to_string()),
                ("Azure".to_string(), "azure_vm_spec".to_string()),
            ]
        );

        let disk = registry.disk_branches().unwrap();
        assert_eq!(disk.len(), 3);
        assert_eq!(disk[0].1.name(), "gce_disk_spec");
    }
}
