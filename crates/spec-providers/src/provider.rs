//! CloudProvider trait

use spec_core::SpecSchema;

use crate::cloud::Cloud;

/// Supplies the provider-specific sub-spec schemas of one cloud
pub trait CloudProvider: Send + Sync {
    fn cloud(&self) -> Cloud;

    /// Schema of the cloud's `vm_spec` branch
    fn vm_schema(&self) -> spec_core::Result<SpecSchema>;

    /// Schema of the cloud's `disk_spec` branch
    fn disk_schema(&self) -> spec_core::Result<SpecSchema>;
}
