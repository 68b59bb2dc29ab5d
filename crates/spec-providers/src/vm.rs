//! Provider VM sub-specs

use serde::Serialize;
use spec_core::VariantSpec;

use crate::Result;
use crate::aws::AwsVmSpec;
use crate::azure::AzureVmSpec;
use crate::cloud::Cloud;
use crate::gcp::GceVmSpec;

/// VM settings for whichever cloud the spec targets
///
/// Serializes externally tagged by cloud name, mirroring the config layout
/// (`vm_spec: {GCP: {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VmSpec {
    #[serde(rename = "GCP")]
    Gcp(GceVmSpec),
    #[serde(rename = "AWS")]
    Aws(AwsVmSpec),
    #[serde(rename = "Azure")]
    Azure(AzureVmSpec),
}

impl VmSpec {
    /// Convert the branch a `vm_spec` union resolved to.
    pub fn from_variant(variant: &VariantSpec) -> Result<Self> {
        let cloud = variant.variant().parse::<Cloud>()?;
        let spec = variant.spec();
        let vm = match cloud {
            Cloud::Gcp => VmSpec::Gcp(GceVmSpec::from_resolved(spec)?),
            Cloud::Aws => VmSpec::Aws(AwsVmSpec::from_resolved(spec)?),
            Cloud::Azure => VmSpec::Azure(AzureVmSpec::from_resolved(spec)?),
        };
        Ok(vm)
    }

    pub fn cloud(&self) -> Cloud {
        match self {
            VmSpec::Gcp(_) => Cloud::Gcp,
            VmSpec::Aws(_) => Cloud::Aws,
            VmSpec::Azure(_) => Cloud::Azure,
        }
    }

    pub fn machine_type(&self) -> Option<&str> {
        match self {
            VmSpec::Gcp(vm) => vm.machine_type.as_deref(),
            VmSpec::Aws(vm) => vm.machine_type.as_deref(),
            VmSpec::Azure(vm) => vm.machine_type.as_deref(),
        }
    }

    pub fn zone(&self) -> Option<&str> {
        match self {
            VmSpec::Gcp(vm) => vm.zone.as_deref(),
            VmSpec::Aws(vm) => vm.zone.as_deref(),
            VmSpec::Azure(vm) => vm.zone.as_deref(),
        }
    }
}
