//! Microsoft Azure provider

use serde::Serialize;
use spec_core::{OptionSchema, ResolvedSpec, SpecSchema};

use crate::cloud::Cloud;
use crate::disk::disk_schema;
use crate::provider::CloudProvider;

const AZURE_DISK_TYPES: &[&str] = &["Standard_LRS", "StandardSSD_LRS", "Premium_LRS", "local"];

/// CloudProvider for Azure
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureProvider;

impl CloudProvider for AzureProvider {
    fn cloud(&self) -> Cloud {
        Cloud::Azure
    }

    fn vm_schema(&self) -> spec_core::Result<SpecSchema> {
        SpecSchema::builder("azure_vm_spec")
            .option(OptionSchema::string("machine_type").describe("VM size, e.g. Standard_D2s_v3"))
            .option(OptionSchema::string("zone").flag("zones").describe("Region or availability zone"))
            .option(OptionSchema::string("image").describe("Image URN"))
            .option(
                OptionSchema::integer("boot_disk_size")
                    .min(1)
                    .flag("azure_boot_disk_size"),
            )
            .option(
                OptionSchema::boolean("accelerated_networking")
                    .default_value(false)
                    .flag("azure_accelerated_networking"),
            )
            .build()
    }

    fn disk_schema(&self) -> spec_core::Result<SpecSchema> {
        disk_schema("azure_disk_spec", AZURE_DISK_TYPES)
    }
}

/// Resolved Azure VM settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AzureVmSpec {
    pub machine_type: Option<String>,
    pub zone: Option<String>,
    pub image: Option<String>,
    pub boot_disk_size: Option<u64>,
    pub accelerated_networking: bool,
}

impl AzureVmSpec {
    pub fn from_resolved(spec: &ResolvedSpec) -> spec_core::Result<Self> {
        Ok(Self {
            machine_type: spec.string("machine_type")?.map(String::from),
            zone: spec.string("zone")?.map(String::from),
            image: spec.string("image")?.map(String::from),
            boot_disk_size: spec.unsigned("boot_disk_size")?,
            accelerated_networking: spec.required_bool("accelerated_networking")?,
        })
    }
}
