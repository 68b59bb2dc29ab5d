//! Amazon Web Services provider

use serde::Serialize;
use spec_core::{OptionSchema, ResolvedSpec, SpecSchema};

use crate::cloud::Cloud;
use crate::disk::disk_schema;
use crate::provider::CloudProvider;

const AWS_DISK_TYPES: &[&str] = &["standard", "gp2", "gp3", "io1", "st1", "sc1", "local"];

/// CloudProvider for AWS
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsProvider;

impl CloudProvider for AwsProvider {
    fn cloud(&self) -> Cloud {
        Cloud::Aws
    }

    fn vm_schema(&self) -> spec_core::Result<SpecSchema> {
        SpecSchema::builder("aws_vm_spec")
            .option(OptionSchema::string("machine_type").describe("EC2 instance type, e.g. m5.large"))
            .option(OptionSchema::string("zone").flag("zones"))
            .option(OptionSchema::string("image").describe("AMI id"))
            .option(
                OptionSchema::integer("boot_disk_size")
                    .min(1)
                    .flag("aws_boot_disk_size"),
            )
            .build()
    }

    fn disk_schema(&self) -> spec_core::Result<SpecSchema> {
        disk_schema("aws_disk_spec", AWS_DISK_TYPES)
    }
}

/// Resolved EC2 VM settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwsVmSpec {
    pub machine_type: Option<String>,
    pub zone: Option<String>,
    pub image: Option<String>,
    pub boot_disk_size: Option<u64>,
}

impl AwsVmSpec {
    pub fn from_resolved(spec: &ResolvedSpec) -> spec_core::Result<Self> {
        Ok(Self {
            machine_type: spec.string("machine_type")?.map(String::from),
            zone: spec.string("zone")?.map(String::from),
            image: spec.string("image")?.map(String::from),
            boot_disk_size: spec.unsigned("boot_disk_size")?,
        })
    }
}
