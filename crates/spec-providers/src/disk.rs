//! Data disk sub-specs
//!
//! Every cloud shares the same disk options; only the permitted disk types
//! differ.

use serde::Serialize;
use spec_core::{OptionSchema, ResolvedSpec, SpecSchema, VariantSpec};

use crate::Result;
use crate::cloud::Cloud;

/// Default mount point of the data disk
pub const DEFAULT_MOUNT_POINT: &str = "/scratch";

pub(crate) fn disk_schema(name: &str, disk_types: &[&str]) -> spec_core::Result<SpecSchema> {
    SpecSchema::builder(name)
        .option(
            OptionSchema::integer("disk_size")
                .min(1)
                .flag("data_disk_size")
                .describe("Size of the data disk in GB"),
        )
        .option(
            OptionSchema::enumeration("disk_type", disk_types.iter().copied())
                .flag("data_disk_type")
                .describe("Provider disk type"),
        )
        .option(
            OptionSchema::string("mount_point")
                .default_value(DEFAULT_MOUNT_POINT)
                .flag("scratch_dir")
                .describe("Where the data disk is mounted"),
        )
        .option(
            OptionSchema::integer("num_striped_disks")
                .default_value(1)
                .min(1)
                .describe("Number of disks striped into one volume"),
        )
        .build()
}

/// Resolved data disk settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskSpec {
    pub disk_size: Option<u64>,
    pub disk_type: Option<String>,
    pub mount_point: String,
    pub num_striped_disks: u64,
}

impl DiskSpec {
    pub fn from_resolved(spec: &ResolvedSpec) -> spec_core::Result<Self> {
        Ok(Self {
            disk_size: spec.unsigned("disk_size")?,
            disk_type: spec.string("disk_type")?.map(String::from),
            mount_point: spec.required_string("mount_point")?.to_string(),
            num_striped_disks: spec.required_unsigned("num_striped_disks")?,
        })
    }
}

/// Data disk settings together with the cloud they were resolved for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudDiskSpec {
    pub cloud: Cloud,
    #[serde(flatten)]
    pub disk: DiskSpec,
}

impl CloudDiskSpec {
    pub fn from_variant(variant: &VariantSpec) -> Result<Self> {
        let cloud = variant.variant().parse::<Cloud>()?;
        Ok(Self {
            cloud,
            disk: DiskSpec::from_resolved(variant.spec())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spec_core::{Error, InvalidReason, NoOverrides, RunContext, resolve};

    fn schema() -> SpecSchema {
        disk_schema("test_disk_spec", &["pd-standard", "pd-ssd"]).unwrap()
    }

    #[test]
    fn defaults_fill_mount_point_and_stripes() {
        let context = RunContext::new("123").unwrap();
        let spec = resolve(&schema(), &json!({}), &NoOverrides, &context).unwrap();
        let disk = DiskSpec::from_resolved(&spec).unwrap();

        assert_eq!(disk.disk_size, None);
        assert_eq!(disk.disk_type, None);
        assert_eq!(disk.mount_point, DEFAULT_MOUNT_POINT);
        assert_eq!(disk.num_striped_disks, 1);
    }

    #[test]
    fn disk_type_is_restricted_per_cloud() {
        let context = RunContext::new("123").unwrap();
        let error = resolve(&schema(), &json!({"disk_type": "gp2"}), &NoOverrides, &context)
            .unwrap_err();

        assert_eq!(
            error,
            Error::InvalidValue {
                option: "disk_type".to_string(),
                value: "\"gp2\"".to_string(),
                reason: InvalidReason::NotAllowed {
                    allowed: vec!["pd-standard".to_string(), "pd-ssd".to_string()],
                },
            }
        );
    }
}
