//! Google Cloud provider

use serde::Serialize;
use spec_core::{OptionSchema, ResolvedSpec, SpecSchema};

use crate::cloud::Cloud;
use crate::disk::disk_schema;
use crate::provider::CloudProvider;

const GCE_DISK_TYPES: &[&str] = &["pd-standard", "pd-balanced", "pd-ssd", "local"];

/// CloudProvider for GCP
#[derive(Debug, Clone, Copy, Default)]
pub struct GcpProvider;

impl CloudProvider for GcpProvider {
    fn cloud(&self) -> Cloud {
        Cloud::Gcp
    }

    fn vm_schema(&self) -> spec_core::Result<SpecSchema> {
        SpecSchema::builder("gce_vm_spec")
            .option(
                OptionSchema::string("machine_type")
                    .describe("GCE machine type, e.g. n1-standard-1"),
            )
            .option(
                OptionSchema::string("zone")
                    .flag("zones")
                    .describe("Zone the VM is created in"),
            )
            .option(
                OptionSchema::integer("cpus")
                    .min(1)
                    .describe("vCPUs of a custom machine type"),
            )
            .option(
                OptionSchema::string("memory")
                    .required_with("cpus")
                    .describe("Memory of a custom machine type, e.g. 7.5GiB"),
            )
            .option(
                OptionSchema::boolean("preemptible")
                    .default_value(false)
                    .flag("gce_preemptible_vms"),
            )
            .option(
                OptionSchema::integer("boot_disk_size")
                    .min(10)
                    .flag("gce_boot_disk_size")
                    .describe("Boot disk size in GB"),
            )
            .option(OptionSchema::string("image"))
            .option(OptionSchema::string("project").describe("GCP project to create the VM in"))
            .build()
    }

    fn disk_schema(&self) -> spec_core::Result<SpecSchema> {
        disk_schema("gce_disk_spec", GCE_DISK_TYPES)
    }
}

/// Custom GCE machine shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomMachineType {
    pub cpus: u64,
    pub memory: String,
}

/// Resolved GCE VM settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GceVmSpec {
    pub machine_type: Option<String>,
    pub zone: Option<String>,
    pub custom_machine: Option<CustomMachineType>,
    pub preemptible: bool,
    pub boot_disk_size: Option<u64>,
    pub image: Option<String>,
    pub project: Option<String>,
}

impl GceVmSpec {
    pub fn from_resolved(spec: &ResolvedSpec) -> spec_core::Result<Self> {
        let custom_machine = match spec.unsigned("cpus")? {
            Some(cpus) => Some(CustomMachineType {
                cpus,
                memory: spec.required_string("memory")?.to_string(),
            }),
            None => None,
        };

        Ok(Self {
            machine_type: spec.string("machine_type")?.map(String::from),
            zone: spec.string("zone")?.map(String::from),
            custom_machine,
            preemptible: spec.required_bool("preemptible")?,
            boot_disk_size: spec.unsigned("boot_disk_size")?,
            image: spec.string("image")?.map(String::from),
            project: spec.string("project")?.map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spec_core::{Error, FlagValues, NoOverrides, RunContext, resolve};

    fn resolve_gce(raw: serde_json::Value, flags: &FlagValues) -> spec_core::Result<GceVmSpec> {
        let schema = GcpProvider.vm_schema()?;
        let context = RunContext::new("123")?;
        let spec = resolve(&schema, &raw, flags, &context)?;
        GceVmSpec::from_resolved(&spec)
    }

    #[test]
    fn minimal_spec_uses_defaults() {
        let vm = resolve_gce(json!({"machine_type": "n1-standard-1"}), &FlagValues::new()).unwrap();
        assert_eq!(vm.machine_type.as_deref(), Some("n1-standard-1"));
        assert!(!vm.preemptible);
        assert_eq!(vm.custom_machine, None);
        assert_eq!(vm.zone, None);
    }

    #[test]
    fn custom_machine_needs_memory() {
        let error = resolve_gce(json!({"cpus": 4}), &FlagValues::new()).unwrap_err();
        assert_eq!(
            error,
            Error::MissingRequiredOption {
                option: "memory".to_string(),
                required_by: Some("cpus".to_string()),
            }
        );

        let vm = resolve_gce(json!({"cpus": 4, "memory": "15GiB"}), &FlagValues::new()).unwrap();
        assert_eq!(
            vm.custom_machine,
            Some(CustomMachineType {
                cpus: 4,
                memory: "15GiB".to_string()
            })
        );
    }

    #[test]
    fn gce_flags_override_config() {
        let mut flags = FlagValues::new();
        flags
            .parse("zones", "us-central1-a")
            .parse("gce_preemptible_vms", true)
            .parse("gce_boot_disk_size", 100);

        let vm = resolve_gce(json!({"zone": "us-east1-b"}), &flags).unwrap();
        assert_eq!(vm.zone.as_deref(), Some("us-central1-a"));
        assert!(vm.preemptible);
        assert_eq!(vm.boot_disk_size, Some(100));
    }

    #[test]
    fn boot_disk_below_minimum_fails() {
        let context = RunContext::new("123").unwrap();
        let schema = GcpProvider.vm_schema().unwrap();
        let result = resolve(&schema, &json!({"boot_disk_size": 5}), &NoOverrides, &context);
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }
}
