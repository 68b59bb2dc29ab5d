//! Per-cloud sub-spec schemas for benchmark specs.
//!
//! Specs that provision machines carry union options (`vm_spec`,
//! `disk_spec`) whose shape depends on the target cloud. This crate provides
//! the closed set of supported clouds, one [`CloudProvider`] per cloud
//! supplying the branch schemas, and typed records for the resolved
//! branches.

pub mod aws;
pub mod azure;
pub mod cloud;
pub mod disk;
pub mod error;
pub mod gcp;
pub mod provider;
pub mod registry;
pub mod vm;

pub use aws::{AwsProvider, AwsVmSpec};
pub use azure::{AzureProvider, AzureVmSpec};
pub use cloud::Cloud;
pub use disk::{CloudDiskSpec, DEFAULT_MOUNT_POINT, DiskSpec};
pub use error::{Error, Result};
pub use gcp::{CustomMachineType, GceVmSpec, GcpProvider};
pub use provider::CloudProvider;
pub use registry::ProviderRegistry;
pub use vm::VmSpec;
