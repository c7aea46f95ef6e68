//! Plan-time topology computations for cloud infrastructure
//!
//! This crate provides the pure parts of declaring a cloud topology: carving
//! subnet blocks out of a VPC address space and choosing the DNS hosted
//! zones that serve a set of domains. Resource creation and provider calls
//! belong to the caller.

pub mod config;
pub mod domain;
pub mod errors;
pub mod plan;

// Re-export commonly used types
pub use config::{CloudFrontGroup, TopologyConfig};
pub use domain::{allocate, resolve, CidrBlock, DomainPattern, NetworkError, ZoneResolution};
pub use errors::{TopologyError, TopologyResult};
pub use plan::{SubnetTier, TopologyPlan};
