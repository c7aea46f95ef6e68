// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology configuration
//!
//! Mirrors the stack configuration object consumed by the resource
//! composition layer (camelCase keys). Loading validates the syntax of every
//! CIDR block and domain; it does not check overlap or DNS delegation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::domain::{CidrBlock, DomainPattern};
use crate::errors::{TopologyError, TopologyResult};

/// Default IPv4 block of the VPC
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";

fn default_vpc_cidr() -> String {
    DEFAULT_VPC_CIDR.to_string()
}

/// Domains served by one CDN distribution and one certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloudFrontGroup {
    /// Group name, also used as the certificate name
    pub name: String,
    /// First domain is the certificate's primary name, the rest are SANs
    pub domains: Vec<String>,
}

impl CloudFrontGroup {
    pub fn new(name: impl Into<String>, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }
}

/// Input for [`TopologyPlan::build`](crate::plan::TopologyPlan::build)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TopologyConfig {
    /// Availability zones, in subnet allocation order
    pub availability_zones: Vec<String>,

    #[serde(default)]
    pub cloud_front_groups: Vec<CloudFrontGroup>,

    /// Domain of the public network load balancer
    pub load_balancer_domain: String,

    /// IPv4 block of the VPC
    #[serde(default = "default_vpc_cidr")]
    pub vpc_cidr: String,

    /// IPv6 block of the VPC; IPv6 subnets are planned only when set
    #[serde(default)]
    pub vpc_ipv6_cidr: Option<String>,
}

impl TopologyConfig {
    /// Create a config with the default VPC block and no CDN groups
    pub fn new(
        availability_zones: impl IntoIterator<Item = impl Into<String>>,
        load_balancer_domain: impl Into<String>,
    ) -> Self {
        Self {
            availability_zones: availability_zones.into_iter().map(Into::into).collect(),
            cloud_front_groups: Vec::new(),
            load_balancer_domain: load_balancer_domain.into(),
            vpc_cidr: default_vpc_cidr(),
            vpc_ipv6_cidr: None,
        }
    }

    pub fn with_cloud_front_group(mut self, group: CloudFrontGroup) -> Self {
        self.cloud_front_groups.push(group);
        self
    }

    pub fn with_vpc_cidr(mut self, cidr: impl Into<String>) -> Self {
        self.vpc_cidr = cidr.into();
        self
    }

    pub fn with_vpc_ipv6_cidr(mut self, cidr: impl Into<String>) -> Self {
        self.vpc_ipv6_cidr = Some(cidr.into());
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> TopologyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> TopologyResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TopologyError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Parsed IPv4 VPC block
    pub fn vpc_block(&self) -> TopologyResult<CidrBlock> {
        let block = CidrBlock::new(&self.vpc_cidr)?;
        if !block.is_ipv4() {
            return Err(TopologyError::Configuration(format!(
                "vpcCidr must be an IPv4 block: {}",
                self.vpc_cidr
            )));
        }
        Ok(block)
    }

    /// Parsed IPv6 VPC block, if configured
    pub fn vpc_ipv6_block(&self) -> TopologyResult<Option<CidrBlock>> {
        let Some(cidr) = &self.vpc_ipv6_cidr else {
            return Ok(None);
        };

        let block = CidrBlock::new(cidr)?;
        if !block.is_ipv6() {
            return Err(TopologyError::Configuration(format!(
                "vpcIpv6Cidr must be an IPv6 block: {cidr}"
            )));
        }
        Ok(Some(block))
    }

    /// Check syntax and structural rules
    ///
    /// # Rules
    /// - At least one availability zone, no blanks or duplicates
    /// - VPC blocks parse and match their address family
    /// - Every domain is a valid [`DomainPattern`]
    /// - CDN group names are non-empty and unique, each group has a domain
    pub fn validate(&self) -> TopologyResult<()> {
        if self.availability_zones.is_empty() {
            return Err(TopologyError::Configuration(
                "at least one availability zone is required".to_string(),
            ));
        }

        let mut zones = HashSet::new();
        for zone in &self.availability_zones {
            if zone.trim().is_empty() {
                return Err(TopologyError::Configuration(
                    "availability zone name is empty".to_string(),
                ));
            }
            if !zones.insert(zone.as_str()) {
                return Err(TopologyError::Configuration(format!(
                    "duplicate availability zone: {zone}"
                )));
            }
        }

        self.vpc_block()?;
        self.vpc_ipv6_block()?;

        DomainPattern::new(self.load_balancer_domain.as_str())?;

        let mut names = HashSet::new();
        for group in &self.cloud_front_groups {
            if group.name.trim().is_empty() {
                return Err(TopologyError::Configuration(
                    "cloudFrontGroups entry has an empty name".to_string(),
                ));
            }
            if !names.insert(group.name.as_str()) {
                return Err(TopologyError::Configuration(format!(
                    "duplicate cloudFrontGroups name: {}",
                    group.name
                )));
            }
            if group.domains.is_empty() {
                return Err(TopologyError::Configuration(format!(
                    "cloudFrontGroups entry {} has no domains",
                    group.name
                )));
            }
            for domain in &group.domains {
                DomainPattern::new(domain.as_str())?;
            }
        }

        Ok(())
    }
}
