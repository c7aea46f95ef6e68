// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Plan
//!
//! Turns a [`TopologyConfig`] into the plain values the resource
//! composition layer needs: subnet blocks per tier and availability zone,
//! hosted zones, and certificate validation routing.
//!
//! Planning is synchronous and pure. Provider outputs that are only known
//! after resources exist are resolved by the caller before planning and
//! never flow through here.

pub mod dns;
pub mod subnets;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TopologyConfig;
use crate::domain::CidrBlock;
use crate::errors::TopologyResult;

pub use dns::{plan_dns, CertificatePlan, DnsPlan, HostedZonePlan, LOAD_BALANCER_CERTIFICATE};
pub use subnets::{
    availability_zone_suffix, plan_subnets, SubnetPlan, SubnetTier, IPV4_SUBNET_NEWBITS,
    IPV6_SUBNET_NEWBITS,
};

/// Complete plan-time topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyPlan {
    pub vpc_cidr: CidrBlock,
    pub vpc_ipv6_cidr: Option<CidrBlock>,
    pub subnets: Vec<SubnetPlan>,
    pub dns: DnsPlan,
}

impl TopologyPlan {
    /// Validate `config` and compute the plan
    pub fn build(config: &TopologyConfig) -> TopologyResult<Self> {
        config.validate()?;

        let vpc_cidr = config.vpc_block()?;
        let vpc_ipv6_cidr = config.vpc_ipv6_block()?;

        let subnets = plan_subnets(&vpc_cidr, vpc_ipv6_cidr.as_ref(), &config.availability_zones)?;
        for subnet in &subnets {
            debug!(
                name = %subnet.name,
                ipv4 = %subnet.ipv4_cidr,
                ipv6 = ?subnet.ipv6_cidr.as_ref().map(CidrBlock::as_cidr),
                "Planned subnet"
            );
        }

        let dns = plan_dns(&config.cloud_front_groups, &config.load_balancer_domain)?;

        info!(
            vpc = %vpc_cidr,
            subnets = subnets.len(),
            hosted_zones = dns.hosted_zones.len(),
            certificates = dns.certificates.len(),
            "Built topology plan"
        );

        Ok(Self {
            vpc_cidr,
            vpc_ipv6_cidr,
            subnets,
            dns,
        })
    }

    /// Subnets of one tier, in availability zone order
    pub fn subnets_in(&self, tier: SubnetTier) -> impl Iterator<Item = &SubnetPlan> {
        self.subnets.iter().filter(move |s| s.tier == tier)
    }

    pub fn to_json_pretty(&self) -> TopologyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
