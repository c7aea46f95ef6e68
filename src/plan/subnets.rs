// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subnet layout across availability zones

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{CidrBlock, NetworkError};

/// Extra prefix bits for each IPv4 subnet (a /16 VPC yields /20 subnets)
pub const IPV4_SUBNET_NEWBITS: u8 = 4;

/// Extra prefix bits for each IPv6 subnet (a /56 VPC yields /64 subnets)
pub const IPV6_SUBNET_NEWBITS: u8 = 8;

/// Subnet class, in allocation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetTier {
    /// Routed to the internet gateway, hosts the load balancer
    Public,
    /// Egress through NAT, hosts cluster nodes
    Private,
    /// No route out of the VPC, hosts databases
    Protected,
}

impl SubnetTier {
    pub const ALL: [SubnetTier; 3] = [SubnetTier::Public, SubnetTier::Private, SubnetTier::Protected];

    /// Position in [`SubnetTier::ALL`]
    pub fn index(self) -> usize {
        match self {
            SubnetTier::Public => 0,
            SubnetTier::Private => 1,
            SubnetTier::Protected => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubnetTier::Public => "public",
            SubnetTier::Private => "private",
            SubnetTier::Protected => "protected",
        }
    }

    /// Kubernetes tag that lets the load balancer controller discover the subnet
    pub fn load_balancer_role_tag(self) -> Option<(&'static str, &'static str)> {
        match self {
            SubnetTier::Public => Some(("kubernetes.io/role/elb", "1")),
            SubnetTier::Private => Some(("kubernetes.io/role/internal-elb", "1")),
            SubnetTier::Protected => None,
        }
    }
}

impl fmt::Display for SubnetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subnet in one availability zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetPlan {
    /// `subnet-{tier}-{zone suffix}`
    pub name: String,
    pub tier: SubnetTier,
    pub availability_zone: String,
    /// Sibling index used for both address families
    pub index: u128,
    pub ipv4_cidr: CidrBlock,
    pub ipv6_cidr: Option<CidrBlock>,
    pub tags: BTreeMap<String, String>,
}

/// Trailing part of an availability zone name: `us-east-1a` → `1a`
///
/// A name without `-` is returned whole.
pub fn availability_zone_suffix(zone: &str) -> &str {
    zone.rsplit('-').next().unwrap_or(zone)
}

/// Lay out one subnet per tier and availability zone
///
/// Tier `t` in zone `z` of `n` zones gets sibling index `t * n + z`, so all
/// public subnets come first, then private, then protected. IPv6 subnets
/// reuse the same index inside the IPv6 block.
pub fn plan_subnets(
    vpc: &CidrBlock,
    vpc_ipv6: Option<&CidrBlock>,
    availability_zones: &[String],
) -> Result<Vec<SubnetPlan>, NetworkError> {
    let zone_count = availability_zones.len();
    let mut subnets = Vec::with_capacity(SubnetTier::ALL.len() * zone_count);

    for tier in SubnetTier::ALL {
        for (zone_index, zone) in availability_zones.iter().enumerate() {
            let index = (tier.index() * zone_count + zone_index) as u128;

            let ipv4_cidr = vpc.subnet(IPV4_SUBNET_NEWBITS, index)?;
            let ipv6_cidr = vpc_ipv6
                .map(|block| block.subnet(IPV6_SUBNET_NEWBITS, index))
                .transpose()?;

            let mut tags = BTreeMap::new();
            if let Some((key, value)) = tier.load_balancer_role_tag() {
                tags.insert(key.to_string(), value.to_string());
            }

            subnets.push(SubnetPlan {
                name: format!("subnet-{}-{}", tier, availability_zone_suffix(zone)),
                tier,
                availability_zone: zone.clone(),
                index,
                ipv4_cidr,
                ipv6_cidr,
                tags,
            });
        }
    }

    Ok(subnets)
}
