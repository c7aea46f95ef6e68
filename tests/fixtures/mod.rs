// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-topology
//!
//! Deterministic topology configs shared by the integration tests.

#![allow(dead_code)]

use cim_topology::{CloudFrontGroup, TopologyConfig};

pub const AVAILABILITY_ZONES: [&str; 3] = ["ap-northeast-1a", "ap-northeast-1c", "ap-northeast-1d"];

pub const VPC_IPV6_CIDR: &str = "2406:da14:abc:6a00::/56";

pub const LOAD_BALANCER_DOMAIN: &str = "lb.example.com";

/// JSON form of [`topology_config_fixture`]
pub const TOPOLOGY_CONFIG_JSON: &str = r#"{
    "availabilityZones": ["ap-northeast-1a", "ap-northeast-1c", "ap-northeast-1d"],
    "cloudFrontGroups": [
        { "name": "web", "domains": ["example.com", "*.example.com"] },
        { "name": "docs", "domains": ["docs.example.net", "*.docs.example.net"] }
    ],
    "loadBalancerDomain": "lb.example.com",
    "vpcCidr": "10.0.0.0/16",
    "vpcIpv6Cidr": "2406:da14:abc:6a00::/56"
}"#;

/// Three zones, two CDN groups, dual-stack VPC
pub fn topology_config_fixture() -> TopologyConfig {
    TopologyConfig::new(AVAILABILITY_ZONES, LOAD_BALANCER_DOMAIN)
        .with_vpc_ipv6_cidr(VPC_IPV6_CIDR)
        .with_cloud_front_group(CloudFrontGroup::new("web", ["example.com", "*.example.com"]))
        .with_cloud_front_group(CloudFrontGroup::new(
            "docs",
            ["docs.example.net", "*.docs.example.net"],
        ))
}
