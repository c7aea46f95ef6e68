// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosted zones and certificate validation routing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::CloudFrontGroup;
use crate::domain::{resolve, ZoneResolution};
use crate::errors::{TopologyError, TopologyResult};

/// Certificate name used for the load balancer domain
pub const LOAD_BALANCER_CERTIFICATE: &str = "lb";

/// Hosted zone to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZonePlan {
    pub domain: String,
    /// Domain with dots replaced by dashes
    pub resource_name: String,
}

impl HostedZonePlan {
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            resource_name: domain.replace('.', "-"),
            domain,
        }
    }
}

/// DNS-validated certificate and the zones holding its validation records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificatePlan {
    pub name: String,
    pub domain_name: String,
    pub subject_alternative_names: Vec<String>,
    /// Certificate domain → hosted zone for its validation record
    pub validation_zones: BTreeMap<String, String>,
}

impl CertificatePlan {
    /// All domains on the certificate, primary name first
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.domain_name.as_str())
            .chain(self.subject_alternative_names.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPlan {
    pub hosted_zones: Vec<HostedZonePlan>,
    pub certificates: Vec<CertificatePlan>,
    /// Zone holding the load balancer alias record
    pub load_balancer_zone: String,
    pub resolution: ZoneResolution,
}

impl DnsPlan {
    pub fn certificate(&self, name: &str) -> Option<&CertificatePlan> {
        self.certificates.iter().find(|c| c.name == name)
    }
}

/// Plan hosted zones for every CDN domain plus the load balancer domain
///
/// Zones come from [`resolve`] over the CDN group domains followed by the
/// load balancer domain. One certificate is planned per group and one for
/// the load balancer.
pub fn plan_dns(groups: &[CloudFrontGroup], load_balancer_domain: &str) -> TopologyResult<DnsPlan> {
    let domains = groups
        .iter()
        .flat_map(|group| group.domains.iter().map(String::as_str))
        .chain(std::iter::once(load_balancer_domain));

    let resolution = resolve(domains);
    debug!(
        zones = resolution.zones.len(),
        domains = resolution.assignments.len(),
        "Resolved hosted zones"
    );

    let hosted_zones = resolution.zones.iter().map(HostedZonePlan::new).collect();

    let mut certificates = Vec::with_capacity(groups.len() + 1);
    for group in groups {
        let (primary, alternatives) = group.domains.split_first().ok_or_else(|| {
            TopologyError::Configuration(format!("cloudFrontGroups entry {} has no domains", group.name))
        })?;
        certificates.push(certificate_plan(&resolution, &group.name, primary, alternatives)?);
    }
    certificates.push(certificate_plan(
        &resolution,
        LOAD_BALANCER_CERTIFICATE,
        load_balancer_domain,
        &[],
    )?);

    let load_balancer_zone = zone_for(&resolution, load_balancer_domain)?;

    Ok(DnsPlan {
        hosted_zones,
        certificates,
        load_balancer_zone,
        resolution,
    })
}

fn zone_for(resolution: &ZoneResolution, domain: &str) -> TopologyResult<String> {
    resolution
        .zone_for(domain)
        .map(str::to_string)
        .ok_or_else(|| TopologyError::ZoneLookup(domain.to_string()))
}

fn certificate_plan(
    resolution: &ZoneResolution,
    name: &str,
    primary: &str,
    alternatives: &[String],
) -> TopologyResult<CertificatePlan> {
    let mut validation_zones = BTreeMap::new();
    for domain in std::iter::once(primary).chain(alternatives.iter().map(String::as_str)) {
        validation_zones.insert(domain.to_string(), zone_for(resolution, domain)?);
    }

    Ok(CertificatePlan {
        name: name.to_string(),
        domain_name: primary.to_string(),
        subject_alternative_names: alternatives.to_vec(),
        validation_zones,
    })
}
