// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects and CIDR Sub-block Allocation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

/// Network validation and allocation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The input is not `<address>/<prefix length>` for a valid address family
    #[error("Invalid CIDR block {input:?}: {reason}")]
    AddressFormat { input: String, reason: String },

    /// The requested sub-block cannot be carved out of the parent block
    #[error("Cannot allocate sub-block {index} (+{newbits} bits) of {parent}: {reason}")]
    Allocation {
        parent: String,
        newbits: u8,
        index: u128,
        reason: String,
    },
}

impl NetworkError {
    fn address_format(input: &str, reason: impl Into<String>) -> Self {
        NetworkError::AddressFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Network address block in CIDR notation
///
/// Represents an IPv4 or IPv6 network address with a mandatory prefix length.
/// Invariants:
/// - Valid IP address format
/// - Prefix length within the width of the address family (32 or 128)
///
/// Bits after the prefix are kept as given; they are not normalized to zero.
///
/// # Examples
///
/// ```rust
/// use cim_topology::domain::CidrBlock;
///
/// let vpc = CidrBlock::new("10.0.0.0/16").unwrap();
/// let subnet = vpc.subnet(4, 3).unwrap();
/// assert_eq!(subnet.to_string(), "10.0.48.0/20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CidrBlock {
    address: IpAddr,
    prefix_length: u8,
}

impl CidrBlock {
    /// Width of an IPv4 address in bits
    pub const IPV4_WIDTH: u8 = 32;

    /// Width of an IPv6 address in bits
    pub const IPV6_WIDTH: u8 = 128;

    /// Parse a CIDR block such as `172.16.0.0/12` or `fd00::/56`
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::address_format(cidr, "missing prefix length"))?;

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::address_format(cidr, format!("invalid address {addr_str:?}")))?;

        // u8::from_str also takes a leading '+'; the mask must be plain decimal
        if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NetworkError::address_format(
                cidr,
                format!("invalid prefix length {prefix_str:?}"),
            ));
        }

        let prefix_length = prefix_str.parse::<u8>().map_err(|_| {
            NetworkError::address_format(cidr, format!("invalid prefix length {prefix_str:?}"))
        })?;

        Self::from_parts(address, prefix_length)
            .map_err(|_| NetworkError::address_format(cidr, format!("prefix length {prefix_length} exceeds address width")))
    }

    /// Create from separate address and prefix length
    pub fn from_parts(address: IpAddr, prefix_length: u8) -> Result<Self, NetworkError> {
        let block = Self {
            address,
            prefix_length,
        };

        if prefix_length > block.width() {
            return Err(NetworkError::address_format(
                &format!("{address}/{prefix_length}"),
                format!("prefix length {prefix_length} exceeds {}", block.width()),
            ));
        }

        Ok(block)
    }

    /// Get the network address
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Get the prefix length
    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Number of bits in the address family (32 for IPv4, 128 for IPv6)
    pub fn width(&self) -> u8 {
        match self.address {
            IpAddr::V4(_) => Self::IPV4_WIDTH,
            IpAddr::V6(_) => Self::IPV6_WIDTH,
        }
    }

    /// Check if this is an IPv4 block
    pub fn is_ipv4(&self) -> bool {
        matches!(self.address, IpAddr::V4(_))
    }

    /// Check if this is an IPv6 block
    pub fn is_ipv6(&self) -> bool {
        matches!(self.address, IpAddr::V6(_))
    }

    /// Carve sibling number `index` out of `2^newbits` equal sub-blocks
    ///
    /// The binary form of `index`, zero-padded to `newbits` bits, is spliced
    /// into the address starting at bit offset `prefix_length`. Only that
    /// window is overwritten; the window need not be byte-aligned.
    ///
    /// # Invariants
    /// - `prefix_length + newbits <= width`
    /// - `index < 2^newbits`
    /// - result prefix length is `prefix_length + newbits`
    pub fn subnet(&self, newbits: u8, index: u128) -> Result<Self, NetworkError> {
        let allocation_error = |reason: String| NetworkError::Allocation {
            parent: self.to_string(),
            newbits,
            index,
            reason,
        };

        let width = u32::from(self.width());
        let new_prefix = u32::from(self.prefix_length) + u32::from(newbits);
        if new_prefix > width {
            return Err(allocation_error(format!(
                "prefix length {new_prefix} exceeds address width {width}"
            )));
        }

        if index > low_mask(u32::from(newbits)) {
            return Err(allocation_error(format!(
                "index does not fit in {newbits} bits"
            )));
        }

        if newbits == 0 {
            return Ok(self.clone());
        }

        // Window occupies bits [prefix, prefix + newbits) counted from the MSB.
        let shift = width - new_prefix;
        let window = low_mask(u32::from(newbits)) << shift;
        let spliced = (self.bits() & !window) | (index << shift);

        let address = match self.address {
            IpAddr::V4(_) => {
                let packed = u32::try_from(spliced).map_err(|_| {
                    allocation_error("spliced address does not fit 32 bits".to_string())
                })?;
                IpAddr::V4(Ipv4Addr::from(packed))
            }
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(spliced)),
        };

        // new_prefix <= width <= 128 was checked above
        Ok(Self {
            address,
            prefix_length: new_prefix as u8,
        })
    }

    /// Get as CIDR notation string
    pub fn as_cidr(&self) -> String {
        format!("{}/{}", self.address, self.prefix_length)
    }

    fn bits(&self) -> u128 {
        match self.address {
            IpAddr::V4(addr) => u128::from(u32::from(addr)),
            IpAddr::V6(addr) => u128::from(addr),
        }
    }
}

/// Mask with the lowest `bits` bits set
fn low_mask(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Allocate a sub-block of `prefix` and return it in CIDR notation
///
/// Equivalent to parsing `prefix` as a [`CidrBlock`] and calling
/// [`CidrBlock::subnet`].
///
/// # Examples
///
/// ```rust
/// use cim_topology::domain::allocate;
///
/// assert_eq!(allocate("10.1.2.0/24", 4, 15).unwrap(), "10.1.2.240/28");
/// assert!(allocate("10.1.2.0/24", 4, 16).is_err());
/// ```
pub fn allocate(prefix: &str, newbits: u8, index: u128) -> Result<String, NetworkError> {
    let parent = CidrBlock::new(prefix)?;
    Ok(parent.subnet(newbits, index)?.as_cidr())
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cidr())
    }
}

impl FromStr for CidrBlock {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CidrBlock {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CidrBlock> for String {
    fn from(block: CidrBlock) -> Self {
        block.as_cidr()
    }
}
