// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of sub-block allocation and hosted zone resolution that must
//! hold for all valid inputs.

mod cidr_allocation;
mod zone_resolution;
