// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod group_sizing;
mod identity_roundtrip;
