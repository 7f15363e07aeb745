//! Test Module
//!
//! Cross-module test suites for the FlexItOut core.
//!
//! ## Test Categories
//! - `form_tests`: geometry properties, band boundaries, dispatch and aggregation
//! - `service_tests`: feedback actor behavior, validation, concurrency
//! - `integration_tests`: JSON line in, JSON line out

pub mod integration_tests;
