//! Unit test suite entry point.

mod audit_tests;
mod config_tests;
mod dataset_tests;
mod description_tests;
mod error_tests;
mod linker_tests;
mod registry_tests;
