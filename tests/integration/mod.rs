//! Integration test modules.

mod export_test;
mod migration_test;
mod tracker_flow_test;
