//! Integration test modules.

mod controller_flow_test;
