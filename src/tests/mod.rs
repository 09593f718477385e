//! End-to-end pipeline tests against local mock HTTP servers.

mod pipeline_tests;
