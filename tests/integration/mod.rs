//! Integration Tests Module
//!
//! End-to-end flows across stores, the view pipeline, the polling loop, and
//! persistence, driven through an in-memory API.

// Shared in-memory API used by the flow tests
mod support;

// Store action flows: create, filter changes, rollback
mod store_flow_test;

// Grouped view projections over resolved statuses
mod grouping_test;

// Background reconciliation behavior
mod polling_test;

// Durable snapshot restore and versioning
mod persistence_test;

// Cross-store event propagation
mod event_flow_test;
