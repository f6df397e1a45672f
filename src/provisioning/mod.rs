//! Startup Provisioning Module
//!
//! Ensures the Cosmos DB database and the `starships` container exist before
//! the HTTP layer starts serving.
//!
//! ## Core Concepts
//! - **Two-step state check**: database first, then container. Each step is a
//!   create-if-not-exists call whose status code is inspected: 200 means
//!   already present, 201 means newly created, anything else aborts startup.
//! - **Idempotent**: safe to run on every startup; an existing deployment
//!   yields 200s and nothing is mutated.
//! - **Fail fast**: no retry. An unexpected status is misconfiguration, and
//!   the process must not begin serving traffic in that state.

pub mod provisioner;

#[cfg(test)]
mod tests;
