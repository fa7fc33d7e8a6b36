//! orgql - GraphQL API for organizations and employees
//!
//! This library provides the core functionality for the orgql server,
//! including the SQLite data layer, token issuance and verification, the
//! GraphQL schema, and the HTTP handlers that serve it.

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod util;
