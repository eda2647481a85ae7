//! The `taskvault` library crate.
//!
//! This crate contains the core business logic for the TaskVault backend:
//! domain models, the authentication stack (password hashing, JWT issuance
//! and validation, the request guard), routing configuration, and error
//! handling. It is used by the main binary (`main.rs`) to construct and run
//! the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

// lib.rs only declares modules for the library crate. The application setup
// (app factory) lives in main.rs; integration tests assemble their own App
// the same way.
