//! Shared utilities and common types for the padel club backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation
//! - Password hashing with Argon2id
//! - Session token hashing
//! - Cursor pagination for slot listings
//! - Domain validation helpers

pub mod crypto;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
