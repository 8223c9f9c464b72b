//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store adapters into the persistence façade, backup
//!   and retention use-cases.
//! - Keep presentation callers decoupled from storage details.

pub mod backup;
pub mod gateway;
pub mod retention;
pub mod startup;
