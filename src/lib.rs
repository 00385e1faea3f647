//! Piece-work payroll engine for task-based farm labour.
//!
//! This crate implements the business rules behind task-work assignments,
//! weekly wage disbursements, overtime requisitions, employee change
//! requests, approval-chain notifications, and the wages journal entry
//! posted when a disbursement is marked paid.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
pub mod ops;
pub mod store;
pub mod workflow;
