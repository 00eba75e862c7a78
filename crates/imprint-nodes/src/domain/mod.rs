//! # Node Graph Domain
//!
//! Entities for the ownership/delegation forest.

pub mod node;
