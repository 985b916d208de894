//! Core types and definitions for the BARRAGE encounter engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! math types, enumerations, configuration records, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod types;

#[cfg(test)]
mod tests;
