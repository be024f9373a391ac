//! Shared domain types for VAHLA.
//!
//! This crate contains the core domain types used across the VAHLA platform:
//! Skill, AgentDraft, DeployStatus, CommunityAgent, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod config;
pub mod deploy;
pub mod error;
pub mod skill;
