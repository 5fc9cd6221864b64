//! RiskDesk scenario engine.
//!
//! Maps client baseline risk plus macro-economic shocks to post-shock
//! risk scores, keeps the saved scenario runs of a session and merges
//! up to three of them for side-by-side comparison.

pub mod client;
pub mod clock;
pub mod command;
pub mod comparison;
pub mod config;
pub mod directory;
pub mod error;
pub mod event;
pub mod fixtures;
pub mod name_generator;
pub mod risk_model;
pub mod rng;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod shock;
pub mod store;
pub mod types;
