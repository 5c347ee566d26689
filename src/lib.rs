//! Demo Analyzer
//!
//! Per-player statistics, multi-kill detection, position correlation and
//! composite ratings for one finished competitive match, computed from the
//! event tables an external demo decoder produces.
//!
//! This crate provides the engine and the `demo-analyzer` CLI.
//!
//! ## Getting Started
//!
//! ```bash
//! demo-analyzer analyze --input match_events.json --summary
//! demo-analyzer --help
//! ```
//!
//! From code:
//!
//! ```ignore
//! use demo_analyzer::parser::load_events;
//! use demo_analyzer::pipeline::analyze_match;
//! use demo_analyzer::utils::EngineConfig;
//!
//! let events = load_events("match_events.json")?;
//! let report = analyze_match(&events, &EngineConfig::default(), "match_events.json")?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod rating;
pub mod utils;
