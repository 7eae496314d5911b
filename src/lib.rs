//! Honeypot - Agentic scam-engagement service
//!
//! This crate keeps a believable conversation going with a suspected
//! scammer, accumulates the payment and contact details they reveal, and
//! reports the consolidated intelligence to an external evaluator exactly
//! once per session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
