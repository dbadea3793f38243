//! BesideAI backend.
//!
//! Reconciles LemonSqueezy billing webhooks into user plans and credit
//! grants, prices credit purchases and gates application routes by session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
