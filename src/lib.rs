//! Hobbyist webhook service
//!
//! This crate implements the inbound payment-webhook pipeline for the
//! Hobbyist booking platform: signature verification, replay defense,
//! event decoding, and type-routed dispatch to business handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
