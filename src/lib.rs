//! Termtable - Weekly Class Session Scheduling
//!
//! This crate schedules recurring weekly class sessions for an academic
//! institution and fans change notifications out to affected students in
//! near real time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
