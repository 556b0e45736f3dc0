//! Marquee - booking and inquiry backend for a talent agency website
//!
//! The crate is a single-process HTTP service:
//!
//! - templated HTML pages for the public site and the admin panel
//! - a single admin account authenticated via a signed session cookie
//! - JSON endpoints over three persisted entities (talents, bookings,
//!   inquiry questions)
//!
//! # Features
//!
//! - `sqlite` - SQLite database backend. Enabled by default.
//! - `postgres` - PostgreSQL database backend.
//!
//! Storage is optional at runtime: without a configured connection string
//! the service starts in demo mode and data endpoints fail closed.

pub mod config;
pub mod errors;
pub mod server;
