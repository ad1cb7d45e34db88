// src/lib.rs

//! sheetsync library
//!
//! Server-side sync layer for the club website: a typed client for the
//! remote content API and the Google Sheets export endpoint.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod locale;
pub mod models;
pub mod pipeline;
pub mod projector;
pub mod services;
