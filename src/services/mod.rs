// src/services/mod.rs

//! External service clients: Google auth, the Sheets API, and the
//! club's content API.

pub mod auth;
pub mod content;
pub mod sheets;

pub use auth::TokenProvider;
pub use content::ContentClient;
pub use sheets::{SheetsClient, SpreadsheetStore};
