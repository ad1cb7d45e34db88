// src/models/mod.rs

//! Domain models for the sync service.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod content;
mod stats;
mod submission;
mod sync;

// Re-export all public types
pub use content::{
    ApiResponse, Category, Comment, ContactSubmission, Course, CreateCommentRequest,
    CreateContactRequest, CreateRegistrationRequest, PaginatedResponse, Post, Registration,
};
pub use stats::AggregateStats;
pub use submission::{Scalar, SubmissionRecord};
pub use sync::{Row, SyncKind, SyncOutcome, SyncPlan};
