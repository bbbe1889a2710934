// src/lib.rs

//! Sakai crawler library
//!
//! Heuristic extraction of courses, announcements, assignments and exams
//! from a Sakai LMS portal whose markup varies between institutions.

pub mod dates;
pub mod error;
pub mod fetch;
pub mod models;
pub mod patterns;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

pub use error::{AppError, Result};
pub use services::PortalScraper;
