//! Data models for the Calorie AI service.
//!
//! This module contains the data structures exchanged with the server:
//!
//! - `UserProfile`: the account profile behind `/user/profile`
//! - `AnalysisSummary`: one history entry from `/openai/analyses`
//! - `AnalysisResult`, `FoodItem`: the output of an image analysis
//! - `AnalysisDetail`: a stored analysis with its result and metadata

pub mod analysis;
pub mod user;

pub use analysis::{AnalysisDetail, AnalysisResult, AnalysisSummary, FoodItem};
pub use user::UserProfile;
