//! Weekly code churn and contributor activity for a GitHub repository.
//!
//! The pipeline runs strictly forward: [`config`] resolves credentials,
//! [`fetch`] obtains both statistics payloads, [`normalize`] reshapes them
//! onto a common weekly axis, [`scale`] derives the overlay factor and
//! [`compose`] turns the series into chart specifications.

pub mod activity;
pub mod charts;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod fetch;
pub mod frequency;
pub mod github;
pub mod logger;
pub mod model;
pub mod normalize;
pub mod scale;
pub mod tui;
pub mod util;
