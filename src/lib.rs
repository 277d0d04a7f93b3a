//! phatserve: batch scoring library
//!
//! Reproduces the training-time feature engineering on each incoming batch,
//! applies the fitted logit model and labels every record as an event or not.

pub mod cli;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod server;
pub mod utils;
