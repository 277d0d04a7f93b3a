//! Pipeline module - the feature engineering steps applied before scoring

pub mod align;
pub mod batch;
pub mod cleanup;
pub mod encode;
pub mod error;
pub mod missing;
pub mod outcome;
pub mod preprocess;
pub mod schema;
pub mod standardize;

pub use align::*;
pub use batch::*;
pub use cleanup::*;
pub use encode::*;
pub use error::*;
pub use missing::*;
pub use outcome::*;
pub use preprocess::*;
pub use standardize::*;
