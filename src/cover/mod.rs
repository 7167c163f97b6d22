//! Minimal session cover
//!
//! Given the structure classes found in each session, select a small subset
//! of sessions that together exhibit every class. The selector consumes a
//! sealed [`SessionClassIndex`] produced by the structure pass.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shape_survey::cover::{CoverSelector, SessionClassIndex};
//!
//! let index = SessionClassIndex::load(Path::new("session_index.json"))?;
//! let report = CoverSelector::new().select(&index)?;
//! for step in &report.steps {
//!     println!("{} +{}", step.session_id, step.new_classes_contributed);
//! }
//! ```

mod error;
mod index;
mod report;
mod selector;

pub use error::CoverError;
pub use index::{SessionClassIndex, SessionInfo};
pub use report::{ClassFrequency, CoverageReport, CoverageStep};
pub use selector::{
    CoverConfig, CoverConfigBuilder, CoverSelection, CoverSelector, select_minimal_cover,
};
