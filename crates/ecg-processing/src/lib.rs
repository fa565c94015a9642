//! ECG-Processing: Limb-lead derivation and rhythm analysis
//!
//! The two pure functions at the heart of the service: closed-form
//! derivation of the limb leads from Lead I and Lead II, and the mock
//! threshold-crossing rhythm analyzer.

pub mod analysis;
pub mod derive;

pub use analysis::{analyze_rhythm, AnalysisResult};
pub use derive::derive_limb_leads;
