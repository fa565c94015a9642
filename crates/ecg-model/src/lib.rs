//! ECG-Model: Precordial-lead synthesis boundary
//!
//! The service treats precordial generation as an opaque collaborator: two
//! equal-length limb signals in, exactly six V leads of the same length
//! out, or nothing when the model is unavailable. This crate defines that
//! seam and ships a pretrained linear synthesis model loaded from disk.

pub mod generator;

pub use generator::{LeadWeights, LinearLeadModel, ModelWeights, PrecordialGenerator};
