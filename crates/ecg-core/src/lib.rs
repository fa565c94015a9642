//! ECG-Core: Foundation types for the ECG reconstruction service
//!
//! Lead naming, signal containers, the shared error type, and a minimal
//! WFDB-subset record reader.

pub mod error;
pub mod leads;
pub mod record;

pub use error::{EcgError, EcgResult};
pub use leads::{Lead, LeadSet, Signal, SAMPLING_RATE_HZ};
pub use record::{read_record, RecordHeader};
