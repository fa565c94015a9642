//! Lead naming and signal containers
//!
//! A `Signal` is a plain sample vector at the fixed assumed sampling rate;
//! a `LeadSet` maps lead names to signals for one request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed sampling rate assumed for all signals (Hz)
pub const SAMPLING_RATE_HZ: f64 = 500.0;

/// Ordered sequence of voltage samples, no timestamps attached
pub type Signal = Vec<f64>;

/// The twelve conventional ECG lead names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lead {
    I,
    II,
    III,
    #[serde(rename = "aVR")]
    AVR,
    #[serde(rename = "aVL")]
    AVL,
    #[serde(rename = "aVF")]
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

impl Lead {
    /// The six limb leads, derivable from Lead I and Lead II
    pub const LIMB_LEADS: [Lead; 6] = [
        Lead::I,
        Lead::II,
        Lead::III,
        Lead::AVR,
        Lead::AVL,
        Lead::AVF,
    ];

    /// The six precordial (chest) leads
    pub const PRECORDIAL_LEADS: [Lead; 6] =
        [Lead::V1, Lead::V2, Lead::V3, Lead::V4, Lead::V5, Lead::V6];

    /// Conventional display name ("aVR", "V3", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Lead::I => "I",
            Lead::II => "II",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
            Lead::V1 => "V1",
            Lead::V2 => "V2",
            Lead::V3 => "V3",
            Lead::V4 => "V4",
            Lead::V5 => "V5",
            Lead::V6 => "V6",
        }
    }

    /// Whether this is one of V1-V6
    pub fn is_precordial(&self) -> bool {
        matches!(
            self,
            Lead::V1 | Lead::V2 | Lead::V3 | Lead::V4 | Lead::V5 | Lead::V6
        )
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lead {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Lead::I),
            "II" => Ok(Lead::II),
            "III" => Ok(Lead::III),
            "aVR" | "AVR" | "avr" => Ok(Lead::AVR),
            "aVL" | "AVL" | "avl" => Ok(Lead::AVL),
            "aVF" | "AVF" | "avf" => Ok(Lead::AVF),
            "V1" => Ok(Lead::V1),
            "V2" => Ok(Lead::V2),
            "V3" => Ok(Lead::V3),
            "V4" => Ok(Lead::V4),
            "V5" => Ok(Lead::V5),
            "V6" => Ok(Lead::V6),
            _ => Err(()),
        }
    }
}

/// Mapping from lead name to signal for a single request
///
/// Backed by a `BTreeMap` so JSON output has a stable lead order;
/// insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadSet(BTreeMap<Lead, Signal>);

impl LeadSet {
    /// Create an empty lead set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signal for a lead, replacing any previous one
    pub fn insert(&mut self, lead: Lead, signal: Signal) {
        self.0.insert(lead, signal);
    }

    /// Get the signal for a lead, if present
    pub fn get(&self, lead: Lead) -> Option<&Signal> {
        self.0.get(&lead)
    }

    /// Check whether a lead is present
    pub fn contains(&self, lead: Lead) -> bool {
        self.0.contains_key(&lead)
    }

    /// Number of leads in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set holds no leads
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of samples per lead, if any lead is present
    ///
    /// All signals in a set are expected to share the same sample count;
    /// this reports the count of the first lead.
    pub fn sample_count(&self) -> Option<usize> {
        self.0.values().next().map(|signal| signal.len())
    }

    /// Extend this set with another, overwriting duplicate leads
    pub fn merge(&mut self, other: LeadSet) {
        self.0.extend(other.0);
    }

    /// Iterate over (lead, signal) pairs in stable lead order
    pub fn iter(&self) -> impl Iterator<Item = (Lead, &Signal)> {
        self.0.iter().map(|(lead, signal)| (*lead, signal))
    }
}

impl FromIterator<(Lead, Signal)> for LeadSet {
    fn from_iter<T: IntoIterator<Item = (Lead, Signal)>>(iter: T) -> Self {
        LeadSet(iter.into_iter().collect())
    }
}

impl IntoIterator for LeadSet {
    type Item = (Lead, Signal);
    type IntoIter = std::collections::btree_map::IntoIter<Lead, Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
