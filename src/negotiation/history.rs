//! Append-only negotiation log

use crate::error::Result;
use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Serialize};

use super::types::NegotiationRound;

/// Chronological log of rounds for one run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NegotiationHistory {
    rounds: Vec<NegotiationRound>,
}

impl NegotiationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, round: NegotiationRound) {
        debug_assert!(
            self.rounds
                .last()
                .is_none_or(|last| last.round_number < round.round_number),
            "rounds must be recorded in order"
        );
        self.rounds.push(round);
    }

    /// Get all rounds
    pub fn rounds(&self) -> &[NegotiationRound] {
        &self.rounds
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NegotiationRound> {
        self.rounds.iter()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn last(&self) -> Option<&NegotiationRound> {
        self.rounds.last()
    }

    /// Round in which an offer was accepted, if any
    pub fn accepted_round(&self) -> Option<u32> {
        self.rounds
            .iter()
            .find(|r| r.accepted)
            .map(|r| r.round_number)
    }

    /// Blake2b fingerprint of the serialized rounds, hex encoded
    pub fn digest(&self) -> Result<String> {
        let serialized = serde_json::to_vec(&self.rounds)?;

        let mut hasher = Blake2b512::new();
        hasher.update(&serialized);
        let result = hasher.finalize();

        Ok(hex::encode(&result[..32]))
    }
}

impl<'a> IntoIterator for &'a NegotiationHistory {
    type Item = &'a NegotiationRound;
    type IntoIter = std::slice::Iter<'a, NegotiationRound>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}
