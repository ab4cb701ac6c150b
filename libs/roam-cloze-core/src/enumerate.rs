//! Cloze number assignment.
//!
//! Clozes written with an explicit positive number keep it. Every other cloze
//! gets the smallest number not yet used, scanning forward only, in the order
//! the clozes appear in the block.

use std::collections::BTreeSet;

use crate::types::RoamPart;

/// Numbering state for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClozeNumbering {
    used: BTreeSet<u32>,
    next_candidate: u32,
}

impl Default for ClozeNumbering {
    fn default() -> Self {
        Self {
            used: BTreeSet::new(),
            next_candidate: 1,
        }
    }
}

impl ClozeNumbering {
    /// Start numbering for a block, reserving every valid explicit number.
    pub fn for_parts(parts: &[RoamPart]) -> Self {
        let used = parts
            .iter()
            .filter_map(RoamPart::as_cloze)
            .filter_map(|cloze| cloze.valid_number())
            .collect();

        Self {
            used,
            ..Self::default()
        }
    }

    /// Claim the next free number. The cursor never moves backwards.
    pub fn next_number(&mut self) -> u32 {
        while self.used.contains(&self.next_candidate) {
            self.next_candidate += 1;
        }
        let number = self.next_candidate;
        self.used.insert(number);
        number
    }
}

/// Copy of `parts` in which every cloze has a valid number.
pub fn enumerate_clozes(parts: &[RoamPart]) -> Vec<RoamPart> {
    let mut numbering = ClozeNumbering::for_parts(parts);

    parts
        .iter()
        .map(|part| match part {
            RoamPart::Cloze(cloze) if cloze.valid_number().is_none() => {
                RoamPart::Cloze(cloze.clone().with_number(numbering.next_number()))
            }
            other => other.clone(),
        })
        .collect()
}
