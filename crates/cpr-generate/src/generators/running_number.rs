use std::collections::HashMap;

use rand::{Rng, RngCore};

use cpr_core::{Gender, digit_covers_year};

use crate::errors::GenerationError;
use crate::generators::Stage;
use crate::model::Candidate;

/// Running numbers of one parity inside a block of a thousand.
const BLOCK_LEN: u32 = 500;

/// Legal running numbers for one year and gender, in random order.
///
/// The domain is the set of thousand-blocks whose leading digit is valid for
/// the year, restricted to the gender's parity. Numbers are drawn with a
/// sparse Fisher-Yates shuffle: only swapped positions are stored, so a stage
/// that is pulled a few times stays small.
#[derive(Debug, Clone)]
pub struct RunningNumbers {
    gender: Gender,
    blocks: Vec<u8>,
    remaining: u32,
    displaced: HashMap<u32, u32>,
}

/// Starts a fresh random enumeration of the running numbers legal for
/// `year` and `gender`.
pub fn running_numbers(year: u16, gender: Gender) -> Result<RunningNumbers, GenerationError> {
    RunningNumbers::new(year, gender)
}

impl RunningNumbers {
    pub fn new(year: u16, gender: Gender) -> Result<Self, GenerationError> {
        let mut blocks = Vec::new();
        for digit in 0..=9 {
            if digit_covers_year(digit, year)? {
                blocks.push(digit);
            }
        }
        let remaining = blocks.len() as u32 * BLOCK_LEN;

        Ok(Self {
            gender,
            blocks,
            remaining,
            displaced: HashMap::new(),
        })
    }

    /// Numbers not drawn yet.
    pub fn remaining(&self) -> usize {
        self.remaining as usize
    }

    fn number_at(&self, index: u32) -> u16 {
        let digit = self.blocks[(index / BLOCK_LEN) as usize];
        let offset = (index % BLOCK_LEN) * 2;
        u16::from(digit) * 1000 + offset as u16 + self.gender.parity()
    }
}

impl Stage for RunningNumbers {
    fn pull(&mut self, rng: &mut dyn RngCore) -> Result<Option<Candidate>, GenerationError> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let last = self.remaining - 1;
        let index = rng.random_range(0..self.remaining);
        let tail = self.displaced.remove(&last).unwrap_or(last);
        let drawn = if index == last {
            tail
        } else {
            self.displaced.insert(index, tail).unwrap_or(index)
        };
        self.remaining = last;

        Ok(Some(Candidate::with_running_number(self.number_at(drawn))))
    }
}
