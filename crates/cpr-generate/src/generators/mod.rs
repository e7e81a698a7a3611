//! Pull-based stages of the generation tree.
//!
//! Every stage owns its cursor state and is advanced by the caller lending it
//! the run's random source, so no stage ever holds an RNG of its own.

pub mod calendar;
pub mod interleave;
pub mod running_number;

use rand::RngCore;

use crate::errors::GenerationError;
use crate::model::Candidate;

pub use calendar::{
    DayDimension, GenderDimension, MonthDimension, YearDimension, day_stage, gender_stage,
    legal_days, legal_months, legal_years, month_stage, year_stage,
};
pub use interleave::{Dimension, Interleave};
pub use running_number::{RunningNumbers, running_numbers};

/// A finite, lazily evaluated sequence of candidates.
pub trait Stage {
    /// Returns the next candidate, or `None` once the stage is exhausted.
    fn pull(&mut self, rng: &mut dyn RngCore) -> Result<Option<Candidate>, GenerationError>;

    /// Adapts the stage into an iterator driven by `rng`.
    fn iter_with<'r>(self, rng: &'r mut dyn RngCore) -> StageIter<'r, Self>
    where
        Self: Sized,
    {
        StageIter {
            stage: self,
            rng,
            done: false,
        }
    }
}

/// Iterator over a stage, see [`Stage::iter_with`].
pub struct StageIter<'r, S> {
    stage: S,
    rng: &'r mut dyn RngCore,
    done: bool,
}

impl<S: Stage> Iterator for StageIter<'_, S> {
    type Item = Result<Candidate, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stage.pull(&mut *self.rng) {
            Ok(Some(candidate)) => Some(Ok(candidate)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
