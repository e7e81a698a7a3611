use std::fmt;

use rand::{Rng, RngCore};
use tracing::trace;

use crate::errors::GenerationError;
use crate::generators::Stage;
use crate::model::Candidate;

/// One level of the generation tree: a finite set of choices, a child stage
/// per choice and the field each choice writes onto a candidate.
pub trait Dimension {
    type Choice: Copy + fmt::Debug;
    type Child: Stage;

    fn id(&self) -> &'static str;

    fn choices(&self) -> Vec<Self::Choice>;

    fn child(&self, choice: Self::Choice) -> Result<Self::Child, GenerationError>;

    fn stamp(&self, candidate: &mut Candidate, choice: Self::Choice);
}

struct Slot<C, S> {
    choice: C,
    stage: Option<S>,
}

/// Fair interleave over the children of a [`Dimension`].
///
/// Each pull picks a live choice uniformly at random and forwards the pull to
/// its child, creating the child on first use. A choice whose child is
/// exhausted is dropped for good, so the sequence ends once every child has
/// ended.
pub struct Interleave<D: Dimension> {
    dimension: D,
    live: Vec<Slot<D::Choice, D::Child>>,
}

impl<D: Dimension> Interleave<D> {
    pub fn new(dimension: D) -> Self {
        let live = dimension
            .choices()
            .into_iter()
            .map(|choice| Slot {
                choice,
                stage: None,
            })
            .collect();
        Self { dimension, live }
    }

    /// Number of choices that have not been exhausted yet.
    pub fn live_choices(&self) -> usize {
        self.live.len()
    }
}

impl<D: Dimension> Stage for Interleave<D> {
    fn pull(&mut self, rng: &mut dyn RngCore) -> Result<Option<Candidate>, GenerationError> {
        while !self.live.is_empty() {
            let index = rng.random_range(0..self.live.len());
            let slot = &mut self.live[index];
            if slot.stage.is_none() {
                slot.stage = Some(self.dimension.child(slot.choice)?);
            }

            let pulled = match slot.stage.as_mut() {
                Some(stage) => stage.pull(rng)?,
                None => None,
            };

            match pulled {
                Some(mut candidate) => {
                    self.dimension.stamp(&mut candidate, slot.choice);
                    return Ok(Some(candidate));
                }
                None => {
                    let exhausted = self.live.swap_remove(index);
                    trace!(
                        dimension = self.dimension.id(),
                        choice = ?exhausted.choice,
                        remaining = self.live.len(),
                        "choice exhausted"
                    );
                }
            }
        }

        Ok(None)
    }
}
