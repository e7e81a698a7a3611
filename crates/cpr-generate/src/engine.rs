use std::iter::FusedIterator;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace, warn};

use cpr_core::Cpr;

use crate::errors::GenerationError;
use crate::generators::calendar::{YearStage, year_stage};
use crate::generators::Stage;
use crate::model::{GenerateOptions, GenerationStats};

/// Lazy stream of codes that fail the mod-11 test.
///
/// Candidates come from the year stage in random order; those whose code
/// passes the checksum are skipped. The iterator ends once every legal
/// combination has been visited, or after the first error.
pub struct CprGenerator {
    stage: YearStage,
    rng: ChaCha8Rng,
    stats: GenerationStats,
    finished: bool,
}

impl CprGenerator {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        options.validate()?;

        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let options = Arc::new(options);
        let stage = year_stage(Arc::clone(&options));

        info!(
            seed,
            years = stage.live_choices(),
            months = options.months.len(),
            genders = options.genders.len(),
            min_date = ?options.min_date,
            max_date = ?options.max_date,
            "cpr generation started"
        );

        Ok(Self {
            stage,
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: GenerationStats {
                seed,
                ..GenerationStats::default()
            },
            finished: false,
        })
    }

    /// Seed driving the random order; pass it back through
    /// [`GenerateOptions::seed`] to replay a run.
    pub fn seed(&self) -> u64 {
        self.stats.seed
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    fn next_candidate(&mut self) -> Result<Option<Cpr>, GenerationError> {
        while let Some(candidate) = self.stage.pull(&mut self.rng)? {
            let cpr = candidate.complete()?;
            if cpr.has_valid_checksum() {
                self.stats.excluded_by_checksum += 1;
                trace!(code = %cpr, "skipping code with valid checksum");
                continue;
            }
            self.stats.emitted += 1;
            return Ok(Some(cpr));
        }
        Ok(None)
    }
}

impl Iterator for CprGenerator {
    type Item = Result<Cpr, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_candidate() {
            Ok(Some(cpr)) => Some(Ok(cpr)),
            Ok(None) => {
                self.finished = true;
                info!(
                    seed = self.stats.seed,
                    emitted = self.stats.emitted,
                    excluded_by_checksum = self.stats.excluded_by_checksum,
                    "cpr generation exhausted"
                );
                None
            }
            Err(err) => {
                self.finished = true;
                warn!(seed = self.stats.seed, error = %err, "cpr generation failed");
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for CprGenerator {}
