use crate::algorithm::beam::{Continuation, PathHypothesis, select_top};
use crate::algorithm::cache::{CacheStats, CoverageCache};
use crate::algorithm::config::{PathConfig, YarnStyle};
use crate::algorithm::early_stop::{EarlyStopper, StopDecision};
use crate::algorithm::eligibility::{candidate_mask, is_allowed};
use crate::algorithm::scoring::score_strand;
use crate::analysis::darkness::DarknessField;
use crate::io::blueprint::Blueprint;
use crate::io::error::{Result, StrandError};
use crate::io::progress::iteration_bar;
use crate::io::svg::RenderOptions;
use crate::spatial::Peg;
use log::{debug, info};
use rayon::prelude::*;

/// Why the search stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every strand of the iteration budget was drawn
    BudgetExhausted,
    /// Improvement fell below the loss threshold or stayed negligible for
    /// `patience` consecutive iterations
    EarlyStop,
    /// No live hypothesis had an eligible continuation
    NoCandidates,
}

/// Outcome of a finished search
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Peg indices of the winning path, empty when no strand was drawn
    pub path: Vec<usize>,
    /// Residual removed by the winning path
    pub score: f64,
    /// Iterations that committed strands
    pub iterations: usize,
    /// Why the search ended, `None` if it was read before stopping
    pub stop_reason: Option<StopReason>,
}

/// Scoring job for one strand of one hypothesis
#[derive(Clone, Copy)]
struct Expansion {
    parent: usize,
    from: usize,
    to: usize,
}

/// Beam search over peg sequences, one strand per iteration
///
/// Every iteration scores all eligible continuations of every live hypothesis,
/// keeps the best `beam_width` of them and branches each into a new hypothesis.
/// With a beam width of 1 this is the plain greedy strand picker.
pub struct BeamSearch {
    config: PathConfig,
    cache: CoverageCache,
    beam: Vec<PathHypothesis>,
    stopper: EarlyStopper,
    width: u32,
    height: u32,
    iteration: usize,
    stop_reason: Option<StopReason>,
}

impl BeamSearch {
    /// Validate inputs and seed the initial beam
    ///
    /// Pegs are clamped to the image bounds. Each peg is identified by its
    /// position in `pegs`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - A peg has a non-finite coordinate
    pub fn new(field: &DarknessField, pegs: &[Peg], config: PathConfig) -> Result<Self> {
        config.validate()?;

        let (width, height) = (field.width(), field.height());
        let pegs = pegs
            .iter()
            .enumerate()
            .map(|(index, peg)| {
                if peg.is_finite() {
                    Ok(Peg::new(index, peg.x, peg.y).clamped(width, height))
                } else {
                    Err(StrandError::InvalidPeg {
                        index,
                        reason: format!("non-finite coordinates ({}, {})", peg.x, peg.y),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let residual = field.residual();
        let beam = if pegs.is_empty() {
            Vec::new()
        } else if config.start_peg_radius > 0 {
            darkest_pegs(field, &pegs, config.start_peg_radius, config.beam_width)
                .into_iter()
                .map(|peg| PathHypothesis::seeded(peg, residual.clone()))
                .collect()
        } else {
            vec![PathHypothesis::empty(residual)]
        };

        debug!(
            "Beam search over {} pegs on {width}x{height}, {} seed hypotheses",
            pegs.len(),
            beam.len()
        );

        Ok(Self {
            cache: CoverageCache::new(pegs, config.yarn.width, width, height),
            stopper: EarlyStopper::new(config.early_stop),
            config,
            beam,
            width,
            height,
            iteration: 0,
            stop_reason: None,
        })
    }

    /// Run one iteration
    ///
    /// Returns `true` when the iteration committed strands, including a final
    /// iteration after which the search stops, and `false` once nothing more
    /// can be drawn.
    pub fn step(&mut self) -> bool {
        if self.stop_reason.is_some() {
            return false;
        }
        if self.iteration >= self.config.iterations {
            return self.stop(StopReason::BudgetExhausted);
        }

        let expansions = self.expansions();
        self.cache
            .prefetch(expansions.iter().map(|expansion| (expansion.from, expansion.to)));

        let candidates = self.score_expansions(&expansions);
        let selected = select_top(candidates, self.config.beam_width);
        let Some(best) = selected.first() else {
            return self.stop(StopReason::NoCandidates);
        };

        let decision = self.stopper.observe(best.rank);
        if decision == StopDecision::Now {
            return self.stop(StopReason::EarlyStop);
        }

        let opacity = self.config.yarn.opacity;
        let next: Vec<PathHypothesis> = selected
            .par_iter()
            .filter_map(|continuation| {
                let parent = self.beam.get(continuation.parent)?;
                let coverage = self.cache.get(continuation.from, continuation.to)?;
                Some(parent.branch(continuation, coverage, opacity))
            })
            .collect();
        self.beam = next;
        self.iteration += 1;
        if decision == StopDecision::AfterCommit {
            self.stop(StopReason::EarlyStop);
        }
        true
    }

    /// Drive the search to completion
    pub fn run(&mut self) {
        let bar = iteration_bar(self.config.iterations as u64, !self.config.progress_bar);
        while self.step() {
            bar.set_position(self.iteration as u64);
        }
        bar.finish_and_clear();
    }

    /// Iterations that committed strands so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Why the search stopped, `None` while it can still advance
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Live hypotheses in beam slot order
    pub fn beam(&self) -> &[PathHypothesis] {
        &self.beam
    }

    /// Pegs after clamping, indexed like the input layout
    pub fn pegs(&self) -> &[Peg] {
        self.cache.pegs()
    }

    /// Image size the search runs on
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Coverage cache hit and miss counts
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// Live hypothesis with the highest cumulative score, lowest slot on ties
    pub fn best(&self) -> Option<&PathHypothesis> {
        self.beam.iter().fold(None, |best, hypothesis| match best {
            Some(current) if current.score >= hypothesis.score => Some(current),
            _ => Some(hypothesis),
        })
    }

    /// Winning path and search statistics
    pub fn result(&self) -> SearchResult {
        let (path, score) = self
            .best()
            .filter(|hypothesis| hypothesis.path.len() >= 2)
            .map_or_else(
                || (Vec::new(), 0.0),
                |hypothesis| (hypothesis.path.clone(), hypothesis.score),
            );

        SearchResult {
            path,
            score,
            iterations: self.iteration,
            stop_reason: self.stop_reason,
        }
    }

    fn stop(&mut self, reason: StopReason) -> bool {
        info!(
            "Search stopped after {} strands: {reason:?} (cache {} hits, {} misses)",
            self.iteration, self.cache.stats.hits, self.cache.stats.misses
        );
        self.stop_reason = Some(reason);
        false
    }

    /// Every eligible strand of every live hypothesis
    fn expansions(&self) -> Vec<Expansion> {
        let pegs = self.cache.pegs();
        let skip_within = self.config.skip_peg_within;
        let mut expansions = Vec::new();

        for (parent, hypothesis) in self.beam.iter().enumerate() {
            match hypothesis.last_peg() {
                Some(from) => {
                    let mask = candidate_mask(pegs, &hypothesis.path, skip_within);
                    expansions.extend(mask.iter().map(|to| Expansion { parent, from, to }));
                }
                None => {
                    // One direction per peg pair, ending at the lower peg
                    for to in 0..pegs.len() {
                        for from in (to + 1)..pegs.len() {
                            if is_allowed(pegs, from, to, None, skip_within) {
                                expansions.push(Expansion { parent, from, to });
                            }
                        }
                    }
                }
            }
        }
        expansions
    }

    /// Score expansions against their parents' residuals in parallel
    fn score_expansions(&self, expansions: &[Expansion]) -> Vec<Continuation> {
        let opacity = self.config.yarn.opacity;
        let mode = self.config.score_mode;

        expansions
            .par_iter()
            .filter_map(|expansion| {
                let parent = self.beam.get(expansion.parent)?;
                let coverage = self.cache.get(expansion.from, expansion.to)?;
                let score = score_strand(coverage, &parent.residual, opacity);
                Some(Continuation {
                    parent: expansion.parent,
                    from: expansion.from,
                    to: expansion.to,
                    score,
                    rank: score.ranking(mode),
                })
            })
            .collect()
    }
}

/// The `count` pegs with the darkest surroundings, darkest first, lowest index on ties
fn darkest_pegs(field: &DarknessField, pegs: &[Peg], radius: u32, count: usize) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = pegs
        .par_iter()
        .enumerate()
        .map(|(index, peg)| (index, field.mean_around(peg.x, peg.y, radius)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(index, _)| index).collect()
}

/// Compute the strand path for an encoded image
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The image cannot be decoded or has no pixels
/// - A peg has a non-finite coordinate
pub fn compute_blueprint(image: &[u8], pegs: &[Peg], config: &PathConfig) -> Result<Blueprint> {
    config.validate()?;
    let field = DarknessField::from_encoded(image)?;

    let mut search = BeamSearch::new(&field, pegs, *config)?;
    search.run();
    let result = search.result();
    info!(
        "Path of {} strands, residual removed {:.2} of {:.2}",
        result.path.len().saturating_sub(1),
        result.score,
        field.total()
    );

    Ok(Blueprint::from_path(
        &result.path,
        search.pegs(),
        field.width(),
        field.height(),
        result.score,
    ))
}

/// Compute the strand path for an encoded image and render it as SVG
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or display yarn is invalid
/// - The image cannot be decoded or has no pixels
/// - A peg has a non-finite coordinate
pub fn compute_svg(
    image: &[u8],
    pegs: &[Peg],
    config: &PathConfig,
    display: &YarnStyle,
) -> Result<String> {
    display.validate("display_yarn")?;
    let blueprint = compute_blueprint(image, pegs, config)?;
    blueprint.render_svg(display, &RenderOptions::default())
}
