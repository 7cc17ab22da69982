use crate::algorithm::coverage::StrandCoverage;
use crate::spatial::Peg;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Unordered pair of peg indices identifying a strand
///
/// Both orientations of a strand cover the same pixels, so `(a, b)` and `(b, a)`
/// map to the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandKey {
    low: usize,
    high: usize,
}

impl StrandKey {
    /// Normalize a pair of peg indices
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Peg indices in ascending order
    pub const fn pegs(&self) -> (usize, usize) {
        (self.low, self.high)
    }
}

/// Memoized strand rasterizations for one peg layout and stroke width
///
/// Coverage depends only on the two pegs, the scoring stroke width and the image
/// size, all fixed for a run. Entries are shared behind `Arc` so scoring threads
/// can hold them while the cache grows between iterations.
#[derive(Debug)]
pub struct CoverageCache {
    pegs: Vec<Peg>,
    stroke_width: f64,
    field_width: u32,
    field_height: u32,
    entries: HashMap<StrandKey, Arc<StrandCoverage>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl CoverageCache {
    /// Create an empty cache over a fixed peg layout
    pub fn new(pegs: Vec<Peg>, stroke_width: f64, field_width: u32, field_height: u32) -> Self {
        Self {
            pegs,
            stroke_width,
            field_width,
            field_height,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Pegs the cache rasterizes between
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// Number of cached strands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached coverage of a strand, if already rasterized
    pub fn get(&self, a: usize, b: usize) -> Option<&Arc<StrandCoverage>> {
        self.entries.get(&StrandKey::new(a, b))
    }

    /// Make sure every listed strand is cached
    ///
    /// Missing strands are rasterized in parallel and inserted afterwards, so the
    /// map is only ever written from the calling thread. Returns the number of
    /// strands added.
    pub fn prefetch<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut missing = Vec::new();
        for (a, b) in pairs {
            let key = StrandKey::new(a, b);
            if self.entries.contains_key(&key) {
                self.stats.hits += 1;
            } else {
                missing.push(key);
            }
        }
        missing.sort_unstable();
        missing.dedup();

        let computed: Vec<(StrandKey, StrandCoverage)> = missing
            .par_iter()
            .filter_map(|&key| {
                rasterize_pair(
                    &self.pegs,
                    key,
                    self.stroke_width,
                    self.field_width,
                    self.field_height,
                )
                .map(|coverage| (key, coverage))
            })
            .collect();

        let added = computed.len();
        self.stats.misses += added;
        self.entries.extend(
            computed
                .into_iter()
                .map(|(key, coverage)| (key, Arc::new(coverage))),
        );
        added
    }
}

/// Rasterize the strand between the pegs of `key`, low index first
fn rasterize_pair(
    pegs: &[Peg],
    key: StrandKey,
    stroke_width: f64,
    field_width: u32,
    field_height: u32,
) -> Option<StrandCoverage> {
    let (low, high) = key.pegs();
    let start = pegs.get(low)?;
    let end = pegs.get(high)?;
    Some(StrandCoverage::rasterize(
        start.point(),
        end.point(),
        stroke_width,
        field_width,
        field_height,
    ))
}
