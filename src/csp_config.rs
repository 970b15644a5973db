/*!
Contains configuration information for the closest string solvers.
Typical usage is to the use the builder to construct the config, e.g.
```
use closest_con::csp_config::{CspConfig, CspConfigBuilder, DistanceTracking, TieBreak};
let config: CspConfig = CspConfigBuilder::default()
    .distance_tracking(DistanceTracking::Recompute)
    .tie_break(TieBreak::DistanceWeighted)
    .build()
    .unwrap();
```
*/

use std::time::Duration;

/// Enumeration of the ways the greedy solver keeps its distance list up to date.
/// Both produce the same answer for the same random source, they only differ in cost.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DistanceTracking {
    /// Recomputes every input distance against the partial answer each iteration, O(k*L) per iteration
    Recompute,
    /// Decrements only the inputs that carry the newly assigned symbol, O(k) per iteration
    #[default]
    Incremental
}

/// Enumeration of how the greedy solver breaks ties between equally frequent candidate symbols.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TieBreak {
    /// Picks uniformly at random from the tied candidates
    #[default]
    Uniform,
    /// Picks the candidate whose carrying inputs have the largest summed current distance
    DistanceWeighted
}

/**
Contains configuration information for the closest string solvers.
Typical usage is to the use the builder to construct the config, e.g.
```
use closest_con::csp_config::{CspConfig, CspConfigBuilder};
let config: CspConfig = CspConfigBuilder::default()
    .prune(false)
    .max_attempts(25)
    .build()
    .unwrap();
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct CspConfig {
    /// The distance bookkeeping strategy for the greedy solver
    pub distance_tracking: DistanceTracking,
    /// If true, the greedy solver aborts as soon as the worst input can no longer reach the bound
    pub prune: bool,
    /// Tie-breaking between candidate symbols with equal counts
    pub tie_break: TieBreak,
    /// Maximum number of greedy attempts (including the first) made by the retry harness
    pub max_attempts: usize,
    /// Optional wall-clock budget for the retry harness; checked between attempts
    pub time_budget: Option<Duration>
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            // cheaper and equivalent
            distance_tracking: DistanceTracking::Incremental,
            // pruning never turns a passing run into a failing one
            prune: true,
            tie_break: TieBreak::Uniform,
            // the first attempt plus 10 reshuffles
            max_attempts: 11,
            time_budget: None
        }
    }
}
