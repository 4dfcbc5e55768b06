use kifu_core::{Coord, EvaluationRecord};

/// Situational signals for one classification that do not live on the record.
///
/// Immutable once built; construct it fresh per move or share one read-only
/// across a batch. Every signal is optional and rules that need a missing
/// signal simply do not fire.
///
/// # Example
///
/// ```
/// use kifu_core::{EvaluationRecord, Player};
/// use kifu_meaning::context::ClassificationContext;
///
/// let record = EvaluationRecord::new(30, Player::Black, "D4").with_best_move("Q16");
/// let context = ClassificationContext::for_record(&record)
///     .with_total_moves(240)
///     .with_actual_move_policy(0.002);
///
/// assert_eq!(context.distance_from_best(), Some(12.0));
/// assert_eq!(context.total_moves(), Some(240));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationContext {
    total_moves: Option<u32>,
    distance_from_best: Option<f64>,
    actual_move_policy: Option<f64>,
    best_move_policy: Option<f64>,
    ownership_flux: Option<f64>,
    score_stdev: Option<f64>,
}

impl ClassificationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with the move distance derived from the record's played and best moves.
    #[must_use]
    pub fn for_record(record: &EvaluationRecord) -> Self {
        let distance = record
            .best_move
            .as_deref()
            .and_then(Coord::from_gtp)
            .zip(Coord::from_gtp(&record.gtp))
            .map(|(best, played)| f64::from(best.distance(played)));
        Self {
            distance_from_best: distance,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_total_moves(mut self, total_moves: u32) -> Self {
        self.total_moves = Some(total_moves);
        self
    }

    #[must_use]
    pub fn with_distance_from_best(mut self, distance: f64) -> Self {
        self.distance_from_best = Some(distance);
        self
    }

    #[must_use]
    pub fn with_actual_move_policy(mut self, policy: f64) -> Self {
        self.actual_move_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_best_move_policy(mut self, policy: f64) -> Self {
        self.best_move_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_ownership_flux(mut self, flux: f64) -> Self {
        self.ownership_flux = Some(flux);
        self
    }

    #[must_use]
    pub fn with_score_stdev(mut self, stdev: f64) -> Self {
        self.score_stdev = Some(stdev);
        self
    }

    #[must_use]
    pub fn total_moves(&self) -> Option<u32> {
        self.total_moves
    }

    #[must_use]
    pub fn distance_from_best(&self) -> Option<f64> {
        self.distance_from_best
    }

    #[must_use]
    pub fn actual_move_policy(&self) -> Option<f64> {
        self.actual_move_policy
    }

    #[must_use]
    pub fn best_move_policy(&self) -> Option<f64> {
        self.best_move_policy
    }

    #[must_use]
    pub fn ownership_flux(&self) -> Option<f64> {
        self.ownership_flux
    }

    #[must_use]
    pub fn score_stdev(&self) -> Option<f64> {
        self.score_stdev
    }
}
