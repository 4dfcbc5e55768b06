//! Numeric cutoffs used by the classifier.
//!
//! Golden outputs depend on these exact values; changing one changes which
//! rule fires for real games.

// loss bands, in points
pub const LOSS_THRESHOLD_SMALL: f64 = 1.0;
pub const LOSS_THRESHOLD_MEDIUM: f64 = 2.0;
pub const LOSS_THRESHOLD_SIGNIFICANT: f64 = 3.0;
pub const LOSS_THRESHOLD_LARGE: f64 = 5.0;
pub const LOSS_THRESHOLD_HUGE: f64 = 10.0;
pub const LOSS_THRESHOLD_CATASTROPHIC: f64 = 20.0;
/// Loss at which an explicit cut-risk signal counts as a connection miss.
pub const LOSS_THRESHOLD_CUT_RISK: f64 = 4.0;

// policy bands, as prior probabilities
pub const POLICY_VERY_LOW: f64 = 0.01;
pub const POLICY_LOW: f64 = 0.05;
/// Prior of the engine's best move at or above which it was an obvious response.
pub const TRAP_BEST_POLICY_MIN: f64 = 0.5;
/// Prior of the played move at or below which the obvious response was ignored.
pub const TRAP_ACTUAL_POLICY_MAX: f64 = 0.02;
/// Prior below which the played move is one the network would never consider.
pub const ACTUAL_MOVE_POLICY_LOW: f64 = 0.005;

/// Summed ownership swing (in intersections) that marks a group living or dying.
pub const OWNERSHIP_FLUX_LIFE_DEATH: f64 = 10.0;

// Chebyshev distance between played and best move
pub const DISTANCE_CLOSE: f64 = 2.0;
pub const DISTANCE_FAR: f64 = 5.0;

/// Moves numbered below this are early game.
pub const EARLY_GAME_MOVE_LIMIT: u32 = 50;
/// Moves numbered at or above this are endgame regardless of game length.
pub const ENDGAME_ABSOLUTE_MOVE: u32 = 200;
/// Fraction of the game after which moves are endgame.
pub const ENDGAME_RATIO: f64 = 0.75;

/// Score standard deviation above which the position is a tactical mess.
pub const SCORE_STDEV_HIGH: f64 = 8.0;
