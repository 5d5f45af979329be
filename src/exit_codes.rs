//! Exit code constants for the fairgate CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable config or trace)
//! - 2: Verification failure (a trace shows a violated property)
//! - 3: Initialization failure (coordination primitives could not be built)
//! - 4: Participant failure (an actor thread panicked)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, unreadable trace.
pub const USER_ERROR: i32 = 1;

/// Verification failure: overlap across categories, malformed actor history,
/// missing completions, or a fairness scenario that did not hold.
pub const VERIFICATION_FAILURE: i32 = 2;

/// Initialization failure: the group lock could not be set up.
pub const INIT_FAILURE: i32 = 3;

/// Participant failure: an actor thread terminated abnormally.
pub const PARTICIPANT_FAILURE: i32 = 4;
