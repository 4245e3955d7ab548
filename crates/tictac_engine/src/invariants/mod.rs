//! Structural invariants of the snapshot history.
//!
//! Invariants are logical properties that must hold after every append.
//! They are checked in debug builds and can be tested independently.

pub mod alternating_sign;
pub mod empty_origin;
pub mod single_ply;

pub use alternating_sign::AlternatingSignInvariant;
pub use empty_origin::EmptyOriginInvariant;
pub use single_ply::SinglePlyInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Every history invariant.
pub type HistoryInvariants = (
    EmptyOriginInvariant,
    SinglePlyInvariant,
    AlternatingSignInvariant,
);
