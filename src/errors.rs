use thiserror::Error;

/// Failure taxonomy for trajectory acquisition and orbit refinement.
///
/// None of these escape the fetch or refinement surfaces: the fetch layer
/// degrades every failure to an all-absent trajectory and the refinement
/// engine falls back through its quality tiers. The variants exist so that
/// each recovery can log a distinct signature.
#[derive(Error, Debug)]
pub enum HeliopathError {
    #[error("ephemeris request failed: {0}")]
    RequestFailed(#[from] ureq::Error),

    #[error("ephemeris request timed out after {0:?}")]
    RequestTimedOut(std::time::Duration),

    #[error("no ephemeris available for object {object}")]
    NoEphemeris { object: String },

    #[error("malformed ephemeris response: {reason}")]
    MalformedResponse { reason: String },

    #[error("CSV decoding error in ephemeris response: {0}")]
    CsvDecode(#[from] csv::Error),

    #[error("invalid calendar date: {input}")]
    InvalidDate { input: String },

    #[error("orbit samples are collinear, plane normal is undefined")]
    DegenerateOrbitGeometry,

    #[error("plane estimation needs at least {needed} orbit samples, got {got}")]
    NotEnoughOrbitSamples { needed: usize, got: usize },
}

impl HeliopathError {
    /// True for the transport-level failures recovered by all-absent substitution.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(
            self,
            HeliopathError::RequestFailed(_) | HeliopathError::RequestTimedOut(_)
        )
    }
}
