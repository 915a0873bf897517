//! Identifier aliases shared across the engine and its collaborators.

use uuid::Uuid;

/// Applicant (user) identifier.
pub type ApplicantId = Uuid;
/// Team identifier. Absent on a candidate means the candidate applied solo.
pub type TeamId = Uuid;
/// Event (hackathon) identifier.
pub type EventId = Uuid;
/// Admission run identifier.
pub type RunId = Uuid;

/// Fold a UUID into 64 bits. Used to derive a per-event seed from a base seed.
pub fn fold_u64(id: &Uuid) -> u64 {
    let (hi, lo) = id.as_u64_pair();
    hi ^ lo
}
