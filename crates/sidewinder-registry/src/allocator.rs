//! Random room id allocation.

use rand::Rng;
use sidewinder_protocol::RoomId;

use crate::RegistryError;

/// Random draws before the allocator gives up.
const MAX_ATTEMPTS: usize = 100;

/// Draws random ids until one passes the occupancy predicate.
///
/// Each attempt takes the low 32 bits of a random `u64` and formats them as
/// a left-padded lowercase hex id. Fails with
/// [`RegistryError::IdGenerationFailed`] only if all 100 draws hit occupied
/// ids, which at sane room counts means the RNG is broken rather than the
/// id space crowded.
pub fn allocate_room_id<F>(mut is_taken: F) -> Result<RoomId, RegistryError>
where
    F: FnMut(&RoomId) -> bool,
{
    let mut rng = rand::rng();
    for _ in 0..MAX_ATTEMPTS {
        let draw: u64 = rng.random();
        let candidate = RoomId::from_u32(draw as u32);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    tracing::error!(attempts = MAX_ATTEMPTS, "room id allocation exhausted");
    Err(RegistryError::IdGenerationFailed)
}
