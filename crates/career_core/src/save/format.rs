use std::collections::HashSet;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::SaveError;
use super::SNAPSHOT_VERSION;
use crate::career::CareerGameState;

const CHECKSUM_LEN: usize = 32;

/// Versioned wrapper around a career state
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CareerSnapshot {
    pub version: u32,
    pub state: CareerGameState,
}

impl CareerSnapshot {
    pub fn new(state: CareerGameState) -> Self {
        Self { version: SNAPSHOT_VERSION, state }
    }

    /// Player ids (squad and academy) and fixture ids must be unique.
    pub fn validate(&self) -> Result<(), SaveError> {
        let mut player_ids = HashSet::new();
        for player in self.state.club.players.iter().chain(self.state.youth.players.iter()) {
            if !player_ids.insert(player.id) {
                return Err(SaveError::DuplicateId { kind: "player", id: player.id });
            }
        }

        let mut fixture_ids = HashSet::new();
        for fixture in &self.state.fixtures {
            if !fixture_ids.insert(fixture.id) {
                return Err(SaveError::DuplicateId { kind: "fixture", id: fixture.id });
            }
        }
        Ok(())
    }
}

/// Encode a state: MessagePack with field names, LZ4 with the size
/// prepended, then the SHA-256 of the compressed bytes appended.
pub fn encode_snapshot(state: &CareerGameState) -> Result<Vec<u8>, SaveError> {
    let snapshot = CareerSnapshot::new(state.clone());
    snapshot.validate()?;

    let msgpack = to_vec_named(&snapshot)?;
    let mut bytes = compress_prepend_size(&msgpack);

    let checksum = Sha256::digest(&bytes);
    bytes.extend_from_slice(&checksum);

    log::debug!(
        "Encoded season {} snapshot: {} -> {} bytes",
        state.current_season,
        msgpack.len(),
        bytes.len()
    );
    Ok(bytes)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<CareerGameState, SaveError> {
    // Size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let snapshot: CareerSnapshot = from_slice(&msgpack)?;

    if snapshot.version > SNAPSHOT_VERSION {
        return Err(SaveError::VersionMismatch { found: snapshot.version, expected: SNAPSHOT_VERSION });
    }
    snapshot.validate()?;
    Ok(snapshot.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Difficulty;
    use crate::career::{fixture_setup, initialize_career, play_match};
    use crate::models::club::{Club, LeagueClub};
    use crate::models::formation::{Formation, FormationCode};
    use crate::models::player::{Player, PlayerAttributes, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state() -> CareerGameState {
        let players = (0..16)
            .map(|i| {
                let pos = Position::ALL[i as usize % Position::ALL.len()];
                Player::new(i + 1, "Test", format!("Player{i}"), pos, 25, PlayerAttributes::uniform(65))
                    .with_contract_end(2027)
            })
            .collect();
        let club = Club::new(1, "Snapshot City", 20_000_000.0, players);
        let league = (2..=6).map(|id| LeagueClub::new(id, format!("Club {id}"), 68.0)).collect();
        initialize_career(club, league, 2025, Difficulty::Medium).unwrap()
    }

    #[test]
    fn test_roundtrip_after_a_match() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let start = state();
        let fixture_id = start.next_fixture().unwrap().id;
        let setup = fixture_setup(&start, fixture_id, Formation::preset(FormationCode::F4231)).unwrap();
        let (played, _) = play_match(&start, fixture_id, &setup, &mut rng).unwrap();

        let bytes = encode_snapshot(&played).unwrap();
        let decoded = decode_snapshot(&bytes).unwrap();

        let ids = |s: &CareerGameState| s.fixtures.iter().map(|f| f.id).collect::<Vec<_>>();
        assert_eq!(ids(&decoded), ids(&played));
        assert_eq!(decoded.standings, played.standings);
        assert_eq!(
            decoded.club.players.iter().map(|p| p.id).collect::<Vec<_>>(),
            played.club.players.iter().map(|p| p.id).collect::<Vec<_>>()
        );
        assert_eq!(decoded, played);
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = encode_snapshot(&state()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decode_snapshot(&bytes), Err(SaveError::ChecksumMismatch)));
        assert!(matches!(decode_snapshot(&[0u8; 8]), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_duplicate_player_ids_rejected() {
        let mut s = state();
        let dup = s.club.players[0].clone();
        s.club.players.push(dup);
        assert!(matches!(encode_snapshot(&s), Err(SaveError::DuplicateId { kind: "player", id: 1 })));
    }

    #[test]
    fn test_compression_helps() {
        let s = state();
        let raw = to_vec_named(&CareerSnapshot::new(s.clone())).unwrap();
        let encoded = encode_snapshot(&s).unwrap();
        assert!(encoded.len() < raw.len());
    }
}
