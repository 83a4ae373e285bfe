use crate::wheel::ring::EntryId;
use std::collections::HashMap;

const SIGNATURE_MULTIPLIER: i64 = 31;
const SIGNATURE_OFFSET: i64 = 7;
const SIGNATURE_MODULUS: i64 = 97;

/// Deterministic signature of a value, always in `1..=97`.
pub fn signature_of(value: i32) -> u32 {
    let mixed = i64::from(value) * SIGNATURE_MULTIPLIER + SIGNATURE_OFFSET;
    (mixed.rem_euclid(SIGNATURE_MODULUS) + 1) as u32
}

/// Signatures of the live ring entries, keyed by entry handle so that
/// duplicate values never share a row.
#[derive(Default)]
pub struct FateTable {
    signatures: HashMap<EntryId, u32>,
}

impl FateTable {
    pub fn new() -> FateTable {
        FateTable {
            signatures: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: EntryId, value: i32) -> u32 {
        let signature = signature_of(value);
        self.signatures.insert(id, signature);
        signature
    }

    pub fn get(&self, id: EntryId) -> Option<u32> {
        self.signatures.get(&id).copied()
    }

    pub fn remove(&mut self, id: EntryId) -> Option<u32> {
        self.signatures.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::ring::Ring;

    #[test]
    fn known_signatures() {
        assert_eq!(signature_of(10), 27);
        assert_eq!(signature_of(25), 7);
        assert_eq!(signature_of(7), 31);
        assert_eq!(signature_of(42), 49);
        assert_eq!(signature_of(18), 81);
    }

    #[test]
    fn signature_stays_in_range() {
        for value in [-1_000_000, -97, -1, 0, 1, 96, 97, 1_000_000, i32::MIN, i32::MAX] {
            let sig = signature_of(value);
            assert!((1..=97).contains(&sig), "signature({}) = {}", value, sig);
            assert_eq!(sig, signature_of(value)); // no drift
        }
    }

    #[test]
    fn duplicate_values_get_separate_rows() {
        let mut ring = Ring::new();
        let a = ring.push_back(3);
        let b = ring.push_back(3);

        let mut table = FateTable::new();
        table.insert(a, 3);
        table.insert(b, 3);
        assert_eq!(table.len(), 2);

        assert_eq!(table.remove(a), Some(signature_of(3)));
        assert_eq!(table.get(b), Some(signature_of(3)));
        assert_eq!(table.get(a), None);
    }
}
