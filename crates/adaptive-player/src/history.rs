//! Per-opponent move histories
//!
//! A [`HistoryTable`] keeps its opponents in the order the caller supplied
//! them. That order is the tie-break order for every "first match" rule in
//! the decision policy, so it is part of the table's identity: two tables with
//! the same contents in a different order are different inputs.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use crate::error::InvalidInput;
use crate::moves::Move;

/// Identifier of a tournament participant other than the calling agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpponentId(pub u32);

impl fmt::Display for OpponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for OpponentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Ordered mapping from opponent to one side's moves against that opponent
///
/// Serialized as a list of `[id, [moves...]]` pairs so the ordering survives
/// JSON, whose objects are unordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(OpponentId, Vec<Move>)>", into = "Vec<(OpponentId, Vec<Move>)>")]
pub struct HistoryTable {
    entries: Vec<(OpponentId, Vec<Move>)>,
    /// Position of each opponent in `entries`
    index: HashMap<OpponentId, usize>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table keeping the iteration order of `entries`
    ///
    /// Fails on the first repeated opponent.
    pub fn from_entries<I>(entries: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = (OpponentId, Vec<Move>)>,
    {
        let mut table = Self::new();
        for (id, moves) in entries {
            table.push_entry(id, moves)?;
        }
        Ok(table)
    }

    /// Build a table ordered by ascending opponent id
    pub fn from_map(map: BTreeMap<OpponentId, Vec<Move>>) -> Self {
        let entries: Vec<_> = map.into_iter().collect();
        let index = entries.iter().enumerate().map(|(i, (id, _))| (*id, i)).collect();
        Self { entries, index }
    }

    fn push_entry(&mut self, id: OpponentId, moves: Vec<Move>) -> Result<(), InvalidInput> {
        if self.index.contains_key(&id) {
            return Err(InvalidInput::DuplicateOpponent(id));
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((id, moves));
        Ok(())
    }

    /// Register a new opponent with an empty history
    pub fn insert_opponent(&mut self, id: OpponentId) -> Result<(), InvalidInput> {
        self.push_entry(id, Vec::new())
    }

    /// Append one move to an opponent's history
    ///
    /// The decision engine never calls this; it is for the tournament side
    /// that owns the tables between rounds.
    pub fn record(&mut self, id: OpponentId, mv: Move) -> Result<(), InvalidInput> {
        let &position = self.index.get(&id).ok_or(InvalidInput::UnknownOpponent(id))?;
        self.entries[position].1.push(mv);
        Ok(())
    }

    pub fn get(&self, id: OpponentId) -> Option<&[Move]> {
        self.index
            .get(&id)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn contains(&self, id: OpponentId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of moves recorded against `id` (0 if unknown)
    pub fn rounds(&self, id: OpponentId) -> usize {
        self.get(id).map_or(0, <[Move]>::len)
    }

    /// Opponents in table order
    pub fn opponents(&self) -> impl Iterator<Item = OpponentId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpponentId, &[Move])> + '_ {
        self.entries.iter().map(|(id, moves)| (*id, moves.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no move has been recorded against any opponent
    pub fn is_fresh(&self) -> bool {
        self.entries.iter().all(|(_, moves)| moves.is_empty())
    }
}

impl TryFrom<Vec<(OpponentId, Vec<Move>)>> for HistoryTable {
    type Error = InvalidInput;

    fn try_from(entries: Vec<(OpponentId, Vec<Move>)>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<HistoryTable> for Vec<(OpponentId, Vec<Move>)> {
    fn from(table: HistoryTable) -> Self {
        table.entries
    }
}

/// Check that `own` and `theirs` describe the same opponents and rounds
///
/// Order of checks: current opponent, key sets, then per-opponent lengths
/// in `own` table order.
pub fn check_aligned(
    current: OpponentId,
    own: &HistoryTable,
    theirs: &HistoryTable,
) -> Result<(), InvalidInput> {
    if !own.contains(current) || !theirs.contains(current) {
        return Err(InvalidInput::UnknownOpponent(current));
    }

    let own_ids: HashSet<OpponentId> = own.opponents().collect();
    let their_ids: HashSet<OpponentId> = theirs.opponents().collect();
    if own_ids != their_ids {
        let missing_in_own = theirs.opponents().filter(|id| !own_ids.contains(id)).collect();
        let missing_in_theirs = own.opponents().filter(|id| !their_ids.contains(id)).collect();
        return Err(InvalidInput::KeySetMismatch { missing_in_own, missing_in_theirs });
    }

    for (opponent, moves) in own.iter() {
        let theirs_len = theirs.rounds(opponent);
        if moves.len() != theirs_len {
            return Err(InvalidInput::LengthMismatch {
                opponent,
                own: moves.len(),
                theirs: theirs_len,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::{Cooperate as C, Defect as D};

    fn id(n: u32) -> OpponentId {
        OpponentId(n)
    }

    #[test]
    fn test_from_entries_keeps_order() {
        let table = HistoryTable::from_entries(vec![
            (id(9), vec![C]),
            (id(2), vec![]),
            (id(5), vec![D, D]),
        ])
        .unwrap();

        let order: Vec<_> = table.opponents().collect();
        assert_eq!(order, vec![id(9), id(2), id(5)]);
        assert_eq!(table.rounds(id(5)), 2);
        assert_eq!(table.rounds(id(42)), 0);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = HistoryTable::from_entries(vec![(id(1), vec![]), (id(1), vec![C])]);
        assert_eq!(result, Err(InvalidInput::DuplicateOpponent(id(1))));
    }

    #[test]
    fn test_from_map_is_ascending() {
        let mut map = BTreeMap::new();
        map.insert(id(30), vec![]);
        map.insert(id(4), vec![C]);
        map.insert(id(11), vec![]);

        let order: Vec<_> = HistoryTable::from_map(map).opponents().collect();
        assert_eq!(order, vec![id(4), id(11), id(30)]);
    }

    #[test]
    fn test_record_and_insert() {
        let mut table = HistoryTable::new();
        table.insert_opponent(id(1)).unwrap();
        assert!(table.is_fresh());

        table.record(id(1), D).unwrap();
        table.record(id(1), C).unwrap();
        assert_eq!(table.get(id(1)), Some(&[D, C][..]));
        assert!(!table.is_fresh());

        assert_eq!(table.record(id(2), C), Err(InvalidInput::UnknownOpponent(id(2))));
        assert_eq!(table.insert_opponent(id(1)), Err(InvalidInput::DuplicateOpponent(id(1))));
    }

    #[test]
    fn test_json_preserves_order() {
        let table = HistoryTable::from_entries(vec![(id(7), vec![C, D]), (id(3), vec![])]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, "[[7,[1,0]],[3,[]]]");

        let back: HistoryTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        assert!(serde_json::from_str::<HistoryTable>("[[1,[]],[1,[0]]]").is_err());
    }

    #[test]
    fn test_check_aligned_ok() {
        let own = HistoryTable::from_entries(vec![(id(1), vec![C]), (id(2), vec![])]).unwrap();
        // Same key set in a different order is still aligned.
        let theirs = HistoryTable::from_entries(vec![(id(2), vec![]), (id(1), vec![D])]).unwrap();
        assert_eq!(check_aligned(id(1), &own, &theirs), Ok(()));
    }

    #[test]
    fn test_check_aligned_unknown_current() {
        let own = HistoryTable::from_entries(vec![(id(1), vec![])]).unwrap();
        let theirs = own.clone();
        assert_eq!(check_aligned(id(5), &own, &theirs), Err(InvalidInput::UnknownOpponent(id(5))));

        let partial = HistoryTable::from_entries(vec![(id(1), vec![]), (id(5), vec![])]).unwrap();
        assert_eq!(check_aligned(id(5), &partial, &theirs), Err(InvalidInput::UnknownOpponent(id(5))));
    }

    #[test]
    fn test_check_aligned_key_mismatch() {
        let own = HistoryTable::from_entries(vec![(id(1), vec![]), (id(2), vec![])]).unwrap();
        let theirs = HistoryTable::from_entries(vec![(id(1), vec![]), (id(3), vec![])]).unwrap();
        assert_eq!(
            check_aligned(id(1), &own, &theirs),
            Err(InvalidInput::KeySetMismatch {
                missing_in_own: vec![id(3)],
                missing_in_theirs: vec![id(2)],
            })
        );
    }

    #[test]
    fn test_lookups_follow_reordered_tables() {
        let n = 500u32;
        let entry = |i: u32, mv: Move| (id(i), vec![mv; (i % 4) as usize]);
        let own = HistoryTable::from_entries((0..n).map(|i| entry(i, C))).unwrap();
        let theirs = HistoryTable::from_entries((0..n).rev().map(|i| entry(i, D))).unwrap();
        assert_eq!(check_aligned(id(0), &own, &theirs), Ok(()));

        for i in 0..n {
            assert_eq!(theirs.rounds(id(i)), (i % 4) as usize, "opponent {}", i);
            assert!(theirs.get(id(i)).unwrap().iter().all(|&m| m == D), "opponent {}", i);
        }

        // A single short history deep inside the reversed table is still found.
        let mut reversed: Vec<_> = (0..n).rev().map(|i| entry(i, D)).collect();
        reversed[n as usize - 8].1.push(D);
        let theirs = HistoryTable::from_entries(reversed).unwrap();
        assert_eq!(
            check_aligned(id(0), &own, &theirs),
            Err(InvalidInput::LengthMismatch { opponent: id(7), own: 3, theirs: 4 })
        );
    }

    #[test]
    fn test_index_survives_every_constructor() {
        let mut map = BTreeMap::new();
        map.insert(id(8), vec![C]);
        map.insert(id(3), vec![]);
        let mut table = HistoryTable::from_map(map);

        table.insert_opponent(id(5)).unwrap();
        table.record(id(3), D).unwrap();
        table.record(id(5), C).unwrap();

        assert_eq!(table.get(id(3)), Some(&[D][..]));
        assert_eq!(table.get(id(5)), Some(&[C][..]));
        assert_eq!(table.get(id(8)), Some(&[C][..]));
        assert_eq!(table.insert_opponent(id(8)), Err(InvalidInput::DuplicateOpponent(id(8))));

        let order: Vec<_> = table.opponents().collect();
        assert_eq!(order, vec![id(3), id(8), id(5)]);

        let json = serde_json::to_string(&table).unwrap();
        let back: HistoryTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.rounds(id(5)), 1);
    }

    #[test]
    fn test_check_aligned_length_mismatch() {
        let own = HistoryTable::from_entries(vec![(id(1), vec![C]), (id(2), vec![C, C])]).unwrap();
        let theirs = HistoryTable::from_entries(vec![(id(1), vec![C]), (id(2), vec![D])]).unwrap();
        assert_eq!(
            check_aligned(id(1), &own, &theirs),
            Err(InvalidInput::LengthMismatch { opponent: id(2), own: 2, theirs: 1 })
        );
    }
}
