use crate::error::GameError;

/// Inclusive range of digit values a slot may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DigitRange {
    pub min: u8,
    pub max: u8,
}

impl DigitRange {
    pub fn contains(&self, value: i32) -> bool {
        value >= i32::from(self.min) && value <= i32::from(self.max)
    }
}

impl Default for DigitRange {
    fn default() -> Self {
        DigitRange { min: 0, max: 9 }
    }
}

/// A fixed-capacity ordered sequence of digit slots.
///
/// The sequence always holds exactly `capacity` slots; editing never grows or
/// shrinks it. Slots may be empty, and empty slots can sit between filled ones.
/// All mutations are all-or-nothing: a rejected edit leaves every slot as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSequence {
    slots: Vec<Option<u8>>,
    range: DigitRange,
}

impl SlotSequence {
    /// Create an all-empty sequence with `capacity` slots.
    pub fn new(capacity: usize, range: DigitRange) -> Self {
        SlotSequence {
            slots: vec![None; capacity],
            range,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn range(&self) -> DigitRange {
        self.range
    }

    /// All slots in order, empty ones included.
    pub fn slots(&self) -> &[Option<u8>] {
        &self.slots
    }

    /// Insert `value` at `index`, shifting the suffix one slot to the right.
    ///
    /// Every slot at positions `>= index` moves one position toward the end;
    /// a digit shifted past the last slot is discarded. Empty slots between
    /// digits shift along with them, so gaps are preserved.
    pub fn insert(&mut self, index: i32, value: i32) -> Result<(), GameError> {
        let idx = self.check_index(index)?;
        let digit = self.check_value(value)?;
        self.slots.pop();
        self.slots.insert(idx, Some(digit));
        Ok(())
    }

    /// Remove the digit at `index`, shifting the suffix one slot to the left.
    ///
    /// The whole suffix moves, so a gap to the right of `index` closes up by
    /// one just like a digit would. The slot freed at the end becomes empty.
    pub fn delete(&mut self, index: i32) -> Result<(), GameError> {
        let idx = self.check_index(index)?;
        if self.slots[idx].is_none() {
            return Err(GameError::EmptySlot { index });
        }
        self.slots.remove(idx);
        self.slots.push(None);
        Ok(())
    }

    /// The digits in slot order with empty slots skipped.
    pub fn compact(&self) -> Vec<u8> {
        self.slots.iter().filter_map(|slot| *slot).collect()
    }

    /// Absolute indices of the non-empty slots, in slot order.
    ///
    /// Position `i` of this list holds the slot index of digit `i` in
    /// [`compact`](Self::compact), which is how compacted match offsets map
    /// back to on-screen slots.
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index)
            .collect()
    }

    /// Empty every slot.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    fn check_index(&self, index: i32) -> Result<usize, GameError> {
        if index < 0 || index as usize >= self.slots.len() {
            return Err(GameError::OutOfBounds {
                index,
                max_index: self.slots.len() - 1,
            });
        }
        Ok(index as usize)
    }

    fn check_value(&self, value: i32) -> Result<u8, GameError> {
        if !self.range.contains(value) {
            return Err(GameError::InvalidValue {
                value,
                min: self.range.min,
                max: self.range.max,
            });
        }
        Ok(value as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq() -> SlotSequence {
        SlotSequence::new(8, DigitRange::default())
    }

    #[test]
    fn test_new_sequence_is_empty() {
        let s = seq();
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.slots(), &[None; 8]);
        assert!(s.compact().is_empty());
        assert!(s.occupied_indices().is_empty());
    }

    #[test]
    fn test_insert_places_digits() {
        let mut s = seq();
        s.insert(0, 2).unwrap();
        s.insert(1, 5).unwrap();
        assert_eq!(s.compact(), vec![2, 5]);
        assert_eq!(s.slots()[0], Some(2));
        assert_eq!(s.slots()[1], Some(5));
    }

    #[test]
    fn test_insert_shifts_suffix_right() {
        let mut s = seq();
        s.insert(0, 3).unwrap();
        s.insert(1, 7).unwrap();
        s.insert(0, 5).unwrap();
        assert_eq!(s.compact(), vec![5, 3, 7]);
        assert_eq!(&s.slots()[..3], &[Some(5), Some(3), Some(7)]);
    }

    #[test]
    fn test_insert_beyond_occupied_leaves_gap() {
        let mut s = seq();
        s.insert(0, 1).unwrap();
        s.insert(2, 2).unwrap();
        assert_eq!(&s.slots()[..3], &[Some(1), None, Some(2)]);
        assert_eq!(s.compact(), vec![1, 2]);
        assert_eq!(s.occupied_indices(), vec![0, 2]);
    }

    #[test]
    fn test_insert_shifts_gaps_along_with_digits() {
        let mut s = seq();
        s.insert(0, 1).unwrap();
        s.insert(2, 2).unwrap();
        s.insert(0, 5).unwrap();
        assert_eq!(&s.slots()[..4], &[Some(5), Some(1), None, Some(2)]);
    }

    #[test]
    fn test_insert_into_full_sequence_discards_last_digit() {
        let mut s = seq();
        for i in 0..8 {
            s.insert(i, i as i32 + 1).unwrap();
        }
        s.insert(0, 9).unwrap();
        assert_eq!(s.compact(), vec![9, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_insert_discards_last_slot_digit_even_across_a_gap() {
        let mut s = seq();
        s.insert(0, 1).unwrap();
        s.insert(7, 9).unwrap();
        s.insert(0, 5).unwrap();
        assert_eq!(s.compact(), vec![5, 1]);
        assert_eq!(s.slots()[7], None);
    }

    #[test]
    fn test_insert_at_last_index_replaces_resident_digit() {
        let mut s = seq();
        s.insert(7, 4).unwrap();
        s.insert(7, 6).unwrap();
        assert_eq!(s.slots()[7], Some(6));
        assert_eq!(s.compact(), vec![6]);
    }

    #[test]
    fn test_insert_rejects_out_of_bounds_index() {
        let mut s = seq();
        assert_eq!(
            s.insert(-1, 5),
            Err(GameError::OutOfBounds {
                index: -1,
                max_index: 7
            })
        );
        assert_eq!(
            s.insert(8, 5),
            Err(GameError::OutOfBounds {
                index: 8,
                max_index: 7
            })
        );
        assert_eq!(s.slots(), &[None; 8]);
    }

    #[test]
    fn test_insert_rejects_out_of_range_value() {
        let mut s = seq();
        assert_eq!(
            s.insert(0, 10),
            Err(GameError::InvalidValue {
                value: 10,
                min: 0,
                max: 9
            })
        );
        assert_eq!(
            s.insert(0, -3),
            Err(GameError::InvalidValue {
                value: -3,
                min: 0,
                max: 9
            })
        );
        assert_eq!(s.slots(), &[None; 8]);
    }

    #[test]
    fn test_delete_shifts_suffix_left() {
        let mut s = seq();
        s.insert(0, 3).unwrap();
        s.insert(1, 7).unwrap();
        s.delete(0).unwrap();
        assert_eq!(s.slots()[0], Some(7));
        assert_eq!(s.compact(), vec![7]);
    }

    #[test]
    fn test_delete_moves_gaps_with_the_suffix() {
        let mut s = seq();
        s.insert(0, 1).unwrap();
        s.insert(2, 2).unwrap();
        s.delete(0).unwrap();
        assert_eq!(&s.slots()[..3], &[None, Some(2), None]);
        assert_eq!(s.occupied_indices(), vec![1]);
    }

    #[test]
    fn test_delete_rejects_empty_slot() {
        let mut s = seq();
        s.insert(0, 4).unwrap();
        assert_eq!(s.delete(3), Err(GameError::EmptySlot { index: 3 }));
        assert_eq!(s.compact(), vec![4]);
    }

    #[test]
    fn test_delete_rejects_out_of_bounds_index() {
        let mut s = seq();
        assert_eq!(
            s.delete(8),
            Err(GameError::OutOfBounds {
                index: 8,
                max_index: 7
            })
        );
    }

    #[test]
    fn test_insert_then_delete_at_same_index_restores_sequence() {
        let mut s = seq();
        s.insert(0, 3).unwrap();
        s.insert(2, 7).unwrap();
        let before = s.clone();
        s.insert(1, 5).unwrap();
        s.delete(1).unwrap();
        assert_eq!(s, before);
    }

    #[test]
    fn test_reset_empties_every_slot() {
        let mut s = seq();
        s.insert(0, 1).unwrap();
        s.insert(5, 2).unwrap();
        s.reset();
        assert_eq!(s.slots(), &[None; 8]);
    }

    #[test]
    fn test_custom_range_bounds_are_inclusive() {
        let mut s = SlotSequence::new(4, DigitRange { min: 1, max: 6 });
        s.insert(0, 1).unwrap();
        s.insert(1, 6).unwrap();
        assert_eq!(
            s.insert(2, 0),
            Err(GameError::InvalidValue {
                value: 0,
                min: 1,
                max: 6
            })
        );
        assert_eq!(
            s.insert(2, 7),
            Err(GameError::InvalidValue {
                value: 7,
                min: 1,
                max: 6
            })
        );
    }
}
