use rand::rngs::StdRng;
use rand::Rng;

use super::sequence::{DigitRange, SlotSequence};

/// Longest target pattern any level can produce.
pub const MAX_TARGET_LEN: usize = 4;

/// Target pattern length for `level`: two digits plus one per level, capped.
pub fn target_len(level: u32) -> usize {
    (2 + level as usize).min(MAX_TARGET_LEN)
}

/// Generate a fresh target pattern for `level`, each digit drawn uniformly
/// from `range`.
pub fn generate_target(rng: &mut StdRng, level: u32, range: DigitRange) -> Vec<u8> {
    (0..target_len(level))
        .map(|_| rng.random_range(range.min..=range.max))
        .collect()
}

/// Offset of the first contiguous occurrence of `needle` in `haystack`.
///
/// `None` when the needle is empty or longer than the haystack. Matching is
/// exact and contiguous; of several occurrences the leftmost wins.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// One attempted offset of a staged search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    /// Offset into the compacted view where the needle was laid.
    pub offset: usize,
    /// Absolute slot indices the needle covers at this offset.
    pub slot_indices: Vec<usize>,
    /// Whether the needle matched here.
    pub matched: bool,
}

/// Scan the compacted view of `sequence` for `needle`, recording every
/// attempted offset up to and including the first match.
///
/// The final outcome always agrees with [`find`] on the compacted view; the
/// steps exist so a presentation layer can replay the scan at its own pace,
/// highlighting the absolute slots each attempt covered.
pub fn scan(sequence: &SlotSequence, needle: &[u8]) -> (Vec<ScanStep>, Option<usize>) {
    let compact = sequence.compact();
    let occupied = sequence.occupied_indices();
    let mut steps = Vec::new();
    if needle.is_empty() || needle.len() > compact.len() {
        return (steps, None);
    }
    for offset in 0..=compact.len() - needle.len() {
        let matched = compact[offset..offset + needle.len()] == *needle;
        steps.push(ScanStep {
            offset,
            slot_indices: occupied[offset..offset + needle.len()].to_vec(),
            matched,
        });
        if matched {
            return (steps, Some(offset));
        }
    }
    (steps, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_target_len_grows_with_level_and_caps_at_four() {
        assert_eq!(target_len(1), 3);
        assert_eq!(target_len(2), 4);
        assert_eq!(target_len(3), 4);
        assert_eq!(target_len(10), 4);
    }

    #[test]
    fn test_generate_target_respects_length_and_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = DigitRange { min: 2, max: 5 };
        for level in 1..=3 {
            for _ in 0..20 {
                let target = generate_target(&mut rng, level, range);
                assert_eq!(target.len(), target_len(level));
                assert!(target.iter().all(|&d| d >= 2 && d <= 5));
            }
        }
    }

    #[test]
    fn test_generate_target_is_deterministic_per_seed() {
        let range = DigitRange::default();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(
            generate_target(&mut a, 2, range),
            generate_target(&mut b, 2, range)
        );
    }

    #[test]
    fn test_find_locates_needle_anywhere() {
        assert_eq!(find(&[2, 1, 4, 7], &[2, 1]), Some(0));
        assert_eq!(find(&[1, 2, 3, 4], &[2, 3]), Some(1));
        assert_eq!(find(&[5, 8, 3, 9], &[3, 9]), Some(2));
    }

    #[test]
    fn test_find_reports_absence() {
        assert_eq!(find(&[1, 2, 3], &[9, 9]), None);
        assert_eq!(find(&[1, 2, 3], &[3, 2]), None);
    }

    #[test]
    fn test_find_requires_contiguity() {
        // 1 and 3 both present but never adjacent
        assert_eq!(find(&[1, 2, 3], &[1, 3]), None);
    }

    #[test]
    fn test_find_whole_haystack_match() {
        assert_eq!(find(&[4, 2], &[4, 2]), Some(0));
    }

    #[test]
    fn test_find_prefers_leftmost_occurrence() {
        assert_eq!(find(&[2, 3, 2, 3], &[2, 3]), Some(0));
    }

    #[test]
    fn test_find_with_repeated_digits() {
        assert_eq!(find(&[1, 1, 1, 2], &[1, 1, 2]), Some(1));
    }

    #[test]
    fn test_find_rejects_degenerate_needles() {
        assert_eq!(find(&[1, 2, 3], &[]), None);
        assert_eq!(find(&[1, 2], &[1, 2, 3]), None);
        assert_eq!(find(&[], &[1]), None);
    }

    #[test]
    fn test_scan_records_every_miss_when_absent() {
        let mut s = SlotSequence::new(8, DigitRange::default());
        s.insert(0, 1).unwrap();
        s.insert(1, 2).unwrap();
        s.insert(2, 3).unwrap();
        let (steps, at) = scan(&s, &[9, 9]);
        assert_eq!(at, None);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|step| !step.matched));
        assert_eq!(steps[0].offset, 0);
        assert_eq!(steps[1].offset, 1);
    }

    #[test]
    fn test_scan_stops_at_first_match() {
        let mut s = SlotSequence::new(8, DigitRange::default());
        s.insert(0, 1).unwrap();
        s.insert(1, 2).unwrap();
        s.insert(2, 3).unwrap();
        s.insert(3, 4).unwrap();
        let (steps, at) = scan(&s, &[2, 3]);
        assert_eq!(at, Some(1));
        assert_eq!(steps.len(), 2);
        assert!(!steps[0].matched);
        assert!(steps[1].matched);
    }

    #[test]
    fn test_scan_maps_offsets_to_absolute_slots_across_gaps() {
        let mut s = SlotSequence::new(8, DigitRange::default());
        s.insert(0, 1).unwrap();
        s.insert(2, 2).unwrap();
        s.insert(4, 3).unwrap();
        let (steps, at) = scan(&s, &[2, 3]);
        assert_eq!(at, Some(1));
        assert_eq!(steps[0].slot_indices, vec![0, 2]);
        assert_eq!(steps[1].slot_indices, vec![2, 4]);
        assert!(steps[1].matched);
    }

    #[test]
    fn test_scan_needle_longer_than_compact_yields_no_steps() {
        let mut s = SlotSequence::new(8, DigitRange::default());
        s.insert(0, 5).unwrap();
        let (steps, at) = scan(&s, &[5, 5]);
        assert!(steps.is_empty());
        assert_eq!(at, None);
    }

    #[test]
    fn test_scan_agrees_with_find() {
        let mut s = SlotSequence::new(8, DigitRange::default());
        for (i, d) in [4, 1, 4, 1, 5].iter().enumerate() {
            s.insert(i as i32, *d).unwrap();
        }
        for needle in [vec![4, 1, 5], vec![1, 4], vec![5, 4], vec![4, 1, 4, 1, 5]] {
            let (_, at) = scan(&s, &needle);
            assert_eq!(at, find(&s.compact(), &needle));
        }
    }
}
