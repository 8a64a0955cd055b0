//! Weighted-random slot allocation.
//!
//! Slots are split once into three owned pools (disabled, elderly, regular).
//! Residents are served in their given order; each unit a resident is
//! entitled to is drawn uniformly at random from one pool and removed from
//! it, so no slot is handed out twice. A disabled resident takes its first
//! unit from the disabled pool, an elderly non-defaulting resident its first
//! unit from the elderly pool; every other unit comes from the regular pool.

use crate::domain::model::{Allocation, Assignment, Category, Resident, Slot};
use crate::utils::error::{RaffleError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of the randomness used for resident ordering and slot draws.
pub trait RandomSource {
    /// Uniform index in `0..upper`. Callers never pass `upper == 0`.
    fn index_below(&mut self, upper: usize) -> usize;

    /// Fisher-Yates over [`RandomSource::index_below`].
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_below(i + 1);
            items.swap(i, j);
        }
    }
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index_below(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Slot ids split by category. Each pool only shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPools {
    pub disabled: Vec<String>,
    pub elderly: Vec<String>,
    pub regular: Vec<String>,
}

impl SlotPools {
    /// A slot flagged both disabled and elderly only joins the disabled pool.
    pub fn partition(slots: &[Slot]) -> Self {
        let mut pools = Self::default();
        for slot in slots {
            if slot.disabled {
                if slot.elderly {
                    tracing::warn!(
                        "Slot {} is flagged disabled and elderly, using it as disabled",
                        slot.id
                    );
                }
                pools.disabled.push(slot.id.clone());
            } else if slot.elderly {
                pools.elderly.push(slot.id.clone());
            } else {
                pools.regular.push(slot.id.clone());
            }
        }
        pools
    }

    pub fn pool_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Disabled => &mut self.disabled,
            Category::Elderly => &mut self.elderly,
            Category::Regular => &mut self.regular,
        }
    }

    pub fn remaining(&self) -> usize {
        self.disabled.len() + self.elderly.len() + self.regular.len()
    }
}

/// Removes and returns a uniformly chosen id from `pool`.
pub fn select_random_slot<S: RandomSource>(
    pool: &mut Vec<String>,
    category: Category,
    rng: &mut S,
) -> Result<String> {
    if pool.is_empty() {
        return Err(RaffleError::PoolExhausted {
            category: category.to_string(),
        });
    }
    let index = rng.index_below(pool.len());
    Ok(pool.swap_remove(index))
}

/// Category of the next draw for `resident`, given how many slots it already holds.
pub fn category_for(resident: &Resident, already_assigned: usize) -> Category {
    if resident.disabled && already_assigned == 0 {
        Category::Disabled
    } else if resident.elderly && !resident.defaulting && already_assigned == 0 {
        Category::Elderly
    } else {
        Category::Regular
    }
}

pub fn shuffle_residents<S: RandomSource>(residents: &mut [Resident], rng: &mut S) {
    rng.shuffle(residents);
}

pub fn do_raffle<S: RandomSource>(
    residents: &[Resident],
    slots: &[Slot],
    rng: &mut S,
) -> Result<Assignment> {
    let mut pools = SlotPools::partition(slots);
    tracing::debug!(
        "Pools: {} disabled, {} elderly, {} regular",
        pools.disabled.len(),
        pools.elderly.len(),
        pools.regular.len()
    );

    let mut allocations = Vec::with_capacity(residents.len());
    for resident in residents {
        let mut slot_ids = Vec::new();
        for _ in 0..resident.slots {
            let category = category_for(resident, slot_ids.len());
            let slot_id = select_random_slot(pools.pool_mut(category), category, rng)?;
            tracing::trace!("{} <- {} ({})", resident.id, slot_id, category);
            slot_ids.push(slot_id);
        }
        allocations.push(Allocation {
            resident_id: resident.id.clone(),
            slot_ids,
        });
    }

    tracing::debug!("{} slots left unassigned", pools.remaining());
    Ok(Assignment::from_allocations(allocations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// Replays fixed indices, wrapping each into range.
    struct FixedSequence {
        indices: Vec<usize>,
        position: usize,
    }

    impl FixedSequence {
        fn new(indices: Vec<usize>) -> Self {
            Self {
                indices,
                position: 0,
            }
        }

        fn zeros() -> Self {
            Self::new(vec![0])
        }
    }

    impl RandomSource for FixedSequence {
        fn index_below(&mut self, upper: usize) -> usize {
            let value = self.indices[self.position % self.indices.len()];
            self.position += 1;
            value % upper
        }
    }

    fn resident(
        id: &str,
        slots: usize,
        disabled: bool,
        elderly: bool,
        defaulting: bool,
    ) -> Resident {
        Resident {
            id: id.to_string(),
            slots,
            disabled,
            elderly,
            defaulting,
        }
    }

    fn slot(id: &str, disabled: bool, elderly: bool) -> Slot {
        Slot {
            id: id.to_string(),
            disabled,
            elderly,
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_partition_splits_by_category() {
        let pools = SlotPools::partition(&[
            slot("D1", true, false),
            slot("E1", false, true),
            slot("R1", false, false),
            slot("B1", true, true),
        ]);

        assert_eq!(pools.disabled, ids(&["D1", "B1"]));
        assert_eq!(pools.elderly, ids(&["E1"]));
        assert_eq!(pools.regular, ids(&["R1"]));
        assert_eq!(pools.remaining(), 4);
    }

    #[test]
    fn test_select_random_slot_removes_drawn_slot() {
        let mut pool = ids(&["A", "B", "C"]);
        let mut rng = FixedSequence::new(vec![0]);

        let drawn = select_random_slot(&mut pool, Category::Regular, &mut rng).unwrap();
        assert_eq!(drawn, "A");
        assert_eq!(pool.len(), 2);
        assert!(!pool.contains(&"A".to_string()));
    }

    #[test]
    fn test_select_random_slot_empty_pool_names_category() {
        let mut pool = Vec::new();
        let mut rng = FixedSequence::zeros();

        let err = select_random_slot(&mut pool, Category::Elderly, &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No more elderly slots available");
    }

    #[test]
    fn test_category_for_priority_only_on_first_unit() {
        let disabled = resident("A", 3, true, true, false);
        assert_eq!(category_for(&disabled, 0), Category::Disabled);
        assert_eq!(category_for(&disabled, 1), Category::Regular);

        let elderly = resident("B", 2, false, true, false);
        assert_eq!(category_for(&elderly, 0), Category::Elderly);
        assert_eq!(category_for(&elderly, 1), Category::Regular);

        let defaulting = resident("C", 1, false, true, true);
        assert_eq!(category_for(&defaulting, 0), Category::Regular);

        let disabled_defaulting = resident("D", 1, true, true, true);
        assert_eq!(category_for(&disabled_defaulting, 0), Category::Disabled);
    }

    #[test]
    fn test_disabled_resident_gets_one_priority_slot_then_regular() {
        let residents = vec![resident("A", 2, true, false, false)];
        let slots = vec![slot("S1", true, false), slot("S2", false, false)];
        let mut rng = FixedSequence::zeros();

        let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
        assert_eq!(assignment.get("A").unwrap(), ids(&["S1", "S2"]).as_slice());
    }

    #[test]
    fn test_disabled_resident_never_takes_second_disabled_slot() {
        let residents = vec![resident("A", 2, true, false, false)];
        let slots = vec![slot("D1", true, false), slot("D2", true, false)];
        let mut rng = FixedSequence::zeros();

        let err = do_raffle(&residents, &slots, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            RaffleError::PoolExhausted { ref category } if category == "regular"
        ));
    }

    #[test]
    fn test_missing_disabled_slot_aborts() {
        let residents = vec![resident("A", 1, true, false, false)];
        let slots = vec![slot("S1", false, false), slot("S2", false, true)];
        let mut rng = FixedSequence::zeros();

        let err = do_raffle(&residents, &slots, &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No more disabled slots available");
    }

    #[test]
    fn test_exact_draws_follow_random_source() {
        let residents = vec![
            resident("A", 1, false, false, false),
            resident("B", 2, false, true, false),
        ];
        let slots = vec![
            slot("R1", false, false),
            slot("R2", false, false),
            slot("R3", false, false),
            slot("E1", false, true),
        ];
        // A: regular[2] = R3 -> [R1, R2]
        // B: elderly[0] = E1, then regular[1] = R2
        let mut rng = FixedSequence::new(vec![2, 0, 1]);

        let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
        assert_eq!(assignment.get("A").unwrap(), ids(&["R3"]).as_slice());
        assert_eq!(assignment.get("B").unwrap(), ids(&["E1", "R2"]).as_slice());
    }

    #[test]
    fn test_huge_request_exhausts_regular_pool() {
        let residents = vec![resident("A", usize::MAX, false, false, false)];
        let slots = vec![slot("S1", false, false)];
        let mut rng = FixedSequence::zeros();

        let err = do_raffle(&residents, &slots, &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "No more regular slots available");
    }

    #[test]
    fn test_defaulting_elderly_draws_from_regular() {
        let residents = vec![resident("A", 1, false, true, true)];
        let slots = vec![slot("E1", false, true), slot("R1", false, false)];
        let mut rng = FixedSequence::zeros();

        let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
        assert_eq!(assignment.get("A").unwrap(), ids(&["R1"]).as_slice());
    }

    #[test]
    fn test_assignment_keeps_resident_order() {
        let residents = vec![
            resident("C", 1, false, false, false),
            resident("A", 1, false, false, false),
            resident("B", 1, false, false, false),
        ];
        let slots: Vec<Slot> = (1..=3).map(|i| slot(&format!("S{i}"), false, false)).collect();
        let mut rng = RngSource::seeded(7);

        let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
        let order: Vec<&str> = assignment.iter().map(|a| a.resident_id.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_random_runs_respect_invariants() {
        let mut residents = Vec::new();
        for i in 0..30 {
            residents.push(resident(
                &format!("R{i}"),
                1 + i % 3,
                i % 7 == 0,
                i % 4 == 0,
                i % 8 == 0,
            ));
        }
        let mut slots = Vec::new();
        for i in 0..10 {
            slots.push(slot(&format!("D{i}"), true, false));
        }
        for i in 0..10 {
            slots.push(slot(&format!("E{i}"), false, true));
        }
        for i in 0..60 {
            slots.push(slot(&format!("S{i}"), false, false));
        }
        let by_id: HashMap<&str, &Slot> = slots.iter().map(|s| (s.id.as_str(), s)).collect();

        for seed in 0..50 {
            let mut rng = RngSource::seeded(seed);
            let mut order = residents.clone();
            shuffle_residents(&mut order, &mut rng);

            let assignment = do_raffle(&order, &slots, &mut rng).unwrap();
            assert_eq!(assignment.len(), residents.len());

            let mut seen = HashSet::new();
            for r in &residents {
                let assigned = assignment.get(&r.id).unwrap();
                assert_eq!(assigned.len(), r.slots);

                let disabled_count = assigned
                    .iter()
                    .filter(|id| by_id[id.as_str()].disabled)
                    .count();
                let elderly_count = assigned
                    .iter()
                    .filter(|id| by_id[id.as_str()].elderly)
                    .count();
                assert!(disabled_count <= 1);
                assert!(elderly_count <= 1);

                if r.disabled {
                    assert!(by_id[assigned[0].as_str()].disabled);
                } else if r.elderly && !r.defaulting {
                    assert!(by_id[assigned[0].as_str()].elderly);
                } else {
                    assert_eq!(disabled_count + elderly_count, 0);
                }

                for id in assigned {
                    assert!(seen.insert(id.clone()), "slot {id} assigned twice");
                }
            }
        }
    }

    #[test]
    fn test_equal_counts_use_every_slot() {
        let residents: Vec<Resident> = (0..5)
            .map(|i| resident(&format!("R{i}"), 1, false, false, false))
            .collect();
        let slots: Vec<Slot> = (0..5).map(|i| slot(&format!("S{i}"), false, false)).collect();
        let mut rng = RngSource::seeded(42);

        let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
        let assigned: HashSet<String> = assignment
            .iter()
            .flat_map(|a| a.slot_ids.iter().cloned())
            .collect();
        let all: HashSet<String> = slots.iter().map(|s| s.id.clone()).collect();
        assert_eq!(assigned, all);
    }

    #[test]
    fn test_draws_are_roughly_uniform() {
        let slots: Vec<Slot> = (0..4).map(|i| slot(&format!("S{i}"), false, false)).collect();
        let residents = vec![resident("A", 1, false, false, false)];
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut rng = RngSource::seeded(2024);

        for _ in 0..4000 {
            let assignment = do_raffle(&residents, &slots, &mut rng).unwrap();
            *counts.entry(assignment.get("A").unwrap()[0].clone()).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!((800..=1200).contains(count), "skewed draw count {count}");
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let residents: Vec<Resident> = (0..6)
            .map(|i| resident(&format!("R{i}"), 2, i == 0, i == 1, false))
            .collect();
        let mut slots = vec![slot("D0", true, false), slot("E0", false, true)];
        slots.extend((0..12).map(|i| slot(&format!("S{i}"), false, false)));

        let run = |seed| {
            let mut rng = RngSource::seeded(seed);
            let mut order = residents.clone();
            shuffle_residents(&mut order, &mut rng);
            do_raffle(&order, &slots, &mut rng).unwrap()
        };

        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_default_shuffle_is_permutation() {
        let mut items = vec![1, 2, 3, 4, 5];
        let mut rng = FixedSequence::new(vec![3, 1, 0, 2]);
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }
}
