//! Stack bonus under hidden
//!
//! Overlapping objects are hard to tell apart once they fade, so tight
//! stacks are rewarded where a new stack begins.

use super::object::{DifficultyObject, Lookback};
use crate::consts::{NORMALIZED_RADIUS, STACK_DISTANCE};

pub struct StackEvaluator;

impl StackEvaluator {
    pub fn evaluate_diff_of<L: Lookback + ?Sized>(curr: &DifficultyObject, objects: &L) -> f64 {
        let Some(last_last) = curr.previous(1, objects) else {
            return 0.0;
        };
        let Some(last) = curr.previous(0, objects) else {
            return 0.0;
        };

        // The stack only starts after an object that was not stacked itself
        if last_last.lazy_jump_distance <= STACK_DISTANCE {
            return 0.0;
        }

        let scale = NORMALIZED_RADIUS / curr.base.radius;

        [curr, last]
            .into_iter()
            .filter(|obj| obj.minimum_jump_distance < STACK_DISTANCE)
            .map(|obj| obj.minimum_jump_distance * scale / 2.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::object::DifficultyObjects;
    use crate::difficulty::object::test_util::spaced_points;

    /// Five points where the last two sit 5 px from their predecessors
    fn stacked_tail() -> Vec<DifficultyObject> {
        let mut objs = spaced_points(5, 500.0, 40.0);
        objs[3].minimum_jump_distance = 5.0;
        objs[3].lazy_jump_distance = 5.0;
        objs[4].minimum_jump_distance = 5.0;
        objs[4].lazy_jump_distance = 5.0;
        objs
    }

    #[test]
    fn test_needs_two_predecessors() {
        let objects = DifficultyObjects::new(stacked_tail()).unwrap();
        assert_eq!(StackEvaluator::evaluate_diff_of(objects.get(0).unwrap(), &objects), 0.0);
        assert_eq!(StackEvaluator::evaluate_diff_of(objects.get(1).unwrap(), &objects), 0.0);
    }

    #[test]
    fn test_stack_start_bonus() {
        let objects = DifficultyObjects::new(stacked_tail()).unwrap();

        // idx 3: only itself is stacked, 5 * (52 / 26) / 2
        assert_eq!(StackEvaluator::evaluate_diff_of(objects.get(3).unwrap(), &objects), 5.0);
        // idx 4: it and its predecessor are stacked, and idx 2 jumped 40 > 15
        assert_eq!(StackEvaluator::evaluate_diff_of(objects.get(4).unwrap(), &objects), 10.0);
    }

    #[test]
    fn test_no_bonus_inside_running_stack() {
        let mut objs = stacked_tail();
        objs[2].lazy_jump_distance = 5.0;
        let objects = DifficultyObjects::new(objs).unwrap();
        assert_eq!(StackEvaluator::evaluate_diff_of(objects.get(4).unwrap(), &objects), 0.0);
    }

    #[test]
    fn test_spread_objects_give_nothing() {
        let objects = DifficultyObjects::new(spaced_points(6, 300.0, 80.0)).unwrap();
        for obj in &objects {
            assert_eq!(StackEvaluator::evaluate_diff_of(obj, &objects), 0.0);
        }
    }
}
