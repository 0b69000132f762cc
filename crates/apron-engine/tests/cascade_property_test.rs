//! Property tests for the reassignment distribution rule.

use std::collections::HashSet;

use apron_core::ids::{EmployeeId, IncidentId};
use apron_engine::cascade::plan_reassignments;
use proptest::prelude::*;

const DEPARTING: EmployeeId = EmployeeId(1);
const REQUESTER: EmployeeId = EmployeeId(2);

fn incidents(n: usize) -> Vec<IncidentId> {
    (0..n as i64).map(|i| IncidentId(100 + i)).collect()
}

fn pool(n: usize) -> Vec<EmployeeId> {
    (0..n as i64).map(|i| EmployeeId(10 + i)).collect()
}

proptest! {
    #[test]
    fn one_reassignment_per_open_incident(open in 0usize..40, candidates in 0usize..40) {
        let open = incidents(open);
        let plan = plan_reassignments(DEPARTING, &open, &pool(candidates), REQUESTER, None);
        prop_assert_eq!(plan.len(), open.len());
        for (step, id) in plan.iter().zip(&open) {
            prop_assert_eq!(step.incident_id, *id);
            prop_assert_eq!(step.from, DEPARTING);
            prop_assert_ne!(step.to, DEPARTING);
        }
    }

    #[test]
    fn pool_is_drained_in_order_then_requester(open in 0usize..40, candidates in 0usize..40) {
        let pool = pool(candidates);
        let plan = plan_reassignments(DEPARTING, &incidents(open), &pool, REQUESTER, None);

        let from_pool = open.min(candidates);
        let targets: Vec<EmployeeId> = plan.iter().map(|s| s.to).collect();
        prop_assert_eq!(&targets[..from_pool], &pool[..from_pool]);
        prop_assert!(targets[from_pool..].iter().all(|t| *t == REQUESTER));

        let distinct: HashSet<_> = targets[..from_pool].iter().collect();
        prop_assert_eq!(distinct.len(), from_pool);
    }

    #[test]
    fn explicit_target_receives_all(
        open in 0usize..40,
        candidates in 0usize..40,
        target in 50i64..60,
    ) {
        let target = EmployeeId(target);
        let pool = pool(candidates);
        let plan = plan_reassignments(DEPARTING, &incidents(open), &pool, REQUESTER, Some(target));
        prop_assert!(plan.iter().all(|s| s.to == target));
    }
}
