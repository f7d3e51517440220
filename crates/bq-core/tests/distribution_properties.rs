//! Property-based tests for distribution balancer invariants.

use bq_common::QuoteSnapshot;
use bq_core::distribution::{
    validate_fields, DialogEvent, DialogState, DistributionBalancer, DistributionError, Field,
    ModalOutcome, ModalRequest, Split,
};
use bq_core::notify::RecordingNotifier;
use bq_core::workflow::{handle_remote_distribution, MemoryStore};
use bq_core::StateStore;
use proptest::prelude::*;

/// A total together with a split that conserves it.
fn conserving_split() -> impl Strategy<Value = (u32, u32)> {
    (0u32..10_000).prop_flat_map(|total| (Just(total), 0..=total))
}

fn field_strategy() -> impl Strategy<Value = Field> {
    prop_oneof![Just(Field::First), Just(Field::Second)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    /// Any split that sums to the total commits exactly as entered.
    #[test]
    fn conserving_split_commits_exactly((total, first) in conserving_split()) {
        let second = total - first;
        let mut balancer = DistributionBalancer::new(total);
        balancer.open(Split::new(total, 0)).unwrap();
        balancer.edit(Field::First, first.to_string()).unwrap();
        balancer.edit(Field::Second, second.to_string()).unwrap();

        let mut committed = Vec::new();
        let split = balancer.confirm(&mut |s: Split| committed.push(s)).unwrap();

        prop_assert_eq!(split, Split::new(first, second));
        prop_assert_eq!(committed, vec![Split::new(first, second)]);
        prop_assert_eq!(balancer.state(), DialogState::Confirmed);
    }

    /// In-range edits rewrite the counterpart to `total - edited`.
    #[test]
    fn in_range_edit_syncs_counterpart(
        (total, value) in conserving_split(),
        field in field_strategy(),
    ) {
        let mut balancer = DistributionBalancer::new(total);
        balancer.open(Split::new(total, 0)).unwrap();
        balancer.edit(field, value.to_string()).unwrap();

        prop_assert_eq!(balancer.value(field), value.to_string());
        prop_assert_eq!(balancer.value(field.other()), (total - value).to_string());
        prop_assert!(balancer.validate().is_ok());
    }

    /// Edits above the total or below zero leave the counterpart unchanged.
    #[test]
    fn out_of_range_edit_does_not_propagate(
        total in 0u32..1_000,
        excess in 1i64..1_000,
        negative in any::<bool>(),
        field in field_strategy(),
    ) {
        let mut balancer = DistributionBalancer::new(total);
        balancer.open(Split::new(total, 0)).unwrap();
        let before = balancer.value(field.other()).to_string();

        let value = if negative { -excess } else { i64::from(total) + excess };
        balancer.edit(field, value.to_string()).unwrap();

        prop_assert_eq!(balancer.value(field.other()), before.as_str());
    }

    /// A split whose sum differs from the total is always rejected with a
    /// message naming both numbers, and nothing is committed.
    #[test]
    fn sum_mismatch_is_rejected(total in 0u32..10_000, first in 0u32..10_000, second in 0u32..10_000) {
        prop_assume!(u64::from(first) + u64::from(second) != u64::from(total));

        let mut balancer = DistributionBalancer::new(total);
        balancer.open(Split::new(first, second)).unwrap();
        let mut committed = Vec::new();
        let err = balancer.confirm(&mut |s: Split| committed.push(s)).unwrap_err();

        let sum = i64::from(first) + i64::from(second);
        prop_assert_eq!(
            err.clone(),
            DistributionError::SumMismatch { expected: total, actual: sum }
        );
        prop_assert_eq!(
            err.to_string(),
            format!("Total must equal {}. Current total: {}.", total, sum)
        );
        prop_assert!(committed.is_empty());
        prop_assert_eq!(balancer.state(), DialogState::Open);
    }

    /// Non-numeric text never validates.
    #[test]
    fn non_numeric_is_rejected(raw in "[a-zA-Z ]{0,8}", total in 0u32..100) {
        let err = validate_fields(&raw, "0", total).unwrap_err();
        let is_not_numeric = matches!(err, DistributionError::NotNumeric { field: Field::First, .. });
        prop_assert!(is_not_numeric);
    }
}

#[test]
fn remote_scenario_commit_then_reject() {
    let mut snapshot = QuoteSnapshot::default();
    snapshot.ui.drive_remote_count = Some(5);
    let mut store = MemoryStore::new(snapshot);
    let mut notifier = RecordingNotifier::new();
    let mut shown = Vec::new();

    // Unset prior split opens at (5, 0); setting first to 2 syncs second to 3.
    let outcome = handle_remote_distribution(
        &mut store,
        vec![
            DialogEvent::Edit(Field::First, "2".to_string()),
            DialogEvent::Confirm,
        ],
        &mut |request: &ModalRequest| shown.push(request.message.clone()),
        &mut notifier,
    )
    .unwrap();
    assert_eq!(outcome, ModalOutcome::Committed(Split::new(2, 3)));
    assert_eq!(shown, vec!["Total remotes: 5. Please distribute them."]);

    // A later dialog confirming (2, 2) against the same total is rejected.
    let mut balancer = DistributionBalancer::new(5);
    balancer.open(Split::new(2, 2)).unwrap();
    let err = balancer
        .confirm(&mut |s: Split| store.set_remote_distribution(s.first, s.second))
        .unwrap_err();
    assert_eq!(err.to_string(), "Total must equal 5. Current total: 4.");

    let distribution = store.snapshot().ui.distribution;
    assert_eq!(distribution.remote_1ch_qty, Some(2));
    assert_eq!(distribution.remote_16ch_qty, Some(3));
    assert!(notifier.notifications.is_empty());
}

#[test]
fn zero_total_accepts_only_zero_split() {
    assert_eq!(validate_fields("0", "0", 0).unwrap(), Split::new(0, 0));
    assert!(validate_fields("1", "0", 0).is_err());
}
