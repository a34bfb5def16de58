//! Integration tests for the view state controller: filter → group → sort → format.

mod common;

use common::{abc_dataset, day, designations, NeoFixture};
use neo_grid::{
    DateFilter, FlagFilter, NumberFilter, RawValue, Record, Dataset, SortDirection, TextFilter,
    TextOp, ViewError, ViewState,
};

// ============================================================================
// WALKTHROUGH
// ============================================================================

#[test]
fn test_sort_filter_reset_walkthrough() {
    let ds = abc_dataset();
    let mut state = ViewState::neo();

    state.set_sort("discovery_date", SortDirection::Ascending).unwrap();
    let view = state.compute_view(&ds);
    assert_eq!(designations(&view), vec!["B", "C", "A"]);

    state.set_filter("pha", FlagFilter::new("Y")).unwrap();
    let view = state.compute_view(&ds);
    assert_eq!(designations(&view), vec!["C", "A"]);
    assert!(view.rows().all(|r| r.formatted("pha") == Some("Yes")));

    state.reset_all();
    let view = state.compute_view(&ds);
    assert_eq!(designations(&view), vec!["A", "B", "C"]);
    let pha: Vec<&str> = view.rows().map(|r| r.formatted("pha").unwrap()).collect();
    assert_eq!(pha, vec!["Yes", "No", "Yes"]);
}

#[test]
fn test_formatted_dates_in_view() {
    let ds = abc_dataset();
    let view = ViewState::neo().compute_view(&ds);
    let dates: Vec<&str> = view
        .rows()
        .map(|r| r.formatted("discovery_date").unwrap())
        .collect();
    assert_eq!(dates, vec!["Jan 15, 2020", "", "Jun 1, 2019"]);
}

// ============================================================================
// FILTER TESTS
// ============================================================================

#[test]
fn test_no_filter_passes_everything() {
    let ds = NeoFixture::dataset();
    let view = ViewState::neo().compute_view(&ds);
    assert_eq!(view.len(), ds.len());
    assert_eq!(view.indices(), (0..ds.len()).collect::<Vec<_>>());
}

#[test]
fn test_number_filter() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_filter("moid_au", NumberFilter::LessThan(0.05)).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![1, 3, 4, 6]);
}

#[test]
fn test_date_filters_treat_null_as_earliest() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();

    state.set_filter("discovery_date", DateFilter::After(day(1990, 1, 1))).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![3, 4, 5]);

    state.set_filter("discovery_date", DateFilter::Before(day(1950, 1, 1))).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![0, 1, 6, 7]);
}

#[test]
fn test_null_date_never_matches_on() {
    let ds = abc_dataset();
    let mut state = ViewState::neo();
    for reference in [day(2020, 1, 15), day(2019, 6, 1), day(1970, 1, 1)] {
        state.set_filter("discovery_date", DateFilter::On(reference)).unwrap();
        let view = state.compute_view(&ds);
        assert!(!designations(&view).contains(&"B".to_string()));
    }
}

#[test]
fn test_date_on_ignores_time_of_day() {
    let afternoon = day(2023, 5, 9).and_hms_opt(15, 0, 0).unwrap();
    let ds = Dataset::from_records(vec![
        Record::new().with("designation", "X").with("discovery_date", afternoon),
        Record::new().with("designation", "Y").with("discovery_date", day(2023, 5, 10)),
    ]);
    let mut state = ViewState::neo();
    state.set_filter("discovery_date", DateFilter::On(day(2023, 5, 9))).unwrap();
    assert_eq!(designations(&state.compute_view(&ds)), vec!["X"]);
}

#[test]
fn test_filters_and_across_columns() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_filter("pha", FlagFilter::new("Y")).unwrap();
    state
        .set_filter("designation", TextFilter::new(TextOp::StartsWith, "1"))
        .unwrap();
    assert_eq!(
        designations(&state.compute_view(&ds)),
        vec!["1566 Icarus", "101955 Bennu"]
    );

    state.clear_filter("pha").unwrap();
    assert_eq!(state.compute_view(&ds).len(), 3);
}

#[test]
fn test_empty_text_pattern_keeps_null_rows() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_filter("orbit_class", TextFilter::contains("")).unwrap();
    assert_eq!(state.compute_view(&ds).len(), ds.len());

    state.set_filter("orbit_class", TextFilter::contains("APO")).unwrap();
    assert_eq!(
        designations(&state.compute_view(&ds)),
        vec!["1566 Icarus", "101955 Bennu"]
    );
}

#[test]
fn test_malformed_cells_are_handled_silently() {
    let ds = Dataset::from_records(vec![
        Record::new().with("designation", "good").with("h_mag", 18.0),
        Record::new().with("designation", "bad").with("h_mag", "eighteen"),
    ]);
    let mut state = ViewState::neo();
    state.set_filter("h_mag", NumberFilter::GreaterThan(0.0)).unwrap();
    assert_eq!(designations(&state.compute_view(&ds)), vec!["good"]);

    state.reset_all();
    state.set_sort("h_mag", SortDirection::Descending).unwrap();
    let view = state.compute_view(&ds);
    assert_eq!(designations(&view), vec!["good", "bad"]);
    assert_eq!(view.rows().nth(1).unwrap().formatted("h_mag"), Some(""));
}

// ============================================================================
// SORT TESTS
// ============================================================================

#[test]
fn test_null_date_sorts_first_both_directions() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();

    state.set_sort("discovery_date", SortDirection::Descending).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![6, 5, 3, 4, 2, 1, 7, 0]);

    state.set_sort("discovery_date", SortDirection::Ascending).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![6, 0, 7, 1, 2, 4, 3, 5]);
}

#[test]
fn test_sort_is_stable_both_directions() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();

    // pha: Y at 1, 3, 4, 6 and N at 0, 2, 5, 7
    state.set_sort("pha", SortDirection::Ascending).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![1, 3, 4, 6, 0, 2, 5, 7]);

    state.set_sort("pha", SortDirection::Descending).unwrap();
    assert_eq!(state.compute_view(&ds).indices(), vec![0, 2, 5, 7, 1, 3, 4, 6]);
}

#[test]
fn test_clear_sort_restores_dataset_order() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_sort("h_mag", SortDirection::Ascending).unwrap();
    assert_eq!(state.compute_view(&ds).indices()[0], 7);
    state.clear_sort();
    assert_eq!(state.compute_view(&ds).indices(), (0..ds.len()).collect::<Vec<_>>());
}

// ============================================================================
// GROUPING TESTS
// ============================================================================

#[test]
fn test_group_by_first_appearance() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_group("orbit_class").unwrap();
    let view = state.compute_view(&ds);

    let keys: Vec<Option<RawValue>> = view.groups.iter().map(|g| g.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            Some(RawValue::text("Amor")),
            Some(RawValue::text("Apollo")),
            Some(RawValue::text("Aten")),
            Some(RawValue::text("Atira")),
            None,
        ]
    );
    assert_eq!(view.len(), ds.len());
}

#[test]
fn test_group_with_filter_and_sort() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_filter("pha", FlagFilter::new("Y")).unwrap();
    state.set_group("orbit_class").unwrap();
    state.set_sort("h_mag", SortDirection::Descending).unwrap();
    let view = state.compute_view(&ds);

    let groups: Vec<Vec<usize>> = view
        .groups
        .iter()
        .map(|g| g.rows.iter().map(|r| r.index).collect())
        .collect();
    assert_eq!(groups, vec![vec![4, 1], vec![3], vec![6]]);
    assert!(view
        .rows()
        .all(|r| r.raw.get("pha") == &RawValue::text("Y")));
}

#[test]
fn test_clear_group_returns_flat_view() {
    let ds = NeoFixture::dataset();
    let mut state = ViewState::neo();
    state.set_group("orbit_class").unwrap();
    state.clear_group();
    let view = state.compute_view(&ds);
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].key, None);
}

// ============================================================================
// ERRORS AND RESET
// ============================================================================

#[test]
fn test_caller_errors_are_reported_at_set_time() {
    let mut state = ViewState::neo();
    assert!(matches!(
        state.set_filter("discovery_date", TextFilter::contains("2020")),
        Err(ViewError::KindMismatch { .. })
    ));
    assert!(matches!(
        state.set_filter("pha", DateFilter::On(day(2020, 1, 1))),
        Err(ViewError::KindMismatch { .. })
    ));
    assert!(matches!(
        state.set_sort("albedo", SortDirection::Ascending),
        Err(ViewError::UnknownColumn(_))
    ));
    assert!(matches!(state.set_group("h_mag"), Err(ViewError::NotGroupable(_))));
    assert!(state.is_pristine());
}

#[test]
fn test_reset_all_is_idempotent() {
    let ds = NeoFixture::dataset();
    let pristine = ViewState::neo();
    let mut state = ViewState::neo();

    state.reset_all();
    assert_eq!(state, pristine);

    state.set_filter("pha", FlagFilter::new("N")).unwrap();
    state.set_sort("h_mag", SortDirection::Descending).unwrap();
    state.set_group("orbit_class").unwrap();
    state.reset_all();
    state.reset_all();

    assert_eq!(state, pristine);
    assert_eq!(
        state.compute_view(&ds).indices(),
        pristine.compute_view(&ds).indices()
    );
}
