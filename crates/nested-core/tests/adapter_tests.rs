mod common;

use common::{faction, info, pathgrid, region};
use nested_core::{
    CellValue, Edge, Error, FactionReactionsAdapter, InfoScriptAdapter, NestedTableAdapter,
    NestedTableKind, PathgridEdgesAdapter, PathgridPointsAdapter, Point, Record,
    RegionSoundsAdapter,
};
use pretty_assertions::assert_eq;
use std::fmt::Debug;

// ── Helpers ──────────────────────────────────────────────────────

/// Every column past the declared ones fails on read and write, without a commit
fn assert_invalid_columns_rejected<T: Clone + PartialEq + Debug>(
    record: &mut Record<T>,
    adapter: &dyn NestedTableAdapter<T>,
) {
    let before = record.get().clone();
    let count = adapter.columns_count(record);

    for column in [count, count + 1, usize::MAX] {
        assert!(
            matches!(
                adapter.get_data(record, 0, column),
                Err(Error::InvalidColumn { .. })
            ),
            "{} read of column {column}",
            adapter.kind()
        );
        assert!(
            matches!(
                adapter.set_data(record, &CellValue::Integer(1), 0, column),
                Err(Error::InvalidColumn { .. })
            ),
            "{} write of column {column}",
            adapter.kind()
        );
    }

    assert_eq!(record.get(), &before);
    assert_eq!(record.revision(), 0);
}

/// Removing past the last row fails without a commit
fn assert_remove_out_of_range_rejected<T: Clone + PartialEq + Debug>(
    record: &mut Record<T>,
    adapter: &dyn NestedTableAdapter<T>,
) {
    let before = record.get().clone();
    let rows = adapter.rows_count(record);

    for position in [rows, rows + 5] {
        assert_eq!(
            adapter.remove_row(record, position),
            Err(Error::OutOfRange {
                index: position,
                len: rows
            })
        );
    }
    assert!(adapter.get_data(record, rows, 0).is_err());

    assert_eq!(record.get(), &before);
    assert_eq!(record.revision(), 0);
}

/// `set_table(table())` commits a snapshot equal to the original
fn assert_table_round_trip<T: Clone + PartialEq + Debug>(
    record: &mut Record<T>,
    adapter: &dyn NestedTableAdapter<T>,
) {
    let before = record.get().clone();
    let table = adapter.table(record).unwrap();
    assert_eq!(table.kind(), adapter.kind());
    assert_eq!(table.row_count(), adapter.rows_count(record));

    adapter.set_table(record, table).unwrap();
    assert_eq!(record.get(), &before);
    assert_eq!(record.revision(), 1);
}

// ── Contract across variants ─────────────────────────────────────

#[test]
fn invalid_columns_are_rejected_everywhere() {
    assert_invalid_columns_rejected(
        &mut Record::new(pathgrid(&[(1, 2, 3)], &[(0, 0)])),
        &PathgridPointsAdapter,
    );
    assert_invalid_columns_rejected(
        &mut Record::new(pathgrid(&[(1, 2, 3)], &[(0, 0)])),
        &PathgridEdgesAdapter,
    );
    assert_invalid_columns_rejected(
        &mut Record::new(faction(&[("Fighters Guild", -2)])),
        &FactionReactionsAdapter,
    );
    assert_invalid_columns_rejected(
        &mut Record::new(region(&[("Gull", 5)])),
        &RegionSoundsAdapter,
    );
    assert_invalid_columns_rejected(&mut Record::new(info("Goodbye")), &InfoScriptAdapter);
}

#[test]
fn out_of_range_removal_is_rejected_everywhere() {
    assert_remove_out_of_range_rejected(
        &mut Record::new(pathgrid(&[(1, 2, 3), (4, 5, 6)], &[(0, 1)])),
        &PathgridPointsAdapter,
    );
    assert_remove_out_of_range_rejected(
        &mut Record::new(pathgrid(&[(1, 2, 3), (4, 5, 6)], &[(0, 1)])),
        &PathgridEdgesAdapter,
    );
    assert_remove_out_of_range_rejected(
        &mut Record::new(faction(&[("A", 1), ("B", 2)])),
        &FactionReactionsAdapter,
    );
    assert_remove_out_of_range_rejected(&mut Record::new(region(&[])), &RegionSoundsAdapter);
}

#[test]
fn table_round_trip_is_identity() {
    assert_table_round_trip(
        &mut Record::new(pathgrid(&[(1, 2, 3), (4, 5, 6)], &[(0, 1), (1, 0)])),
        &PathgridPointsAdapter,
    );
    assert_table_round_trip(
        &mut Record::new(pathgrid(&[(1, 2, 3), (4, 5, 6)], &[(0, 1), (1, 0)])),
        &PathgridEdgesAdapter,
    );
    assert_table_round_trip(
        &mut Record::new(faction(&[("Temple", 3), ("Imperial Cult", 1)])),
        &FactionReactionsAdapter,
    );
    assert_table_round_trip(
        &mut Record::new(region(&[("Gull", 5), ("Wind", 30)])),
        &RegionSoundsAdapter,
    );
}

#[test]
fn column_counts_match_specs() {
    let grid = Record::new(pathgrid(&[], &[]));
    assert_eq!(PathgridPointsAdapter.columns_count(&grid), 4);
    assert_eq!(PathgridEdgesAdapter.columns_count(&grid), 3);
    assert_eq!(
        FactionReactionsAdapter.columns_count(&Record::new(faction(&[]))),
        2
    );
    assert_eq!(RegionSoundsAdapter.columns_count(&Record::new(region(&[]))), 2);
    assert_eq!(InfoScriptAdapter.columns_count(&Record::new(info(""))), 1);

    let specs = PathgridPointsAdapter.column_specs();
    assert!(specs[0].read_only);
    assert!(specs[1..].iter().all(|s| !s.read_only));
}

#[test]
fn index_columns_report_row_and_ignore_writes() {
    let mut record = Record::new(pathgrid(&[(1, 1, 1), (2, 2, 2)], &[(0, 1), (1, 0)]));

    assert_eq!(
        PathgridPointsAdapter.get_data(&record, 1, 0).unwrap(),
        CellValue::Integer(1)
    );
    assert_eq!(
        PathgridEdgesAdapter.get_data(&record, 1, 0).unwrap(),
        CellValue::Integer(1)
    );

    let before = record.get().clone();
    PathgridPointsAdapter
        .set_data(&mut record, &CellValue::Integer(5), 1, 0)
        .unwrap();
    PathgridEdgesAdapter
        .set_data(&mut record, &CellValue::Integer(5), 1, 0)
        .unwrap();

    assert_eq!(record.get(), &before);
    assert_eq!(record.revision(), 0);
}

// ── Scenarios ────────────────────────────────────────────────────

#[test]
fn inserting_a_point_shifts_both_endpoints() {
    let mut record = Record::new(pathgrid(&[(0, 0, 0)], &[(0, 0)]));

    PathgridPointsAdapter.add_row(&mut record, 0).unwrap();

    assert_eq!(record.get().points, vec![Point::new(0, 0, 0); 2]);
    assert_eq!(record.get().edges, vec![Edge::new(1, 1)]);
    assert_eq!(record.get().data.point_count, 2);
    assert_eq!(
        record.last_touched(),
        &[NestedTableKind::PathgridPoints, NestedTableKind::PathgridEdges]
    );
}

#[test]
fn removing_a_point_deletes_every_edge_touching_it() {
    let mut record = Record::new(pathgrid(
        &[(0, 0, 0), (1, 1, 1), (2, 2, 2)],
        &[(0, 1), (1, 2)],
    ));

    PathgridPointsAdapter.remove_row(&mut record, 1).unwrap();

    assert_eq!(
        record.get().points,
        vec![Point::new(0, 0, 0), Point::new(2, 2, 2)]
    );
    assert!(record.get().edges.is_empty());
    assert_eq!(PathgridEdgesAdapter.rows_count(&record), 0);
}

#[test]
fn reaction_rows_follow_key_order_not_insertion_order() {
    let mut faction = faction(&[]);
    faction.reactions.insert("b", 2);
    faction.reactions.insert("A", 1);
    let mut record = Record::new(faction);

    FactionReactionsAdapter.remove_row(&mut record, 0).unwrap();

    assert_eq!(record.get().reactions.position("A"), None);
    assert_eq!(record.get().reactions.reaction("b"), Some(2));
}

#[test]
fn new_sound_row_is_blank_and_chance_is_writable() {
    let mut record = Record::new(region(&[]));

    RegionSoundsAdapter.add_row(&mut record, 0).unwrap();
    assert_eq!(
        RegionSoundsAdapter.get_data(&record, 0, 0).unwrap(),
        CellValue::from("")
    );
    assert_eq!(
        RegionSoundsAdapter.get_data(&record, 0, 1).unwrap(),
        CellValue::Integer(0)
    );

    RegionSoundsAdapter
        .set_data(&mut record, &CellValue::Integer(200), 0, 1)
        .unwrap();
    assert_eq!(record.get().sounds[0].chance, 200);
}

#[test]
fn info_table_is_fixed() {
    let mut record = Record::new(info("Goodbye"));

    assert_eq!(InfoScriptAdapter.rows_count(&record), 1);
    assert!(matches!(
        InfoScriptAdapter.add_row(&mut record, 0),
        Err(Error::Unsupported { .. })
    ));
    assert!(matches!(
        InfoScriptAdapter.remove_row(&mut record, 0),
        Err(Error::Unsupported { .. })
    ));
    assert!(matches!(
        InfoScriptAdapter.table(&record),
        Err(Error::Unsupported { .. })
    ));
    assert_eq!(InfoScriptAdapter.rows_count(&record), 1);
}

// ── Undo ─────────────────────────────────────────────────────────

#[test]
fn undo_reverts_point_cascade_and_reports_touched_tables() {
    let original = pathgrid(&[(0, 0, 0), (1, 1, 1), (2, 2, 2)], &[(0, 1), (1, 2), (2, 0)]);
    let mut record = Record::new(original.clone());

    PathgridPointsAdapter.remove_row(&mut record, 1).unwrap();
    assert_eq!(record.get().edges, vec![Edge::new(1, 0)]);

    let touched = record.undo().unwrap();
    assert_eq!(
        touched,
        vec![NestedTableKind::PathgridPoints, NestedTableKind::PathgridEdges]
    );
    assert_eq!(record.get(), &original);
    assert!(!record.is_modified());
}

#[test]
fn each_operation_commits_once() {
    let mut record = Record::new(region(&[("Gull", 5)]));

    RegionSoundsAdapter.add_row(&mut record, 1).unwrap();
    RegionSoundsAdapter
        .set_data(&mut record, &CellValue::from("Wind"), 1, 0)
        .unwrap();
    RegionSoundsAdapter.remove_row(&mut record, 0).unwrap();

    assert_eq!(record.revision(), 3);
    assert_eq!(record.history().len(), 3);
    assert_eq!(record.get().sounds[0].sound, "Wind");
}
