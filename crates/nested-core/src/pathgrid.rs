//! Pathgrid records and their point/edge tables
//!
//! Points are identified by their position in `points`, and edges refer to
//! points by that position. Any insertion or removal of a point therefore
//! has to renumber the edges in the same commit. Both adapters route their
//! structural edits through [`Pathgrid::apply`] so the renumbering lives in
//! one place.

use crate::adapter::{
    check_column, check_insert, check_row, invalid_column, mismatch, ColumnSpec, NestedTable,
    NestedTableAdapter, NestedTableKind, ValueKind,
};
use crate::error::{Error, Result};
use crate::record::Record;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A waypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub autogenerated: u8,
    /// Number of edges leaving this point
    pub connection_count: u8,
    /// Reserved
    pub unknown: i16,
}

impl Point {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::default()
        }
    }
}

/// A connection between two points, by point index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub v0: i32,
    pub v1: i32,
}

impl Edge {
    pub fn new(v0: i32, v1: i32) -> Self {
        Self { v0, v1 }
    }

    /// Check if either endpoint is `index`
    pub fn touches(&self, index: i32) -> bool {
        self.v0 == index || self.v1 == index
    }

    /// This edge after a point is inserted at `position`, or `None` if an
    /// endpoint would overflow
    fn shifted_for_insert(&self, position: i32) -> Option<Edge> {
        let shift = |v: i32| if v >= position { v.checked_add(1) } else { Some(v) };
        Some(Edge::new(shift(self.v0)?, shift(self.v1)?))
    }

    /// Close the gap left by a point removed at `position`
    fn shift_for_removal(&mut self, position: i32) -> bool {
        let before = *self;
        if self.v0 > position {
            self.v0 -= 1;
        }
        if self.v1 > position {
            self.v1 -= 1;
        }
        *self != before
    }
}

/// Pathgrid header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathgridData {
    /// Exterior cell coordinates
    pub x: i32,
    pub y: i32,
    pub granularity: i16,
    /// Cached number of points
    pub point_count: i16,
}

/// A navigation graph owned by a cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathgrid {
    pub id: String,
    pub data: PathgridData,
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
}

/// Points together with the edges that index into them and the cached count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathgridPoints {
    pub points: Vec<Point>,
    pub point_count: i16,
    pub edges: Vec<Edge>,
}

/// A length-changing edit on one of the pathgrid's sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEdit {
    InsertPoint(usize),
    RemovePoint(usize),
    InsertEdge(usize),
    RemoveEdge(usize),
}

impl Pathgrid {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Apply a structural edit in place, keeping every edge pointing at the
    /// same point it did before. Removing a point deletes the edges that
    /// reference it. Returns the tables whose rows changed.
    pub fn apply(&mut self, edit: StructuralEdit) -> Result<Vec<NestedTableKind>> {
        match edit {
            StructuralEdit::InsertPoint(position) => self.insert_point(position),
            StructuralEdit::RemovePoint(position) => self.remove_point(position),
            StructuralEdit::InsertEdge(position) => {
                check_insert(position, self.edges.len())?;
                self.edges.insert(position, Edge::default());
                Ok(vec![NestedTableKind::PathgridEdges])
            }
            StructuralEdit::RemoveEdge(position) => {
                check_row(position, self.edges.len())?;
                self.edges.remove(position);
                Ok(vec![NestedTableKind::PathgridEdges])
            }
        }
    }

    fn insert_point(&mut self, position: usize) -> Result<Vec<NestedTableKind>> {
        let len = self.points.len();
        check_insert(position, len)?;
        let index = vertex_index(position, len)?;

        // renumber into a copy so an overflowing endpoint leaves the grid untouched
        let edges = self
            .edges
            .iter()
            .map(|edge| edge.shifted_for_insert(index))
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::OutOfRange {
                index: position,
                len,
            })?;
        let renumbered = edges != self.edges;
        self.edges = edges;

        self.points.insert(position, Point::default());
        self.data.point_count = self.data.point_count.saturating_add(1);

        Ok(touched_points(renumbered))
    }

    fn remove_point(&mut self, position: usize) -> Result<Vec<NestedTableKind>> {
        let len = self.points.len();
        check_row(position, len)?;
        let index = vertex_index(position, len)?;

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(index));
        let dropped = before - self.edges.len();
        if dropped > 0 {
            debug!(pathgrid = %self.id, point = position, dropped, "removed dangling edges");
        }

        let mut renumbered = dropped > 0;
        for edge in &mut self.edges {
            renumbered |= edge.shift_for_removal(index);
        }

        self.points.remove(position);
        self.data.point_count = self.data.point_count.saturating_sub(1);

        Ok(touched_points(renumbered))
    }

    /// Bulk copy of the points and their edges
    pub fn points_table(&self) -> PathgridPoints {
        PathgridPoints {
            points: self.points.clone(),
            point_count: self.data.point_count,
            edges: self.edges.clone(),
        }
    }

    /// Check that every edge endpoint names an existing point
    pub fn edges_valid(&self) -> bool {
        let len = self.points.len() as i64;
        self.edges.iter().all(|e| {
            (0..len).contains(&i64::from(e.v0)) && (0..len).contains(&i64::from(e.v1))
        })
    }
}

fn vertex_index(position: usize, len: usize) -> Result<i32> {
    i32::try_from(position).map_err(|_| Error::OutOfRange {
        index: position,
        len,
    })
}

fn touched_points(edges_changed: bool) -> Vec<NestedTableKind> {
    if edges_changed {
        vec![NestedTableKind::PathgridPoints, NestedTableKind::PathgridEdges]
    } else {
        vec![NestedTableKind::PathgridPoints]
    }
}

const POINT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::read_only("Index", ValueKind::Integer),
    ColumnSpec::new("X", ValueKind::Integer),
    ColumnSpec::new("Y", ValueKind::Integer),
    ColumnSpec::new("Z", ValueKind::Integer),
];

const EDGE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::read_only("Index", ValueKind::Integer),
    ColumnSpec::new("Point 0", ValueKind::Integer),
    ColumnSpec::new("Point 1", ValueKind::Integer),
];

/// Exposes `Pathgrid::points`; inserting or removing a point renumbers the edges
#[derive(Debug, Clone, Copy, Default)]
pub struct PathgridPointsAdapter;

impl NestedTableAdapter<Pathgrid> for PathgridPointsAdapter {
    fn kind(&self) -> NestedTableKind {
        NestedTableKind::PathgridPoints
    }

    fn column_specs(&self) -> &'static [ColumnSpec] {
        POINT_COLUMNS
    }

    fn add_row(&self, record: &mut Record<Pathgrid>, position: usize) -> Result<()> {
        let mut pathgrid = record.get().clone();
        let touched = pathgrid.apply(StructuralEdit::InsertPoint(position))?;
        record.commit(pathgrid, &touched);
        Ok(())
    }

    fn remove_row(&self, record: &mut Record<Pathgrid>, position: usize) -> Result<()> {
        let mut pathgrid = record.get().clone();
        let touched = pathgrid.apply(StructuralEdit::RemovePoint(position))?;
        record.commit(pathgrid, &touched);
        Ok(())
    }

    fn set_table(&self, record: &mut Record<Pathgrid>, table: NestedTable) -> Result<()> {
        let table = match table {
            NestedTable::PathgridPoints(table) => table,
            other => return Err(mismatch(self.kind(), &other)),
        };

        let mut pathgrid = record.get().clone();
        pathgrid.points = table.points;
        pathgrid.data.point_count = table.point_count;
        // edges are replaced too, the new points may not match the old indices
        pathgrid.edges = table.edges;

        record.commit(
            pathgrid,
            &[NestedTableKind::PathgridPoints, NestedTableKind::PathgridEdges],
        );
        Ok(())
    }

    fn table(&self, record: &Record<Pathgrid>) -> Result<NestedTable> {
        Ok(NestedTable::PathgridPoints(record.get().points_table()))
    }

    fn get_data(&self, record: &Record<Pathgrid>, row: usize, column: usize) -> Result<CellValue> {
        let points = &record.get().points;
        check_row(row, points.len())?;

        let point = &points[row];
        match column {
            0 => Ok(row.into()),
            1 => Ok(point.x.into()),
            2 => Ok(point.y.into()),
            3 => Ok(point.z.into()),
            _ => Err(invalid_column(self.kind(), POINT_COLUMNS, column)),
        }
    }

    fn set_data(
        &self,
        record: &mut Record<Pathgrid>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()> {
        check_row(row, record.get().points.len())?;
        if check_column(self.kind(), POINT_COLUMNS, column)?.read_only {
            return Ok(());
        }

        let mut pathgrid = record.get().clone();
        let point = &mut pathgrid.points[row];
        match column {
            1 => point.x = value.to_i32(),
            2 => point.y = value.to_i32(),
            3 => point.z = value.to_i32(),
            _ => return Err(invalid_column(self.kind(), POINT_COLUMNS, column)),
        }

        record.commit(pathgrid, &[NestedTableKind::PathgridPoints]);
        Ok(())
    }

    fn rows_count(&self, record: &Record<Pathgrid>) -> usize {
        record.get().points.len()
    }
}

/// Exposes `Pathgrid::edges`.
///
/// Endpoints are written as given. Nothing checks that they name existing
/// points or that the edge is not a duplicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathgridEdgesAdapter;

impl NestedTableAdapter<Pathgrid> for PathgridEdgesAdapter {
    fn kind(&self) -> NestedTableKind {
        NestedTableKind::PathgridEdges
    }

    fn column_specs(&self) -> &'static [ColumnSpec] {
        EDGE_COLUMNS
    }

    fn add_row(&self, record: &mut Record<Pathgrid>, position: usize) -> Result<()> {
        let mut pathgrid = record.get().clone();
        let touched = pathgrid.apply(StructuralEdit::InsertEdge(position))?;
        record.commit(pathgrid, &touched);
        Ok(())
    }

    fn remove_row(&self, record: &mut Record<Pathgrid>, position: usize) -> Result<()> {
        let mut pathgrid = record.get().clone();
        let touched = pathgrid.apply(StructuralEdit::RemoveEdge(position))?;
        record.commit(pathgrid, &touched);
        Ok(())
    }

    fn set_table(&self, record: &mut Record<Pathgrid>, table: NestedTable) -> Result<()> {
        let edges = match table {
            NestedTable::PathgridEdges(edges) => edges,
            other => return Err(mismatch(self.kind(), &other)),
        };

        let mut pathgrid = record.get().clone();
        pathgrid.edges = edges;
        record.commit(pathgrid, &[NestedTableKind::PathgridEdges]);
        Ok(())
    }

    fn table(&self, record: &Record<Pathgrid>) -> Result<NestedTable> {
        Ok(NestedTable::PathgridEdges(record.get().edges.clone()))
    }

    fn get_data(&self, record: &Record<Pathgrid>, row: usize, column: usize) -> Result<CellValue> {
        let edges = &record.get().edges;
        check_row(row, edges.len())?;

        let edge = &edges[row];
        match column {
            0 => Ok(row.into()),
            1 => Ok(edge.v0.into()),
            2 => Ok(edge.v1.into()),
            _ => Err(invalid_column(self.kind(), EDGE_COLUMNS, column)),
        }
    }

    fn set_data(
        &self,
        record: &mut Record<Pathgrid>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()> {
        check_row(row, record.get().edges.len())?;
        if check_column(self.kind(), EDGE_COLUMNS, column)?.read_only {
            return Ok(());
        }

        let mut pathgrid = record.get().clone();
        let edge = &mut pathgrid.edges[row];
        match column {
            1 => edge.v0 = value.to_i32(),
            2 => edge.v1 = value.to_i32(),
            _ => return Err(invalid_column(self.kind(), EDGE_COLUMNS, column)),
        }

        record.commit(pathgrid, &[NestedTableKind::PathgridEdges]);
        Ok(())
    }

    fn rows_count(&self, record: &Record<Pathgrid>) -> usize {
        record.get().edges.len()
    }
}
