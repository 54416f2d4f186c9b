//! nested-core: row/column adapters over sub-collections embedded in records
//!
//! This library provides:
//! - An editable record container with dirty tracking and undo
//! - The `NestedTableAdapter` contract used by generic table views
//! - Adapters for pathgrid points and edges, faction reactions, region
//!   sounds and the info result script
//! - A bulk transport value for copying whole nested tables in and out

pub mod adapter;
pub mod error;
pub mod faction;
pub mod info;
pub mod pathgrid;
pub mod record;
pub mod region;
pub mod value;

pub use adapter::{ColumnSpec, NestedTable, NestedTableAdapter, NestedTableKind, ValueKind};
pub use error::{Error, Result};
pub use faction::{Faction, FactionReactionsAdapter, Reaction, Reactions};
pub use info::{Info, InfoScriptAdapter};
pub use pathgrid::{
    Edge, Pathgrid, PathgridData, PathgridEdgesAdapter, PathgridPoints, PathgridPointsAdapter,
    Point, StructuralEdit,
};
pub use record::{Record, RecordState, UndoEntry};
pub use region::{Region, RegionSoundsAdapter, SoundRef};
pub use value::CellValue;
