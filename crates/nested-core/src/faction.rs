//! Faction records and their reaction table
//!
//! Reactions are kept as a sequence sorted by faction id with unique keys,
//! so row `n` of the table is always the `n`-th key in byte order. Renaming
//! a row re-sorts it, which means the renamed row usually moves.

use crate::adapter::{
    check_column, check_insert, check_row, invalid_column, mismatch, ColumnSpec, NestedTable,
    NestedTableAdapter, NestedTableKind, ValueKind,
};
use crate::error::Result;
use crate::record::Record;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Disposition towards another faction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub faction: String,
    pub reaction: i32,
}

impl Reaction {
    pub fn new(faction: impl Into<String>, reaction: i32) -> Self {
        Self {
            faction: faction.into(),
            reaction,
        }
    }
}

/// Reactions ordered by faction id, one entry per faction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Reaction>", into = "Vec<Reaction>")]
pub struct Reactions {
    entries: Vec<Reaction>,
}

impl Reactions {
    /// Create an empty reaction list
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at row `index`
    pub fn get(&self, index: usize) -> Option<&Reaction> {
        self.entries.get(index)
    }

    /// Iterate entries in row order
    pub fn iter(&self) -> std::slice::Iter<'_, Reaction> {
        self.entries.iter()
    }

    fn search(&self, faction: &str) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|e| e.faction.as_str().cmp(faction))
    }

    /// Row holding `faction`, if present
    pub fn position(&self, faction: &str) -> Option<usize> {
        self.search(faction).ok()
    }

    /// Reaction towards `faction`, if present
    pub fn reaction(&self, faction: &str) -> Option<i32> {
        self.position(faction).map(|i| self.entries[i].reaction)
    }

    /// Insert a new entry in key order. An existing entry for `faction` is
    /// kept as is and `false` is returned.
    pub fn insert(&mut self, faction: impl Into<String>, reaction: i32) -> bool {
        let faction = faction.into();
        match self.search(&faction) {
            Ok(_) => false,
            Err(index) => {
                self.entries.insert(index, Reaction { faction, reaction });
                true
            }
        }
    }

    /// Set the reaction towards `faction`, adding the entry if needed
    pub fn set(&mut self, faction: &str, reaction: i32) {
        match self.search(faction) {
            Ok(index) => self.entries[index].reaction = reaction,
            Err(index) => self.entries.insert(index, Reaction::new(faction, reaction)),
        }
    }

    /// Remove and return the entry at row `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Reaction> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Re-key the entry at `index`, keeping its reaction. Returns false when
    /// `faction` already had an entry, in which case that entry wins and the
    /// renamed row is gone.
    pub fn rename_at(&mut self, index: usize, faction: impl Into<String>) -> bool {
        match self.remove_at(index) {
            Some(old) => self.insert(faction, old.reaction),
            None => false,
        }
    }
}

impl FromIterator<Reaction> for Reactions {
    fn from_iter<I: IntoIterator<Item = Reaction>>(iter: I) -> Self {
        let mut reactions = Reactions::new();
        for r in iter {
            reactions.insert(r.faction, r.reaction);
        }
        reactions
    }
}

impl From<Vec<Reaction>> for Reactions {
    fn from(entries: Vec<Reaction>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Reactions> for Vec<Reaction> {
    fn from(reactions: Reactions) -> Self {
        reactions.entries
    }
}

impl<'a> IntoIterator for &'a Reactions {
    type Item = &'a Reaction;
    type IntoIter = std::slice::Iter<'a, Reaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A faction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    pub name: String,
    pub reactions: Reactions,
}

impl Faction {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reactions: Reactions::new(),
        }
    }
}

const REACTION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("Faction", ValueKind::String),
    ColumnSpec::new("Reaction", ValueKind::Integer),
];

/// Exposes `Faction::reactions` in faction id order
#[derive(Debug, Clone, Copy, Default)]
pub struct FactionReactionsAdapter;

impl NestedTableAdapter<Faction> for FactionReactionsAdapter {
    fn kind(&self) -> NestedTableKind {
        NestedTableKind::FactionReactions
    }

    fn column_specs(&self) -> &'static [ColumnSpec] {
        REACTION_COLUMNS
    }

    /// The blank row sorts by its empty key, not at `position`
    fn add_row(&self, record: &mut Record<Faction>, position: usize) -> Result<()> {
        let mut faction = record.get().clone();
        check_insert(position, faction.reactions.len())?;

        faction.reactions.insert("", 0);

        record.commit(faction, &[self.kind()]);
        Ok(())
    }

    fn remove_row(&self, record: &mut Record<Faction>, position: usize) -> Result<()> {
        let mut faction = record.get().clone();
        check_row(position, faction.reactions.len())?;

        faction.reactions.remove_at(position);

        record.commit(faction, &[self.kind()]);
        Ok(())
    }

    fn set_table(&self, record: &mut Record<Faction>, table: NestedTable) -> Result<()> {
        let reactions = match table {
            NestedTable::FactionReactions(reactions) => reactions,
            other => return Err(mismatch(self.kind(), &other)),
        };

        let mut faction = record.get().clone();
        faction.reactions = reactions;
        record.commit(faction, &[self.kind()]);
        Ok(())
    }

    fn table(&self, record: &Record<Faction>) -> Result<NestedTable> {
        Ok(NestedTable::FactionReactions(record.get().reactions.clone()))
    }

    fn get_data(&self, record: &Record<Faction>, row: usize, column: usize) -> Result<CellValue> {
        let reactions = &record.get().reactions;
        check_row(row, reactions.len())?;

        let entry = &reactions.entries[row];
        match column {
            0 => Ok(entry.faction.as_str().into()),
            1 => Ok(entry.reaction.into()),
            _ => Err(invalid_column(self.kind(), REACTION_COLUMNS, column)),
        }
    }

    fn set_data(
        &self,
        record: &mut Record<Faction>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()> {
        check_row(row, record.get().reactions.len())?;
        check_column(self.kind(), REACTION_COLUMNS, column)?;

        let mut faction = record.get().clone();
        let key = faction.reactions.entries[row].faction.clone();
        match column {
            0 => {
                let new_key = value.to_text();
                if !faction.reactions.rename_at(row, new_key.as_str()) {
                    warn!(
                        faction = %faction.id,
                        from = %key,
                        to = %new_key,
                        "renamed reaction onto an existing entry, the renamed row was dropped"
                    );
                }
            }
            1 => faction.reactions.set(&key, value.to_i32()),
            _ => return Err(invalid_column(self.kind(), REACTION_COLUMNS, column)),
        }

        record.commit(faction, &[self.kind()]);
        Ok(())
    }

    fn rows_count(&self, record: &Record<Faction>) -> usize {
        record.get().reactions.len()
    }
}
