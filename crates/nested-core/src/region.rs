//! Region records and their ambient sound table

use crate::adapter::{
    check_column, check_insert, check_row, invalid_column, mismatch, ColumnSpec, NestedTable,
    NestedTableAdapter, NestedTableKind, ValueKind,
};
use crate::error::Result;
use crate::record::Record;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// An ambient sound and its chance of playing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRef {
    pub sound: String,
    pub chance: u8,
}

impl SoundRef {
    pub fn new(sound: impl Into<String>, chance: u8) -> Self {
        Self {
            sound: sound.into(),
            chance,
        }
    }
}

/// A weather region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub sounds: Vec<SoundRef>,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sounds: Vec::new(),
        }
    }
}

const SOUND_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("Sound", ValueKind::String),
    ColumnSpec::new("Chance", ValueKind::Integer),
];

/// Exposes `Region::sounds`
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSoundsAdapter;

impl NestedTableAdapter<Region> for RegionSoundsAdapter {
    fn kind(&self) -> NestedTableKind {
        NestedTableKind::RegionSounds
    }

    fn column_specs(&self) -> &'static [ColumnSpec] {
        SOUND_COLUMNS
    }

    fn add_row(&self, record: &mut Record<Region>, position: usize) -> Result<()> {
        let mut region = record.get().clone();
        check_insert(position, region.sounds.len())?;

        region.sounds.insert(position, SoundRef::default());

        record.commit(region, &[self.kind()]);
        Ok(())
    }

    fn remove_row(&self, record: &mut Record<Region>, position: usize) -> Result<()> {
        let mut region = record.get().clone();
        check_row(position, region.sounds.len())?;

        region.sounds.remove(position);

        record.commit(region, &[self.kind()]);
        Ok(())
    }

    fn set_table(&self, record: &mut Record<Region>, table: NestedTable) -> Result<()> {
        let sounds = match table {
            NestedTable::RegionSounds(sounds) => sounds,
            other => return Err(mismatch(self.kind(), &other)),
        };

        let mut region = record.get().clone();
        region.sounds = sounds;
        record.commit(region, &[self.kind()]);
        Ok(())
    }

    fn table(&self, record: &Record<Region>) -> Result<NestedTable> {
        Ok(NestedTable::RegionSounds(record.get().sounds.clone()))
    }

    fn get_data(&self, record: &Record<Region>, row: usize, column: usize) -> Result<CellValue> {
        let sounds = &record.get().sounds;
        check_row(row, sounds.len())?;

        let sound = &sounds[row];
        match column {
            0 => Ok(sound.sound.as_str().into()),
            1 => Ok(sound.chance.into()),
            _ => Err(invalid_column(self.kind(), SOUND_COLUMNS, column)),
        }
    }

    fn set_data(
        &self,
        record: &mut Record<Region>,
        value: &CellValue,
        row: usize,
        column: usize,
    ) -> Result<()> {
        check_row(row, record.get().sounds.len())?;
        check_column(self.kind(), SOUND_COLUMNS, column)?;

        let mut region = record.get().clone();
        let sound = &mut region.sounds[row];
        match column {
            0 => sound.sound = value.to_text(),
            1 => sound.chance = value.to_u8(),
            _ => return Err(invalid_column(self.kind(), SOUND_COLUMNS, column)),
        }

        record.commit(region, &[self.kind()]);
        Ok(())
    }

    fn rows_count(&self, record: &Record<Region>) -> usize {
        record.get().sounds.len()
    }
}
