//! Local store of puzzle inputs

use crate::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of puzzle inputs laid out as `{dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the input file for a year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Stored input, or `None` when there is no file for this year/day
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        match fs::read_to_string(self.input_path(year, day)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write input, creating the directory if needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), InputError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            InputError::DirCreation(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        fs::write(self.input_path(year, day), input)?;
        Ok(())
    }
}
