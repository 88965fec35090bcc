//! Local user-data persistence with file locking.
//!
//! One JSON file holds a user's profile, meal and workout logs, and custom
//! workout types. Every event is applied as a single read-modify-write under
//! an exclusive lock so concurrent processes can't lose XP updates.

use crate::logs::{MealLogBook, WorkoutLogBook};
use crate::profile::Profile;
use crate::{CustomWorkoutType, Error, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Everything stored for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserData {
    pub profile: Profile,
    #[serde(default)]
    pub meal_logs: MealLogBook,
    #[serde(default)]
    pub workout_logs: WorkoutLogBook,
    #[serde(default)]
    pub custom_workouts: Vec<CustomWorkoutType>,
}

impl Default for UserData {
    fn default() -> Self {
        Self::new(Profile::new(Uuid::new_v4()))
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

impl UserData {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            meal_logs: MealLogBook::default(),
            workout_logs: WorkoutLogBook::default(),
            custom_workouts: Vec::new(),
        }
    }

    /// Load user data from a file with shared locking
    ///
    /// Returns default data if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns default data.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using default profile");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open state file {:?}: {}. Using defaults.", path, e);
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<UserData>(&contents) {
            Ok(data) => {
                if let Err(e) = data.profile.validate() {
                    tracing::warn!("State file {:?} holds an invalid profile: {}", path, e);
                }
                tracing::debug!("Loaded user data from {:?}", path);
                Ok(data)
            }
            Err(e) => {
                tracing::warn!("Failed to parse state file {:?}: {}. Using defaults.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save user data atomically
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::State(format!("state path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved user data to {:?}", path);
        Ok(())
    }

    /// Load, modify and save under an exclusive lock
    ///
    /// The closure's error aborts the update and leaves the file untouched.
    pub fn update<F, T>(path: &Path, f: F) -> Result<(Self, T)>
    where
        F: FnOnce(&mut UserData) -> Result<T>,
    {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path(path))?;
        lock.lock_exclusive()?;

        let result = Self::load(path).and_then(|mut data| {
            let out = f(&mut data)?;
            data.save(path)?;
            Ok((data, out))
        });

        lock.unlock()?;
        result
    }
}
