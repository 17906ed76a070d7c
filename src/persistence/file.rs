use super::{PersistenceError, PersistenceResult, Storage};
use crate::calendar::DayOfWeek;
use crate::class_session::ClassSession;
use crate::state::ScheduleState;
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Keeps each record as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> PersistenceResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PersistenceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::InvalidData(format!(
                "storage key '{key}' is not a plain name"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.record_path(key)?;
        // Write beside the target and rename so a crash never leaves half a record.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote record");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> PersistenceResult<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn save_state_to_json<P: AsRef<Path>>(state: &ScheduleState, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, state)?;
    Ok(())
}

pub fn load_state_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ScheduleState> {
    let file = File::open(path)?;
    let state: ScheduleState = serde_json::from_reader(file)?;
    validate_state(&state)?;
    Ok(state)
}

/// Rejects states the store could not operate on safely.
pub fn validate_state(state: &ScheduleState) -> PersistenceResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(state.classes.len());
    for class in &state.classes {
        if class.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData(
                "class session with empty id".into(),
            ));
        }
        if !seen.insert(class.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate class id {}",
                class.id
            )));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TimetableCsvRecord<'a> {
    day: &'a str,
    class_group: &'a str,
    time_slot: &'a str,
    teacher: &'a str,
    subject: &'a str,
    room: &'a str,
    color: &'a str,
}

impl<'a> TimetableCsvRecord<'a> {
    fn new(class: &'a ClassSession, state: &'a ScheduleState) -> Self {
        Self {
            day: class.day.tag(),
            class_group: class.class_group.code(),
            time_slot: &class.time_slot,
            teacher: &class.teacher,
            subject: &class.subject,
            room: &class.room,
            color: class
                .color
                .as_deref()
                .unwrap_or_else(|| state.color_for(class.class_group)),
        }
    }
}

/// One row per class session, ordered by day, group and start time.
pub fn save_timetable_to_csv<P: AsRef<Path>>(
    state: &ScheduleState,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for day in DayOfWeek::ALL {
        for group in crate::ClassGroup::ALL {
            for class in state.classes_for(day, group) {
                writer.serialize(TimetableCsvRecord::new(class, state))?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
