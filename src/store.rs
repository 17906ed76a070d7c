use crate::auth::{AdminSession, CredentialVerifier};
use crate::calendar::DayOfWeek;
use crate::class_group::ClassGroup;
use crate::class_session::{ClassSession, ClassSessionPatch, NewClassSession};
use crate::persistence::{
    self, PersistenceError, SCHEDULE_KEY, SESSION_KEY, Storage, validate_state,
};
use crate::state::ScheduleState;
use crate::time_slot::{TimeFormatError, TimeSlot, TimeSlotDraft, TimeSlotPatch};
use std::fmt;
use uuid::Uuid;

#[derive(Debug)]
pub enum StoreError {
    /// A write was attempted without an admin session.
    Unauthorized,
    InvalidTime(TimeFormatError),
    ClassNotFound(String),
    /// An imported schedule failed validation; nothing was applied.
    InvalidState(String),
    TimeSlotOutOfRange {
        index: usize,
        len: usize,
    },
    /// Storage rejected the write; the change was not applied.
    Persistence(PersistenceError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unauthorized => write!(f, "editing requires an admin session"),
            StoreError::InvalidTime(err) => write!(f, "{err}"),
            StoreError::ClassNotFound(id) => write!(f, "class {id} not found"),
            StoreError::InvalidState(msg) => write!(f, "invalid schedule: {msg}"),
            StoreError::TimeSlotOutOfRange { index, len } => write!(
                f,
                "time slot {index} not found (schedule has {len} slots)"
            ),
            StoreError::Persistence(err) => write!(f, "failed to save schedule: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<TimeFormatError> for StoreError {
    fn from(value: TimeFormatError) -> Self {
        Self::InvalidTime(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the schedule and the admin session and mirrors both to storage.
///
/// Reads are open to everyone. Every write except [`set_current_day`] needs
/// an admin session. A write either saves the whole schedule record and
/// applies it, or fails and leaves state untouched.
///
/// [`set_current_day`]: ScheduleStore::set_current_day
pub struct ScheduleStore {
    state: ScheduleState,
    user: Option<AdminSession>,
    storage: Box<dyn Storage>,
    verifier: Box<dyn CredentialVerifier>,
}

impl ScheduleStore {
    /// Rehydrates from `storage`, seeding the default timetable when the
    /// schedule record is missing or unreadable.
    pub fn open<S, V>(storage: S, verifier: V) -> Self
    where
        S: Storage + 'static,
        V: CredentialVerifier + 'static,
    {
        let storage: Box<dyn Storage> = Box::new(storage);
        let loaded = persistence::load_json::<ScheduleState>(storage.as_ref(), SCHEDULE_KEY)
            .and_then(|state| match state {
                Some(state) => validate_state(&state).map(|_| Some(state)),
                None => Ok(None),
            });
        let state = match loaded {
            Ok(Some(state)) => {
                tracing::info!(classes = state.classes.len(), "restored schedule");
                state
            }
            Ok(None) => {
                tracing::info!("no stored schedule, seeding defaults");
                ScheduleState::seeded()
            }
            Err(err) => {
                tracing::warn!(%err, "stored schedule unreadable, seeding defaults");
                ScheduleState::seeded()
            }
        };

        let user = match persistence::load_json::<AdminSession>(storage.as_ref(), SESSION_KEY) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(%err, "stored session unreadable, starting anonymous");
                None
            }
        };

        let store = Self {
            state,
            user,
            storage,
            verifier: Box::new(verifier),
        };
        if let Err(err) = persist_state(store.storage.as_ref(), &store.state) {
            tracing::warn!(%err, "could not write initial schedule");
        }
        store
    }

    /// Starts from `state` without reading storage. The first write replaces
    /// whatever the storage held.
    pub fn with_state<S, V>(state: ScheduleState, storage: S, verifier: V) -> Self
    where
        S: Storage + 'static,
        V: CredentialVerifier + 'static,
    {
        Self {
            state,
            user: None,
            storage: Box::new(storage),
            verifier: Box::new(verifier),
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn user(&self) -> Option<&AdminSession> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin)
    }

    /// `Ok(false)` for a rejected pair. The session only starts once its
    /// record is saved.
    pub fn login(&mut self, username: &str, password: &str) -> StoreResult<bool> {
        if !self.verifier.verify(username, password) {
            tracing::warn!(username, "login rejected");
            return Ok(false);
        }
        let session = AdminSession::admin(username);
        persistence::save_json(self.storage.as_ref(), SESSION_KEY, &session).map_err(|err| {
            tracing::warn!(%err, "failed to persist session");
            StoreError::Persistence(err)
        })?;
        self.user = Some(session);
        tracing::info!(username, "admin signed in");
        Ok(true)
    }

    pub fn logout(&mut self) -> StoreResult<()> {
        self.storage.remove_item(SESSION_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "admin signed out");
        }
        Ok(())
    }

    pub fn add_class(&mut self, new_class: NewClassSession) -> StoreResult<ClassSession> {
        self.require_admin("add_class")?;
        let color = match new_class.color.as_deref() {
            Some(color) if !color.trim().is_empty() => color.to_string(),
            _ => self.state.color_for(new_class.class_group).to_string(),
        };
        let id = self.fresh_class_id();
        let session = new_class.into_session(id, color);
        let mut next = self.state.clone();
        next.classes.push(session.clone());
        self.commit(next)?;
        tracing::info!(
            id = %session.id,
            group = %session.class_group,
            day = %session.day,
            "added class session"
        );
        Ok(session)
    }

    pub fn update_class(
        &mut self,
        id: &str,
        patch: &ClassSessionPatch,
    ) -> StoreResult<ClassSession> {
        self.require_admin("update_class")?;
        let mut next = self.state.clone();
        let class = next
            .classes
            .iter_mut()
            .find(|class| class.id == id)
            .ok_or_else(|| not_found(id))?;
        class.apply(patch);
        let updated = class.clone();
        self.commit(next)?;
        tracing::info!(id, "updated class session");
        Ok(updated)
    }

    pub fn remove_class(&mut self, id: &str) -> StoreResult<ClassSession> {
        self.require_admin("remove_class")?;
        let position = self
            .state
            .classes
            .iter()
            .position(|class| class.id == id)
            .ok_or_else(|| not_found(id))?;
        let mut next = self.state.clone();
        let removed = next.classes.remove(position);
        self.commit(next)?;
        tracing::info!(id, "removed class session");
        Ok(removed)
    }

    /// Navigation only; allowed without a session.
    pub fn set_current_day(&mut self, day: DayOfWeek) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.current_day = day;
        self.commit(next)
    }

    pub fn update_class_color(
        &mut self,
        group: ClassGroup,
        color: impl Into<String>,
    ) -> StoreResult<()> {
        self.require_admin("update_class_color")?;
        let color = color.into();
        let mut next = self.state.clone();
        next.class_colors.set(group, color.clone());
        self.commit(next)?;
        tracing::info!(%group, color = %color, "changed class color");
        Ok(())
    }

    /// Merges `patch` into the slot at `index`. The sequence is not re-sorted.
    pub fn update_time_slot(&mut self, index: usize, patch: &TimeSlotPatch) -> StoreResult<TimeSlot> {
        self.require_admin("update_time_slot")?;
        let len = self.state.time_slots.len();
        let slot = self
            .state
            .time_slots
            .get(index)
            .ok_or(StoreError::TimeSlotOutOfRange { index, len })?;
        let patched = slot.patched(patch).inspect_err(|err| {
            tracing::warn!(index, %err, "time slot update rejected");
        })?;
        let mut next = self.state.clone();
        next.time_slots[index] = patched.clone();
        self.commit(next)?;
        tracing::info!(index, slot = %patched, "updated time slot");
        Ok(patched)
    }

    /// Inserts the slot after every slot starting no later than it, keeping
    /// the sequence ordered by start time. Returns where it landed.
    pub fn add_time_slot(&mut self, draft: TimeSlotDraft) -> StoreResult<usize> {
        self.require_admin("add_time_slot")?;
        let slot = TimeSlot::try_from(draft).inspect_err(|err| {
            tracing::warn!(%err, "time slot rejected");
        })?;
        let index = self
            .state
            .time_slots
            .partition_point(|existing| existing.start() <= slot.start());
        let mut next = self.state.clone();
        next.time_slots.insert(index, slot.clone());
        self.commit(next)?;
        tracing::info!(index, slot = %slot, "added time slot");
        Ok(index)
    }

    pub fn remove_time_slot(&mut self, index: usize) -> StoreResult<TimeSlot> {
        self.require_admin("remove_time_slot")?;
        let len = self.state.time_slots.len();
        if index >= len {
            return Err(StoreError::TimeSlotOutOfRange { index, len });
        }
        let mut next = self.state.clone();
        let removed = next.time_slots.remove(index);
        self.commit(next)?;
        tracing::info!(index, slot = %removed, "removed time slot");
        Ok(removed)
    }

    /// Swaps in a whole schedule, e.g. one imported from a file.
    pub fn replace_state(&mut self, state: ScheduleState) -> StoreResult<()> {
        self.require_admin("replace_state")?;
        validate_state(&state).map_err(|err| {
            tracing::warn!(%err, "imported schedule rejected");
            StoreError::InvalidState(err.to_string())
        })?;
        let classes = state.classes.len();
        self.commit(state)?;
        tracing::info!(classes, "replaced schedule");
        Ok(())
    }

    /// Restores the default timetable, keeping the selected day.
    pub fn reset_to_defaults(&mut self) -> StoreResult<()> {
        self.require_admin("reset_to_defaults")?;
        self.commit(ScheduleState::seeded_for(self.state.current_day))?;
        tracing::info!("schedule reset to defaults");
        Ok(())
    }

    fn require_admin(&self, operation: &'static str) -> StoreResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(operation, "rejected: no admin session");
            Err(StoreError::Unauthorized)
        }
    }

    fn fresh_class_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.state.find_class(&id).is_none() {
                return id;
            }
        }
    }

    /// Saves `next` and only then makes it current; a failed save leaves the
    /// store as it was.
    fn commit(&mut self, next: ScheduleState) -> StoreResult<()> {
        persist_state(self.storage.as_ref(), &next)?;
        self.state = next;
        Ok(())
    }
}

fn persist_state(storage: &dyn Storage, state: &ScheduleState) -> StoreResult<()> {
    persistence::save_json(storage, SCHEDULE_KEY, state).map_err(|err| {
        tracing::warn!(%err, "failed to persist schedule");
        StoreError::Persistence(err)
    })
}

fn not_found(id: &str) -> StoreError {
    tracing::warn!(id, "class not found");
    StoreError::ClassNotFound(id.to_string())
}
