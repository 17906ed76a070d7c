pub mod auth;
pub mod calendar;
pub mod class_group;
pub mod class_session;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub(crate) mod seed;
pub mod state;
pub mod store;
pub mod time_slot;

pub use auth::{AdminSession, CredentialVerifier, FixedCredentials};
pub use calendar::DayOfWeek;
pub use class_group::{ClassColors, ClassGroup};
pub use class_session::{ClassSession, ClassSessionPatch, NewClassSession};
pub use config::{PlannerConfig, StorageBackend};
pub use persistence::{
    FileStorage, MemoryStorage, PersistenceError, Storage, load_state_from_json,
    save_state_to_json, save_timetable_to_csv,
};
#[cfg(feature = "sqlite")]
pub use persistence::SqliteStorage;
pub use state::ScheduleState;
pub use store::{ScheduleStore, StoreError, StoreResult};
pub use time_slot::{ClockTime, TimeFormatError, TimeSlot, TimeSlotDraft, TimeSlotPatch};
