use crate::calendar::DayOfWeek;
use crate::class_group::ClassGroup;
use serde::{Deserialize, Serialize};

/// One lesson on the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub class_group: ClassGroup,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub room: String,
    /// `"HH:MM - HH:MM"`; not tied to an entry of the slot sequence.
    pub time_slot: String,
    pub day: DayOfWeek,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ClassSession {
    pub fn new(
        id: impl Into<String>,
        class_group: ClassGroup,
        day: DayOfWeek,
        time_slot: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_group,
            teacher: String::new(),
            subject: String::new(),
            room: String::new(),
            time_slot: time_slot.into(),
            day,
            color: None,
        }
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Start portion of the slot label, used for ordering within a day.
    pub fn start_label(&self) -> &str {
        self.time_slot
            .split(" - ")
            .next()
            .unwrap_or(self.time_slot.as_str())
            .trim()
    }

    pub fn apply(&mut self, patch: &ClassSessionPatch) {
        if let Some(group) = patch.class_group {
            self.class_group = group;
        }
        if let Some(teacher) = &patch.teacher {
            self.teacher = teacher.clone();
        }
        if let Some(subject) = &patch.subject {
            self.subject = subject.clone();
        }
        if let Some(room) = &patch.room {
            self.room = room.clone();
        }
        if let Some(time_slot) = &patch.time_slot {
            self.time_slot = time_slot.clone();
        }
        if let Some(day) = patch.day {
            self.day = day;
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
    }
}

/// A session that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassSession {
    pub class_group: ClassGroup,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub room: String,
    pub time_slot: String,
    pub day: DayOfWeek,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewClassSession {
    pub fn new(class_group: ClassGroup, day: DayOfWeek, time_slot: impl Into<String>) -> Self {
        Self {
            class_group,
            teacher: String::new(),
            subject: String::new(),
            room: String::new(),
            time_slot: time_slot.into(),
            day,
            color: None,
        }
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn into_session(self, id: String, resolved_color: String) -> ClassSession {
        ClassSession {
            id,
            class_group: self.class_group,
            teacher: self.teacher,
            subject: self.subject,
            room: self.room,
            time_slot: self.time_slot,
            day: self.day,
            color: Some(resolved_color),
        }
    }
}

/// Fields to merge into an existing session. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_group: Option<ClassGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<DayOfWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ClassSessionPatch {
    pub fn is_empty(&self) -> bool {
        *self == ClassSessionPatch::default()
    }
}
