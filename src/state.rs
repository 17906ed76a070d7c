use crate::calendar::DayOfWeek;
use crate::class_group::{ClassColors, ClassGroup};
use crate::class_session::ClassSession;
use crate::seed;
use crate::time_slot::TimeSlot;
use serde::{Deserialize, Serialize};

/// Everything the planner persists under the schedule record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub classes: Vec<ClassSession>,
    pub time_slots: Vec<TimeSlot>,
    pub class_colors: ClassColors,
    pub current_day: DayOfWeek,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ScheduleState {
    pub fn empty(current_day: DayOfWeek) -> Self {
        Self {
            classes: Vec::new(),
            time_slots: Vec::new(),
            class_colors: ClassColors::default(),
            current_day,
        }
    }

    /// Default timetable, opened on today's school day.
    pub fn seeded() -> Self {
        Self::seeded_for(DayOfWeek::today())
    }

    pub fn seeded_for(current_day: DayOfWeek) -> Self {
        Self {
            classes: seed::default_classes(),
            time_slots: seed::default_time_slots(),
            class_colors: ClassColors::default(),
            current_day,
        }
    }

    pub fn find_class(&self, id: &str) -> Option<&ClassSession> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn color_for(&self, group: ClassGroup) -> &str {
        self.class_colors.get(group)
    }

    pub fn classes_for_day(&self, day: DayOfWeek) -> Vec<&ClassSession> {
        self.classes.iter().filter(|class| class.day == day).collect()
    }

    /// Sessions of one group on one day, earliest first.
    ///
    /// Ordering compares the start portion of the slot label as text; ties
    /// keep insertion order.
    pub fn classes_for(&self, day: DayOfWeek, group: ClassGroup) -> Vec<&ClassSession> {
        let mut classes: Vec<&ClassSession> = self
            .classes
            .iter()
            .filter(|class| class.day == day && class.class_group == group)
            .collect();
        classes.sort_by(|a, b| a.start_label().cmp(b.start_label()));
        classes
    }

    pub fn teaching_slots(&self) -> Vec<&TimeSlot> {
        self.time_slots.iter().filter(|slot| !slot.is_break()).collect()
    }

    pub fn break_slots(&self) -> Vec<&TimeSlot> {
        self.time_slots.iter().filter(|slot| slot.is_break()).collect()
    }

    /// Labels offered when placing a new class.
    pub fn teaching_slot_labels(&self) -> Vec<String> {
        self.teaching_slots()
            .into_iter()
            .map(TimeSlot::range_label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_for_orders_by_start_label() {
        let mut state = ScheduleState::empty(DayOfWeek::Sexta);
        for (id, slot) in [("c", "13:25 - 14:15"), ("a", "07:30 - 08:20"), ("b", "09:25 - 10:15")] {
            state.classes.push(ClassSession::new(
                id,
                ClassGroup::Class3A,
                DayOfWeek::Sexta,
                slot,
            ));
        }
        let ids: Vec<&str> = state
            .classes_for(DayOfWeek::Sexta, ClassGroup::Class3A)
            .into_iter()
            .map(|class| class.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn slot_partition_covers_every_slot() {
        let state = ScheduleState::seeded_for(DayOfWeek::Segunda);
        assert_eq!(
            state.teaching_slots().len() + state.break_slots().len(),
            state.time_slots.len()
        );
        assert_eq!(state.break_slots().len(), 3);
    }
}
