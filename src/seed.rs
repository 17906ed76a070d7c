use crate::calendar::DayOfWeek::{self, Quarta, Quinta, Segunda, Terca};
use crate::class_group::ClassGroup::{self, *};
use crate::class_session::ClassSession;
use crate::time_slot::{TimeSlot, TimeSlotDraft};

const DEFAULT_SLOTS: [(&str, &str, Option<&str>); 12] = [
    ("07:30", "08:20", None),
    ("08:20", "09:10", None),
    ("09:10", "09:25", Some("Lanche")),
    ("09:25", "10:15", None),
    ("10:15", "11:05", None),
    ("11:05", "11:55", None),
    ("11:55", "13:25", Some("Almoço")),
    ("13:25", "14:15", None),
    ("14:15", "15:05", None),
    ("15:05", "15:20", Some("Lanche")),
    ("15:20", "16:10", None),
    ("16:10", "17:00", None),
];

type SeedRow = (&'static str, ClassGroup, &'static str, &'static str, &'static str, DayOfWeek);

#[rustfmt::skip]
const DEFAULT_CLASSES: &[SeedRow] = &[
    ("m1", Class1D, "", "", "07:30 - 08:20", Segunda),
    ("m2", Class1D, "", "", "08:20 - 09:10", Segunda),
    ("m3", Class1D, "Henrique", "Front-End", "10:15 - 11:05", Segunda),
    ("m4", Class1D, "Henrique", "Front-End", "11:05 - 11:55", Segunda),
    ("m5", Class2A, "Johnattan", "Back-End", "10:15 - 11:05", Segunda),
    ("m6", Class2A, "Johnattan", "Back-End", "11:05 - 11:55", Segunda),
    ("m7", Class2B, "Edgar", "Back-End", "10:15 - 11:05", Segunda),
    ("m8", Class2B, "Edgar", "Back-End", "11:05 - 11:55", Segunda),
    ("m9", Class2C, "Juliana", "Prát. Prof. 2", "10:15 - 11:05", Segunda),
    ("m10", Class2C, "Emily", "Framework", "11:05 - 11:55", Segunda),
    ("m11", Class3A, "Karla", "Proj. Integ 3", "13:25 - 14:15", Segunda),
    ("m12", Class3A, "Karla", "Proj. Integ 3", "14:15 - 15:05", Segunda),
    ("m13", Class3B, "Débora", "Proj. Integ 3", "13:25 - 14:15", Segunda),

    ("t1", Class1A, "Emily", "Tec. Log. Soc.", "10:15 - 11:05", Terca),
    ("t2", Class1A, "Emily", "UX/UI", "11:05 - 11:55", Terca),
    ("t3", Class1A, "Johnattan", "Front-End", "13:25 - 14:15", Terca),
    ("t4", Class1A, "Johnattan", "Front-End", "14:15 - 15:05", Terca),
    ("t5", Class1A, "Johnattan", "Front-End", "15:20 - 16:10", Terca),
    ("t6", Class1A, "Johnattan", "Front-End", "16:10 - 17:00", Terca),
    ("t7", Class1B, "Johnattan", "Front-End", "10:15 - 11:05", Terca),
    ("t8", Class1B, "Johnattan", "Front-End", "11:05 - 11:55", Terca),
    ("t9", Class1B, "Maurizio", "Front-End", "13:25 - 14:15", Terca),
    ("t10", Class1B, "Maurizio", "Front-End", "14:15 - 15:05", Terca),
    ("t11", Class1B, "Maurizio", "Front-End", "15:20 - 16:10", Terca),
    ("t12", Class1B, "Maurizio", "Front-End", "16:10 - 17:00", Terca),
    ("t13", Class1C, "Maurizio", "Front-End", "10:15 - 11:05", Terca),
    ("t14", Class1C, "Maurizio", "Front-End", "11:05 - 11:55", Terca),
    ("t15", Class1C, "Henrique", "Front-End", "13:25 - 14:15", Terca),
    ("t16", Class1C, "Henrique", "Front-End", "14:15 - 15:05", Terca),
    ("t17", Class1C, "Henrique", "Front-End", "15:20 - 16:10", Terca),
    ("t18", Class1C, "Henrique", "Front-End", "16:10 - 17:00", Terca),
    ("t19", Class1D, "Edgar", "Back-End", "10:15 - 11:05", Terca),
    ("t20", Class1D, "Edgar", "Back-End", "11:05 - 11:55", Terca),
    ("t21", Class2A, "Karla", "Proj. Integ 2", "13:25 - 14:15", Terca),
    ("t22", Class2A, "Karla", "Proj. Integ 2", "14:15 - 15:05", Terca),
    ("t23", Class2A, "Emily", "Framework", "15:20 - 16:10", Terca),
    ("t24", Class2A, "Emily", "Framework", "16:10 - 17:00", Terca),
    ("t25", Class2B, "Emily", "Framework", "13:25 - 14:15", Terca),
    ("t26", Class2B, "Emily", "Framework", "14:15 - 15:05", Terca),
    ("t27", Class2B, "Karla", "Prát. Prof 1", "15:20 - 16:10", Terca),
    ("t28", Class2B, "Karla", "Proj. Integ 2", "16:10 - 17:00", Terca),

    ("w1", Class1A, "Débora", "Proj. Integ 1", "09:25 - 10:15", Quarta),
    ("w2", Class1A, "Henrique", "Front-End", "11:05 - 11:55", Quarta),
    ("w3", Class1A, "Karla", "Prát. Prof 1", "13:25 - 14:15", Quarta),
    ("w4", Class1A, "Karla", "Prát. Prof 1", "14:15 - 15:05", Quarta),
    ("w5", Class1A, "Emily", "Tec. Log. Soc.", "15:20 - 16:10", Quarta),
    ("w6", Class1A, "Emily", "UX/UI", "16:10 - 17:00", Quarta),
    ("w7", Class1B, "Johnattan", "Back-End", "09:25 - 10:15", Quarta),
    ("w8", Class1B, "Henrique", "Front-End", "10:15 - 11:05", Quarta),
    ("w9", Class1B, "Johnattan", "Back-End", "11:05 - 11:55", Quarta),
    ("w10", Class1B, "Débora", "Proj. Integ 1", "13:25 - 14:15", Quarta),
    ("w11", Class1B, "Emily", "UX/UI", "14:15 - 15:05", Quarta),
    ("w12", Class1B, "Maurizio", "Front-End", "15:20 - 16:10", Quarta),
    ("w13", Class1B, "Maurizio", "Front-End", "16:10 - 17:00", Quarta),
    ("w14", Class1C, "Juliana", "Prát. Prof. 2", "09:25 - 10:15", Quarta),
    ("w15", Class1C, "Johnattan", "Back-End", "10:15 - 11:05", Quarta),
    ("w16", Class1C, "Débora", "Proj. Integ 2", "11:05 - 11:55", Quarta),
    ("w17", Class1C, "Henrique", "Front-End", "13:25 - 14:15", Quarta),
    ("w18", Class1C, "Henrique", "Front-End", "14:15 - 15:05", Quarta),
    ("w19", Class1C, "Henrique", "Front-End", "15:20 - 16:10", Quarta),
    ("w20", Class1C, "Débora", "Proj. Integ 1", "16:10 - 17:00", Quarta),
    ("w21", Class1D, "Edgar", "Back-End", "09:25 - 10:15", Quarta),
    ("w22", Class1D, "Débora", "Proj. Integ 2", "10:15 - 11:05", Quarta),
    ("w23", Class1D, "Edgar", "Back-End", "11:05 - 11:55", Quarta),
    ("w24", Class2A, "Edgar", "Back-End", "10:15 - 11:05", Quarta),
    ("w25", Class2A, "Johnattan", "Front-End", "13:25 - 14:15", Quarta),
    ("w26", Class2A, "Johnattan", "Front-End", "14:15 - 15:05", Quarta),
    ("w27", Class2A, "Johnattan", "Front-End", "15:20 - 16:10", Quarta),
    ("w28", Class2A, "Johnattan", "Front-End", "16:10 - 17:00", Quarta),
    ("w29", Class2B, "Maurizio", "Back-End", "13:25 - 14:15", Quarta),
    ("w30", Class2B, "Maurizio", "Back-End", "14:15 - 15:05", Quarta),
    ("w31", Class2B, "Karla", "Proj. Integ 2", "15:20 - 16:10", Quarta),
    ("w32", Class2B, "Edgar", "Back-End", "16:10 - 17:00", Quarta),

    ("th1", Class1A, "Juliana", "Prát. Prof. 1", "10:15 - 11:05", Quinta),
    ("th2", Class1A, "Juliana", "Prát. Prof. 1", "11:05 - 11:55", Quinta),
    ("th3", Class1A, "Henrique", "Front-End", "13:25 - 14:15", Quinta),
    ("th4", Class1B, "Débora", "Proj. Integ 2", "10:15 - 11:05", Quinta),
    ("th5", Class1B, "Karla", "Prát. Prof 1", "11:05 - 11:55", Quinta),
    ("th6", Class1B, "Maurizio", "Front-End", "13:25 - 14:15", Quinta),
    ("th7", Class1C, "Emily", "Framework", "10:15 - 11:05", Quinta),
    ("th8", Class1C, "Emily", "Framework", "11:05 - 11:55", Quinta),
    ("th9", Class1C, "Emily", "Tec. Log. Soc.", "13:25 - 14:15", Quinta),
    ("th10", Class1D, "Edgar", "Back-End", "10:15 - 11:05", Quinta),
    ("th11", Class1D, "Edgar", "Back-End", "11:05 - 11:55", Quinta),
    ("th12", Class2A, "Karla", "Prát. Prof 1", "13:25 - 14:15", Quinta),
    ("th13", Class2B, "Edgar", "Back-End", "13:25 - 14:15", Quinta),
];

pub fn default_time_slots() -> Vec<TimeSlot> {
    DEFAULT_SLOTS
        .iter()
        .filter_map(|(start, end, label)| {
            let draft = match label {
                Some(label) => TimeSlotDraft::break_slot(*start, *end, *label),
                None => TimeSlotDraft::regular(*start, *end),
            };
            TimeSlot::try_from(draft).ok()
        })
        .collect()
}

pub fn default_classes() -> Vec<ClassSession> {
    DEFAULT_CLASSES
        .iter()
        .map(|(id, group, teacher, subject, slot, day)| {
            ClassSession::new(*id, *group, *day, *slot)
                .with_teacher(*teacher)
                .with_subject(*subject)
        })
        .collect()
}
