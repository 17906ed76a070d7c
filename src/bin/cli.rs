use class_planner::{
    ClassGroup, ClassSessionPatch, ClockTime, DayOfWeek, NewClassSession, PlannerConfig,
    ScheduleState, ScheduleStore, TimeSlotDraft, TimeSlotPatch, load_state_from_json,
    save_state_to_json, save_timetable_to_csv,
};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &widths, headers.iter().copied());
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for (ci, cell) in cells.enumerate() {
        out.push(' ');
        out.push_str(cell);
        let pad = widths[ci].saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
}

fn render_day(state: &ScheduleState, day: DayOfWeek) -> String {
    let mut rows = Vec::new();
    for group in ClassGroup::ALL {
        for class in state.classes_for(day, group) {
            rows.push(vec![
                class.id.clone(),
                group.to_string(),
                class.time_slot.clone(),
                class.teacher.clone(),
                class.subject.clone(),
                class.room.clone(),
            ]);
        }
    }
    let mut out = format!("{} ({})\n", day.display_name(), day);
    if rows.is_empty() {
        out.push_str("No classes scheduled.\n");
    } else {
        out.push_str(&render_table(
            &["id", "group", "time", "teacher", "subject", "room"],
            &rows,
        ));
    }
    out
}

fn render_slots(state: &ScheduleState) -> String {
    let rows: Vec<Vec<String>> = state
        .time_slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            vec![
                index.to_string(),
                slot.start().to_string(),
                slot.end().to_string(),
                slot.break_label().unwrap_or_default().to_string(),
            ]
        })
        .collect();
    render_table(&["#", "start", "end", "break"], &rows)
}

fn render_groups(state: &ScheduleState) -> String {
    let rows: Vec<Vec<String>> = state
        .class_colors
        .iter()
        .map(|(group, color)| vec![group.to_string(), color.to_string()])
        .collect();
    render_table(&["group", "color"], &rows)
}

fn print_days(state: &ScheduleState) {
    for day in DayOfWeek::ALL {
        let marker = if day == state.current_day { '*' } else { ' ' };
        println!("{marker} {:<8} {}", day.tag(), day.display_name());
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show [day]                         Show classes for a day (default: current day)\n  days                               List days, current one marked with *\n  day <day>                          Select the current day\n  groups                             List class groups and their colors\n  slots                              List time slots with their index\n  login <username> <password>        Start an admin session\n  logout                             End the admin session\n  whoami                             Show the current session\n  add <group> <day> <start> <end>    Add a class (e.g. add 1D segunda 07:30 08:20)\n  set <id> <field> <value...>        Update teacher|subject|room|color|group|day\n  set <id> slot <start> <end>        Move a class to another time\n  remove <id>                        Remove a class\n  color <group> <color>              Change a class group's color\n  slot add <start> <end> [label...]  Add a time slot (a label makes it a break)\n  slot set <index> <start> <end>     Change a slot's times\n  slot break <index> [label...]      Turn a slot into a break\n  slot regular <index>               Turn a break into a teaching slot\n  slot remove <index>                Remove a time slot\n  save <json|csv> <path>             Export the schedule\n  load json <path>                   Import a schedule\n  reset                              Restore the default timetable\n  quit|exit                          Exit"
    );
}

fn parse_index(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.parse::<usize>().ok())
}

fn parse_range(start: &str, end: &str) -> Result<String, String> {
    let start: ClockTime = start.parse().map_err(|e| format!("{e}"))?;
    let end: ClockTime = end.parse().map_err(|e| format!("{e}"))?;
    Ok(format!("{start} - {end}"))
}

fn handle_slot(store: &mut ScheduleStore, parts: &mut std::str::SplitWhitespace<'_>) {
    match parts.next() {
        Some("add") => {
            let start = parts.next();
            let end = parts.next();
            let label: Vec<&str> = parts.collect();
            match (start, end) {
                (Some(start), Some(end)) => {
                    let draft = if label.is_empty() {
                        TimeSlotDraft::regular(start, end)
                    } else {
                        TimeSlotDraft::break_slot(start, end, label.join(" "))
                    };
                    match store.add_time_slot(draft) {
                        Ok(index) => {
                            println!("Added time slot at index {index}.");
                            println!("{}", render_slots(store.state()));
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
                _ => println!("Usage: slot add <start> <end> [label...]"),
            }
        }
        Some("set") => {
            let index = parse_index(parts.next());
            let start = parts.next();
            let end = parts.next();
            match (index, start, end) {
                (Some(index), Some(start), Some(end)) => {
                    let patch = TimeSlotPatch {
                        start: Some(start.to_string()),
                        end: Some(end.to_string()),
                        ..TimeSlotPatch::default()
                    };
                    match store.update_time_slot(index, &patch) {
                        Ok(slot) => println!("Time slot {index} is now {slot}."),
                        Err(e) => println!("Error: {e}"),
                    }
                }
                _ => println!("Usage: slot set <index> <start> <end>"),
            }
        }
        Some("break") => match parse_index(parts.next()) {
            Some(index) => {
                let label: Vec<&str> = parts.collect();
                let patch = TimeSlotPatch {
                    is_break: Some(true),
                    break_name: (!label.is_empty()).then(|| label.join(" ")),
                    ..TimeSlotPatch::default()
                };
                match store.update_time_slot(index, &patch) {
                    Ok(slot) => println!("Time slot {index} is now {slot}."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            None => println!("Usage: slot break <index> [label...]"),
        },
        Some("regular") => match parse_index(parts.next()) {
            Some(index) => {
                let patch = TimeSlotPatch {
                    is_break: Some(false),
                    ..TimeSlotPatch::default()
                };
                match store.update_time_slot(index, &patch) {
                    Ok(slot) => println!("Time slot {index} is now {slot}."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            None => println!("Usage: slot regular <index>"),
        },
        Some("remove") => match parse_index(parts.next()) {
            Some(index) => match store.remove_time_slot(index) {
                Ok(slot) => println!("Removed time slot {slot}."),
                Err(e) => println!("Error: {e}"),
            },
            None => println!("Usage: slot remove <index>"),
        },
        Some(other) => {
            println!("Unknown slot command '{other}'.");
            println!("Usage: slot add|set|break|regular|remove ...");
        }
        None => println!("{}", render_slots(store.state())),
    }
}

fn handle_set(store: &mut ScheduleStore, parts: &mut std::str::SplitWhitespace<'_>) {
    let (Some(id), Some(field)) = (parts.next(), parts.next()) else {
        println!("Usage: set <id> <field> <value...>");
        return;
    };
    let rest: Vec<&str> = parts.collect();
    let value = rest.join(" ");
    let mut patch = ClassSessionPatch::default();
    match field {
        "teacher" => patch.teacher = Some(value),
        "subject" => patch.subject = Some(value),
        "room" => patch.room = Some(value),
        "color" if !value.is_empty() => patch.color = Some(value),
        "group" => match value.parse::<ClassGroup>() {
            Ok(group) => patch.class_group = Some(group),
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        },
        "day" => match value.parse::<DayOfWeek>() {
            Ok(day) => patch.day = Some(day),
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        },
        "slot" => match rest.as_slice() {
            [start, end] => match parse_range(start, end) {
                Ok(label) => patch.time_slot = Some(label),
                Err(e) => {
                    println!("Error: {e}");
                    return;
                }
            },
            _ => {
                println!("Usage: set <id> slot <start> <end>");
                return;
            }
        },
        _ => {
            println!("Usage: set <id> teacher|subject|room|color|group|day|slot <value...>");
            return;
        }
    }
    match store.update_class(id, &patch) {
        Ok(class) => println!(
            "Class {} updated: {} {} {} {} {}.",
            class.id, class.class_group, class.day, class.time_slot, class.teacher, class.subject
        ),
        Err(e) => println!("Error: {e}"),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "class_planner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = match PlannerConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let storage = match config.open_storage() {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Cannot open storage: {e}");
            std::process::exit(2);
        }
    };
    let mut store = ScheduleStore::open(storage, config.credentials());

    println!("Class Planner (CLI) - type 'help' for commands\n");
    println!("{}", render_day(store.state(), store.state().current_day));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => match parts.next() {
                Some(raw) => match raw.parse::<DayOfWeek>() {
                    Ok(day) => println!("{}", render_day(store.state(), day)),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("{}", render_day(store.state(), store.state().current_day)),
            },
            "days" => print_days(store.state()),
            "day" => match parts.next().map(str::parse::<DayOfWeek>) {
                Some(Ok(day)) => match store.set_current_day(day) {
                    Ok(()) => println!("{}", render_day(store.state(), day)),
                    Err(e) => println!("Error: {e}"),
                },
                Some(Err(e)) => println!("Error: {e}"),
                None => println!("Usage: day <day>"),
            },
            "groups" => println!("{}", render_groups(store.state())),
            "slots" => println!("{}", render_slots(store.state())),
            "login" => match (parts.next(), parts.next()) {
                (Some(username), Some(password)) => match store.login(username, password) {
                    Ok(true) => println!("Logged in as {username}."),
                    Ok(false) => println!("Invalid credentials."),
                    Err(e) => println!("Error: {e}"),
                },
                _ => println!("Usage: login <username> <password>"),
            },
            "logout" => match store.logout() {
                Ok(()) => println!("Logged out."),
                Err(e) => println!("Error: {e}"),
            },
            "whoami" => match store.user() {
                Some(user) => println!("{} (admin: {})", user.username, user.is_admin),
                None => println!("anonymous (read-only)"),
            },
            "add" => {
                let group = parts.next().map(str::parse::<ClassGroup>);
                let day = parts.next().map(str::parse::<DayOfWeek>);
                let start = parts.next();
                let end = parts.next();
                match (group, day, start, end) {
                    (Some(Ok(group)), Some(Ok(day)), Some(start), Some(end)) => {
                        let label = match parse_range(start, end) {
                            Ok(label) => label,
                            Err(e) => {
                                println!("Error: {e}");
                                continue;
                            }
                        };
                        match store.add_class(NewClassSession::new(group, day, label)) {
                            Ok(class) => println!("Added class {}.", class.id),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    (Some(Err(e)), _, _, _) => println!("Error: {e}"),
                    (_, Some(Err(e)), _, _) => println!("Error: {e}"),
                    _ => println!("Usage: add <group> <day> <start> <end>"),
                }
            }
            "set" => handle_set(&mut store, &mut parts),
            "remove" => match parts.next() {
                Some(id) => match store.remove_class(id) {
                    Ok(class) => println!("Removed class {}.", class.id),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: remove <id>"),
            },
            "color" => match (parts.next().map(str::parse::<ClassGroup>), parts.next()) {
                (Some(Ok(group)), Some(color)) => match store.update_class_color(group, color) {
                    Ok(()) => println!("Color of {group} set to {color}."),
                    Err(e) => println!("Error: {e}"),
                },
                (Some(Err(e)), _) => println!("Error: {e}"),
                _ => println!("Usage: color <group> <color>"),
            },
            "slot" => handle_slot(&mut store, &mut parts),
            "save" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match save_state_to_json(store.state(), path) {
                    Ok(()) => println!("Schedule saved to {path}."),
                    Err(e) => println!("Error saving schedule: {e}"),
                },
                (Some("csv"), Some(path)) => match save_timetable_to_csv(store.state(), path) {
                    Ok(()) => println!("Timetable saved to {path}."),
                    Err(e) => println!("Error saving timetable: {e}"),
                },
                _ => println!("Usage: save <json|csv> <path>"),
            },
            "load" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match load_state_from_json(path) {
                    Ok(loaded) => match store.replace_state(loaded) {
                        Ok(()) => {
                            println!("Schedule loaded from {path}.");
                            println!("{}", render_day(store.state(), store.state().current_day));
                        }
                        Err(e) => println!("Error: {e}"),
                    },
                    Err(e) => println!("Error loading schedule: {e}"),
                },
                _ => println!("Usage: load json <path>"),
            },
            "reset" => match store.reset_to_defaults() {
                Ok(()) => println!("Schedule reset to defaults."),
                Err(e) => println!("Error: {e}"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
