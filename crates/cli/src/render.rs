use std::{collections::VecDeque, fmt::Write};

use chrono::{DateTime, Local, TimeZone};
use firstrep_app::{Settings, WeightUnit, log};
use firstrep_domain as domain;

const NONE: &str = "—";

pub fn rotation_hint(split: domain::SplitId) -> String {
    format!("Next in rotation: {}", split_name(split))
}

pub fn workout_template(template: &domain::WorkoutTemplate) -> String {
    let mut output = format!("Today's Workout ({})\n", split_name(template.split));
    for name in &template.exercises {
        let _ = writeln!(output, "  {name}: {} sets × 8–12 reps", template.sets);
    }
    let _ = write!(
        output,
        "Enter weight + reps for at least one exercise, then record.\nWorkout ID: {}",
        template.id
    );
    output
}

pub fn history(history: &domain::History, unit: WeightUnit) -> String {
    if history.is_empty() {
        return "No workouts saved yet.".to_string();
    }
    history
        .iter()
        .map(|workout| {
            let mut output = format!(
                "{} — {}\nWorkout ID: {}",
                date(&workout.created_at.with_timezone(&Local)),
                split_name(workout.split),
                workout.id
            );
            for exercise in &workout.exercises {
                let _ = write!(output, "\n  {}", exercise_line(exercise, unit));
            }
            output
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn personal_records(personal_records: &domain::PersonalRecords, unit: WeightUnit) -> String {
    if personal_records.is_empty() {
        return "No PRs yet. Save workouts with weight + reps.".to_string();
    }
    personal_records
        .iter()
        .map(|(name, pr)| format!("{name}\n  Best: {}", personal_record(pr, unit)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn personal_record(pr: &domain::PersonalRecord, unit: WeightUnit) -> String {
    format!("{} {unit} × {} reps", pr.weight, pr.reps)
}

pub fn settings(settings: &Settings) -> String {
    format!(
        "Days per week: {}\nSession minutes: {}\nWeight unit: {}",
        settings.days_per_week, settings.session_minutes, settings.weight_unit
    )
}

pub fn log_entries(entries: &VecDeque<log::Entry>) -> String {
    if entries.is_empty() {
        return "No log entries.".to_string();
    }
    entries
        .iter()
        .map(|entry| format!("{} {:5} {}", entry.time, entry.level, entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn exercise_line(exercise: &domain::Exercise, unit: WeightUnit) -> String {
    let weight = exercise
        .weight
        .map_or_else(|| NONE.to_string(), |weight| format!("{weight} {unit}"));
    let reps = exercise
        .reps
        .map_or_else(|| NONE.to_string(), |reps| format!("{reps} reps"));
    format!("{}: {weight} × {reps} ({} sets)", exercise.name, exercise.sets)
}

fn split_name(split: domain::SplitId) -> String {
    split.as_str().to_uppercase()
}

fn date<Tz: TimeZone>(date_time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date_time.format("%b %-d, %Y").to_string()
}
