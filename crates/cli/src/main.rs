//! firstrep - beginner workout generator and tracker

#![warn(clippy::pedantic)]

use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use firstrep_app::{
    self as app, OngoingWorkout, OngoingWorkoutService, SettingsService, WeightUnit,
    log::Service as _,
};
use firstrep_domain::{self as domain, DataService, RotationService, WorkoutService};
use firstrep_storage::{Backend, LocalStorage, Store, snapshot};
use log::{info, warn};

mod render;

#[derive(Parser)]
#[command(name = "firstrep")]
#[command(
    version,
    about = "Beginner gym workout generator with history and personal records"
)]
struct Cli {
    /// Directory the data is stored in
    #[arg(
        long,
        env = "FIRSTREP_DATA_DIR",
        default_value = "firstrep-data",
        global = true
    )]
    data_dir: PathBuf,

    /// Print more log messages (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the split the next workout will use
    Next {
        /// Training days per week (defaults to the configured value)
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Generate the next workout and advance the rotation
    Generate {
        /// Training days per week, 1 to 6
        #[arg(short, long, allow_negative_numbers = true)]
        days: Option<f64>,

        /// Available minutes per session, 20 to 180
        #[arg(short, long, allow_negative_numbers = true)]
        minutes: Option<f64>,
    },

    /// Save the generated workout with the entered values
    Record {
        /// Values for one exercise as "NAME=WEIGHT,REPS", either value may be left empty
        #[arg(short, long = "entry", value_name = "NAME=WEIGHT,REPS")]
        entries: Vec<String>,
    },

    /// Discard the generated workout without saving it
    Discard,

    /// List saved workouts, newest first
    History,

    /// Delete a saved workout
    Delete {
        /// Workout ID as shown in the history
        id: String,
    },

    /// List personal records
    Prs,

    /// Restart the rotation at the first split
    ResetRotation,

    /// Delete all history, personal records and the rotation
    ClearAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Write all data to a JSON file
    Export {
        /// Target file
        #[arg(default_value = snapshot::FILE_NAME)]
        path: PathBuf,
    },

    /// Restore data from an exported JSON file
    Import {
        /// Exported file
        path: PathBuf,
    },

    /// Show or change the settings
    Settings {
        /// Default training days per week
        #[arg(short, long)]
        days: Option<f64>,

        /// Default minutes per session
        #[arg(short, long)]
        minutes: Option<f64>,

        /// Unit weights are displayed in
        #[arg(short, long)]
        unit: Option<Unit>,
    },

    /// Show recent log messages
    Log,
}

#[derive(ValueEnum, Clone, Copy)]
enum Unit {
    Lbs,
    Kg,
}

impl From<Unit> for WeightUnit {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Lbs => WeightUnit::Pounds,
            Unit::Kg => WeightUnit::Kilograms,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let backend = LocalStorage::new(&cli.data_dir);
    let _ = app::log::init(
        Arc::new(Mutex::new(Store::new(backend.clone()))),
        app::log::console_level(cli.verbose),
    );

    println!("{}", run(cli.command, &Store::new(backend))?);

    Ok(())
}

/// Executes a command. Commands changing several values store them together.
fn run<B: Backend>(command: Command, store: &Store<B>) -> Result<String> {
    let service = domain::Service::new(store.clone());
    let ui = app::Service::new(store.clone());

    match command {
        Command::Next { days } => {
            let days = match days {
                Some(days) => days,
                None => settings(&ui)?.days_per_week.into(),
            };
            Ok(render::rotation_hint(service.preview_next_split(days)?))
        }

        Command::Generate { days, minutes } => {
            let settings = settings(&ui)?;
            let template = store.transaction(|| -> Result<_> {
                let template = service.generate_template(
                    days.unwrap_or(settings.days_per_week.into()),
                    minutes.unwrap_or(settings.session_minutes.into()),
                )?;
                let ongoing_workout = ui.get_ongoing_workout().map_err(anyhow::Error::msg)?;
                if let Some(ongoing_workout) = ongoing_workout {
                    warn!("discarding unsaved workout {}", ongoing_workout.workout_id);
                }
                ui.set_ongoing_workout(Some(OngoingWorkout::new(&template)))
                    .map_err(anyhow::Error::msg)?;
                Ok(template)
            })?;
            info!("generated {} workout {}", template.split, template.id);
            Ok(format!(
                "Workout generated. Rotation advanced.\n\n{}",
                render::workout_template(&template)
            ))
        }

        Command::Record { entries } => {
            let Some(ongoing_workout) = ui.get_ongoing_workout().map_err(anyhow::Error::msg)?
            else {
                bail!(domain::RecordError::EmptySession);
            };
            let template = ongoing_workout.template()?;
            let entries = workout_entries(&template, &entries)?;
            let recorded = store.transaction(|| -> Result<_> {
                let recorded = service.record_workout(
                    template.id.clone(),
                    template.split,
                    template.sets,
                    entries,
                )?;
                ui.set_ongoing_workout(None).map_err(anyhow::Error::msg)?;
                Ok(recorded)
            })?;
            info!("recorded workout {}", recorded.workout.id);

            let unit = settings(&ui)?.weight_unit;
            let mut output = "Saved. History and PRs updated.".to_string();
            for (name, pr) in &recorded.improved_records {
                output.push_str(&format!(
                    "\nNew PR: {name} {}",
                    render::personal_record(pr, unit)
                ));
            }
            Ok(output)
        }

        Command::Discard => {
            let ongoing_workout = ui.get_ongoing_workout().map_err(anyhow::Error::msg)?;
            if ongoing_workout.is_none() {
                return Ok("No workout to clear.".to_string());
            }
            ui.set_ongoing_workout(None).map_err(anyhow::Error::msg)?;
            Ok("Workout cleared (not saved).".to_string())
        }

        Command::History => Ok(render::history(
            &service.get_history()?,
            settings(&ui)?.weight_unit,
        )),

        Command::Delete { id } => {
            if service.delete_workout(&id.as_str().into())? {
                info!("deleted workout {id}");
                Ok("Workout deleted. (PRs are not recalculated automatically.)".to_string())
            } else {
                Ok(format!("No workout with ID {id}."))
            }
        }

        Command::Prs => Ok(render::personal_records(
            &service.get_personal_records()?,
            settings(&ui)?.weight_unit,
        )),

        Command::ResetRotation => {
            service.reset_rotation()?;
            let split = service.preview_next_split(settings(&ui)?.days_per_week.into())?;
            Ok(format!(
                "Rotation reset to the start.\n{}",
                render::rotation_hint(split)
            ))
        }

        Command::ClearAll { yes } => {
            if !yes {
                bail!(
                    "This will delete ALL FirstRep history, PRs, and rotation. \
                     Pass --yes to continue."
                );
            }
            store.transaction(|| -> Result<_> {
                service.clear_all()?;
                ui.set_ongoing_workout(None).map_err(anyhow::Error::msg)
            })?;
            info!("cleared all data");
            Ok("All data cleared.".to_string())
        }

        Command::Export { path } => {
            let document = snapshot::to_json(&service.export_snapshot()?)?;
            fs::write(&path, document)
                .with_context(|| format!("Export failed: could not write {}", path.display()))?;
            Ok(format!("Export written to {}.", path.display()))
        }

        Command::Import { path } => {
            let document = fs::read_to_string(&path)
                .with_context(|| format!("Import failed: could not read {}", path.display()))?;
            let data = snapshot::from_json(&document).with_context(|| {
                format!(
                    "Import failed. Please upload a valid {} file.",
                    snapshot::FILE_NAME
                )
            })?;
            service.import_snapshot(data)?;
            info!("imported {}", path.display());
            Ok("Import complete.".to_string())
        }

        Command::Settings {
            days,
            minutes,
            unit,
        } => {
            let mut settings = settings(&ui)?;
            if days.is_some() || minutes.is_some() || unit.is_some() {
                settings = settings.update(days, minutes, unit.map(WeightUnit::from))?;
                ui.set_settings(settings).map_err(anyhow::Error::msg)?;
            }
            Ok(render::settings(&settings))
        }

        Command::Log => Ok(render::log_entries(&ui.get_log_entries()?)),
    }
}

fn settings(ui: &impl SettingsService) -> Result<app::Settings> {
    ui.get_settings().map_err(anyhow::Error::msg)
}

/// Fills the template's exercises with the values given as `NAME=WEIGHT,REPS`.
fn workout_entries(
    template: &domain::WorkoutTemplate,
    values: &[String],
) -> Result<Vec<domain::WorkoutEntry>> {
    let mut entries = template.blank_entries();
    for value in values {
        let Some((name, measurements)) = value.split_once('=') else {
            bail!("Invalid entry \"{value}\", expected NAME=WEIGHT,REPS");
        };
        let name = name.trim();
        let (weight, reps) = measurements.split_once(',').unwrap_or((measurements, ""));
        let Some(entry) = entries
            .iter_mut()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
        else {
            bail!(
                "{name} is not part of the {} workout",
                template.split.as_str().to_uppercase()
            );
        };
        entry.weight = weight.to_string();
        entry.reps = reps.to_string();
    }
    Ok(entries)
}
