use chrono::Utc;
use log::{debug, error};

use crate::{
    DataRepository, DataService, DaysPerWeek, DeleteError, GenerateError, History,
    PersonalRecords, ReadError, RecordError, RecordedWorkout, RotationCursor, RotationRepository,
    RotationService, SNAPSHOT_VERSION, Schedule, SessionMinutes, Sets, Snapshot, SnapshotImport,
    SplitId, UpdateError, Workout, WorkoutEntry, WorkoutID, WorkoutRepository, WorkoutService,
    WorkoutTemplate,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
    ($func: expr, $action: literal, $entity: literal, $expected: pat) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $expected => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: RotationRepository> RotationService for Service<R> {
    fn get_rotation(&self) -> Result<RotationCursor, ReadError> {
        log_on_error!(self.repository.read_rotation(), "get", "rotation")
    }

    fn preview_next_split(&self, days: i64) -> Result<SplitId, ReadError> {
        Ok(self.get_rotation()?.split(&Schedule::for_days(days)))
    }

    fn reset_rotation(&self) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_rotation(RotationCursor::START),
            "reset",
            "rotation"
        )?;
        debug!("reset rotation");
        Ok(())
    }
}

impl<R: RotationRepository + WorkoutRepository> Service<R> {
    fn generate(&self, days: f64, minutes: f64) -> Result<WorkoutTemplate, GenerateError> {
        let days = DaysPerWeek::new(days)?;
        let minutes = SessionMinutes::new(minutes)?;
        let cursor = self.repository.read_rotation()?;
        let split = cursor.split(&days.schedule());
        self.repository.write_rotation(cursor.next())?;
        let template = WorkoutTemplate::new(WorkoutID::random(), split, minutes.sets());
        debug!(
            "generated workout {} ({split}, {} sets) at rotation position {cursor}",
            template.id, template.sets
        );
        Ok(template)
    }

    fn record(
        &self,
        id: WorkoutID,
        split: SplitId,
        sets: Sets,
        entries: &[WorkoutEntry],
    ) -> Result<RecordedWorkout, RecordError> {
        let workout = Workout::from_entries(id, Utc::now(), split, sets, entries)?;
        let mut history = self.repository.read_history()?;
        let mut personal_records = self.repository.read_personal_records()?;
        history
            .prepend(workout.clone())
            .map_err(|workout| RecordError::Conflict(workout.id))?;
        let improved_records = personal_records.fold(&workout);
        self.repository
            .write_workout_log(&history, &personal_records)?;
        debug!(
            "recorded workout {} improving {} personal records",
            workout.id,
            improved_records.len()
        );
        Ok(RecordedWorkout {
            workout,
            improved_records,
        })
    }

    fn delete(&self, id: &WorkoutID) -> Result<bool, DeleteError> {
        let mut history = self.repository.read_history()?;
        if !history.remove(id) {
            debug!("workout {id} not found");
            return Ok(false);
        }
        self.repository.write_history(&history)?;
        debug!("deleted workout {id}");
        Ok(true)
    }
}

impl<R: RotationRepository + WorkoutRepository> WorkoutService for Service<R> {
    fn generate_template(&self, days: f64, minutes: f64) -> Result<WorkoutTemplate, GenerateError> {
        log_on_error!(
            self.generate(days, minutes),
            "generate",
            "workout",
            GenerateError::InvalidInput(_)
        )
    }

    fn record_workout(
        &self,
        id: WorkoutID,
        split: SplitId,
        sets: Sets,
        entries: Vec<WorkoutEntry>,
    ) -> Result<RecordedWorkout, RecordError> {
        log_on_error!(
            self.record(id, split, sets, &entries),
            "record",
            "workout",
            RecordError::EmptySession | RecordError::NoData | RecordError::Conflict(_)
        )
    }

    fn get_history(&self) -> Result<History, ReadError> {
        log_on_error!(self.repository.read_history(), "get", "history")
    }

    fn delete_workout(&self, id: &WorkoutID) -> Result<bool, DeleteError> {
        log_on_error!(self.delete(id), "delete", "workout")
    }

    fn get_personal_records(&self) -> Result<PersonalRecords, ReadError> {
        log_on_error!(
            self.repository.read_personal_records(),
            "get",
            "personal records"
        )
    }
}

impl<R: RotationRepository + WorkoutRepository + DataRepository> DataService for Service<R> {
    fn export_snapshot(&self) -> Result<Snapshot, ReadError> {
        Ok(Snapshot {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at: Utc::now(),
            rotation: self.get_rotation()?,
            history: self.get_history()?,
            personal_records: self.get_personal_records()?,
        })
    }

    fn import_snapshot(&self, data: SnapshotImport) -> Result<(), UpdateError> {
        if data.is_empty() {
            debug!("nothing to import");
            return Ok(());
        }
        log_on_error!(self.repository.import_data(&data), "import", "data")?;
        debug!(
            "imported{}{}{}",
            if data.rotation.is_some() { " rotation" } else { "" },
            if data.history.is_some() { " history" } else { "" },
            if data.personal_records.is_some() { " personal records" } else { "" },
        );
        Ok(())
    }

    fn clear_all(&self) -> Result<(), DeleteError> {
        log_on_error!(self.repository.clear_data(), "clear", "data")?;
        debug!("cleared all data");
        Ok(())
    }
}
