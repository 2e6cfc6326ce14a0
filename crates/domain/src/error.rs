use crate::{InputError, WorkoutID};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxedError),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxedError),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxedError),
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

impl From<UpdateError> for DeleteError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Storage(storage) => DeleteError::Storage(storage),
            UpdateError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxedError),
}

impl From<ReadError> for GenerateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => GenerateError::Storage(storage),
            ReadError::Other(other) => GenerateError::Other(other),
        }
    }
}

impl From<UpdateError> for GenerateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Storage(storage) => GenerateError::Storage(storage),
            UpdateError::Other(other) => GenerateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("No workout to save. Generate a workout first.")]
    EmptySession,
    #[error("Enter weight/reps for at least one exercise before saving.")]
    NoData,
    #[error("Workout {0} has already been saved.")]
    Conflict(WorkoutID),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxedError),
}

impl From<ReadError> for RecordError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => RecordError::Storage(storage),
            ReadError::Other(other) => RecordError::Other(other),
        }
    }
}

impl From<UpdateError> for RecordError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Storage(storage) => RecordError::Storage(storage),
            UpdateError::Other(other) => RecordError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] BoxedError),
}
