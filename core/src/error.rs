use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Cell seeded more than once")]
    DuplicatePlacement,
    #[error("Unknown tier name")]
    UnknownTier,
    #[error("Malformed cell id, expected cell_<row>_<col>")]
    InvalidCellId,
    #[error("Game configuration could not be parsed")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
