//! Tabular layer: nullable frames, CSV I/O, and sentinel-row classification

mod csv_io;
mod frame;
mod row;

pub use csv_io::{read_frame, write_frame, TableError};
pub use frame::{Cell, TableFrame};
pub use row::{
    ClassifiedTable, EdgeRow, NodeRow, SourceSpec, END_COLUMN, ID_COLUMN, LABEL_COLUMN,
    START_COLUMN, TYPE_COLUMN,
};
