//! Loading and saving quote history.

pub mod io;

pub use io::{read_quotes, read_quotes_from_reader, write_quotes, write_quotes_to_writer};
