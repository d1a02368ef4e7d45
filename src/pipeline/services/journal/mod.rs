pub mod color_journal;

pub use color_journal::{ColorJournal, load_placements, read_dump, write_dump, write_log};
