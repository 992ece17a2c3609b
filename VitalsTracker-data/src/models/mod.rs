pub mod reading;

pub use reading::{StoredReading, StoredReadingType};
