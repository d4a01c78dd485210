pub mod gradebook;
pub mod report;
pub mod storage;
