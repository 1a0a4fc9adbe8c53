pub mod change_detector;
pub mod history_store;
pub mod poll_scheduler;
