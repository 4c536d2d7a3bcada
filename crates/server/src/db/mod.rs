pub mod analysis_history;
pub mod pool;
pub mod users;
