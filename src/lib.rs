pub mod aggregate;
pub mod badges;
pub mod insights;
pub mod models;
pub mod progress;
pub mod report;
pub mod snapshot;
pub mod status;
pub mod streaks;
