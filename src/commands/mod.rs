pub mod analyze;
pub mod pull;
pub mod serve;
pub mod status;
pub mod watch;
