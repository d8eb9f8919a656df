pub mod detect;
pub mod diff_output;
pub mod migrate;
pub mod steps;

// Re-export all command functions
pub use detect::cmd_detect;
pub use migrate::{cmd_migrate, expand_paths, output_path};
pub use steps::cmd_steps;
