//! Drivers that run the environment: headless against a policy, or in the
//! terminal against a policy or the keyboard

pub mod headless;
pub mod human;
pub mod terminal;
pub mod watch;

pub use headless::{HeadlessConfig, run_policy_loop};
pub use human::HumanMode;
pub use watch::{TickSpeed, WatchMode};
