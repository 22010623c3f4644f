//! Console commands.

mod clear;
mod fire;
mod recreate;
mod snap;

pub use clear::{ClearCommand, clear_command};
pub use fire::{FireCommand, fire_command};
pub use recreate::{RecreateCommand, recreate_command};
pub use snap::{SnapCommand, snap_command};
