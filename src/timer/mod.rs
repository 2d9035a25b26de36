pub mod controller;
pub mod countdown;
pub mod generation;
pub mod notice;
pub mod state;

pub use controller::{ControlEvent, SessionController};
pub use countdown::CountdownOutcome;
pub use generation::{Generation, GenerationGuard};
pub use notice::{ChainAction, Notice};
pub use state::{Mode, Pacing, Session};
