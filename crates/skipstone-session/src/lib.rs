pub mod config;
pub mod hud;
pub mod session;
pub mod state;

pub use config::SessionConfig;
pub use session::{RenderPlacement, SessionEvent, SessionState, SkipSession};
pub use state::RockState;
