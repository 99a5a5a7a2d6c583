pub mod assets;
pub mod audio;
pub mod background;
pub mod display;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod level_state;
pub mod particles;
pub mod screens;
pub mod settings;
pub mod state;
pub mod surface;

pub use error::GameError;
pub use settings::Settings;
pub use state::State;
