//! Runtime services behind the workspace effects

pub mod dispatcher;
pub mod export;
pub mod playback;

pub use dispatcher::Dispatcher;
pub use export::save_download;
pub use playback::{AudioPlayer, CommandPlayer};
