// Domain entities

pub mod config;
pub mod event;
pub mod stream;

pub use config::*;
pub use event::*;
pub use stream::*;
