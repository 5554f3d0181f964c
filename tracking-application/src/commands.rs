pub mod event_commands;
pub mod stream_commands;
