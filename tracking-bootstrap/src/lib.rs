pub mod cli;
pub mod context;
pub mod lifecycle;

pub use cli::{parse_port, PortError};
pub use context::AppContext;
pub use lifecycle::{build_router_with_layers, run_standalone};
