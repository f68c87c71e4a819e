mod app;
mod orch;
#[cfg(test)]
mod orch_spec;
mod services;
mod synthesis;
mod template_engine;

pub use app::*;
pub use orch::*;
pub use services::*;
pub use synthesis::*;
pub use template_engine::*;
