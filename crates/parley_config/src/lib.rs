mod api_key;
mod env;
mod error;
mod http_config;
mod temperature;
mod tool_config;

pub use api_key::*;
pub use env::*;
pub use error::*;
pub use http_config::*;
pub use temperature::*;
pub use tool_config::*;
