mod openai;
mod utils;

pub use openai::OpenAIProvider;
