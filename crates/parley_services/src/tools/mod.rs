mod arxiv;
mod tavily;
mod wikipedia;

pub use arxiv::Arxiv;
pub use tavily::Tavily;
pub use wikipedia::Wikipedia;
