// Analysis service: mode dispatch, gateway call, response normalization.
// All model calls go through llm_client::ChatGateway.

pub mod contract;
pub mod dispatch;
pub mod handlers;
pub mod mode;
pub mod normalize;
pub mod prompts;
pub mod service;
