pub mod mistral;
pub mod traits;

pub use mistral::MistralClient;
pub use traits::{CompletionClient, CompletionParams};
