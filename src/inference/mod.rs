pub mod exchange;
pub mod provider;
pub mod providers;
pub mod types;

pub use exchange::ExchangeClient;
pub use provider::{CompletionProvider, GenerationRequest, ProviderError};
pub use providers::GeminiProvider;
pub use types::{Conversation, Message, Role};
