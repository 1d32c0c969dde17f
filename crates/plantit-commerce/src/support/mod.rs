//! Support chat with the tech team and partner nurseries.

mod chat;

pub use chat::{ChatMessage, ChatSession, Sender, SupportChannel, GREETING};
