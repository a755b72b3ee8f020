pub mod responder;
pub mod session;

pub use responder::{respond, select_topic, Topic};
pub use session::{ChatError, ChatMessage, ChatSession, ReplySource, Role};
