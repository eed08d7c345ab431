//! LLM 层：聊天客户端抽象与实现（OpenAI 兼容 / Mock）

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockChatClient;
pub use openai::OpenAiChatClient;
pub use traits::ChatClient;
