mod session;
mod tool;

pub use session::{Message, Role, Session};
pub use tool::{FunctionCall, ToolCall, ToolDescriptor, ToolResult};
