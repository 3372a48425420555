/// MCP transport for the todo tools
///
/// JSON-RPC framing lives in `protocol`; request dispatch and the stdio
/// loop live in `server`.

pub mod protocol;
pub mod server;

pub use server::McpServer;
