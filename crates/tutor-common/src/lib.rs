pub mod error;
pub mod gemini;
pub mod ids;
pub mod json_file;
pub mod mcp_api;
