/// Integration tests running against SQLite files and the MCP request handler

mod mcp_tests;
mod storage_tests;
