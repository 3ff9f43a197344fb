//! Error types for the HR API MCP implementation.
//!
//! `HrError` covers every failure a tool invocation can hit. None of these
//! variants cross the MCP boundary as protocol faults: the dispatcher renders
//! each one into an `"Error: ..."` text result, so the `Display` strings here
//! are exactly what the calling agent reads.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("HR API request failed: {0}")]
    UpstreamUnreachable(String),

    #[error("HR API request failed with status {status}")]
    UpstreamRejected { status: u16 },

    #[error("HR API returned an unparseable response: {0}")]
    UpstreamMalformedResponse(String),
}
