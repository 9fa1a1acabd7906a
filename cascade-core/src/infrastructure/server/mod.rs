//! HTTP boundary: validates inbound requests, runs the sequencer and shapes
//! the JSON reply.

mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{
    AggregateFailureResponse, AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse,
    InternalErrorResponse,
};
pub use error::ServerError;
pub use router::{router, serve, serve_listener};
