//! Exchange capture and replay.
//!
//! This module provides:
//! - `ExchangeRecord`: the JSON format of one captured request/response pair
//! - `RecordWriter`: one timestamped file per request in an output directory
//! - `FixtureTransport`: replays a directory of records instead of the network

mod record;
mod replay;
mod writer;

pub use record::{
    ExchangeRecord, RecordedRequest, RecordedRequestHeaders, RecordedResponse,
    RecordedResponseHeaders,
};
pub use replay::FixtureTransport;
pub use writer::RecordWriter;
