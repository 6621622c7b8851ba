//! Resource facades: thin pass-throughs from builder to transport.
//!
//! Each operation builds its descriptor, sends it and returns the raw
//! [`Response`](crate::transport::Response). Facades hold no state beyond the
//! shared transport and never translate errors.

pub mod api;
pub mod generation;
pub mod management;

pub use api::ApiResource;
pub use generation::GenerationResource;
pub use management::ManagementResource;

use crate::requests::Endpoint;
use crate::transport::{Response, Transport};
use crate::Result;

async fn dispatch(transport: &dyn Transport, endpoint: &impl Endpoint) -> Result<Response> {
    transport.send(endpoint.to_request()?).await
}
