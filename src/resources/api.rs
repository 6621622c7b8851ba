use super::{dispatch, GenerationResource, ManagementResource};
use crate::requests::GetVersionRequest;
use crate::transport::{Response, Transport};
use crate::Result;
use std::sync::Arc;

/// Root facade.
#[derive(Clone)]
pub struct ApiResource {
    transport: Arc<dyn Transport>,
}

impl ApiResource {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /api/version`
    pub async fn version(&self) -> Result<Response> {
        dispatch(self.transport.as_ref(), &GetVersionRequest).await
    }

    pub fn completions(&self) -> GenerationResource {
        GenerationResource::new(self.transport.clone())
    }

    pub fn management(&self) -> ManagementResource {
        ManagementResource::new(self.transport.clone())
    }
}
