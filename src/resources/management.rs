use super::dispatch;
use crate::requests::{
    CheckBlobExistsRequest, CopyModelRequest, CreateModelRequest, DeleteModelRequest,
    ListLocalModelsRequest, ListRunningModelsRequest, LoadModelRequest, PullModelRequest,
    PushModelRequest, ShowModelRequest, UnloadModelRequest,
};
use crate::transport::{Response, Transport};
use crate::Result;
use std::sync::Arc;

/// Model lifecycle operations.
#[derive(Clone)]
pub struct ManagementResource {
    transport: Arc<dyn Transport>,
}

impl ManagementResource {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /api/tags`
    pub async fn list(&self) -> Result<Response> {
        dispatch(self.transport.as_ref(), &ListLocalModelsRequest).await
    }

    /// `GET /api/ps`
    pub async fn running(&self) -> Result<Response> {
        dispatch(self.transport.as_ref(), &ListRunningModelsRequest).await
    }

    /// `POST /api/create`; streams progress unless `stream(false)` was set.
    pub async fn create(&self, request: &CreateModelRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `POST /api/copy`
    pub async fn copy(&self, source: &str, destination: &str) -> Result<Response> {
        dispatch(
            self.transport.as_ref(),
            &CopyModelRequest::new(source, destination),
        )
        .await
    }

    /// `DELETE /api/delete`
    pub async fn delete(&self, model: &str) -> Result<Response> {
        dispatch(self.transport.as_ref(), &DeleteModelRequest::new(model)).await
    }

    /// `POST /api/pull`; streams progress unless `stream(false)` was set.
    pub async fn pull(&self, request: &PullModelRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `POST /api/push`; streams progress unless `stream(false)` was set.
    pub async fn push(&self, request: &PushModelRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `POST /api/show`
    pub async fn show(&self, request: &ShowModelRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `HEAD /api/blobs/{digest}`: 200 if the blob exists, 404 if not.
    pub async fn blob_exists(&self, digest: &str) -> Result<Response> {
        dispatch(self.transport.as_ref(), &CheckBlobExistsRequest::new(digest)).await
    }

    /// Load a model into memory.
    pub async fn load(&self, model: &str) -> Result<Response> {
        dispatch(self.transport.as_ref(), &LoadModelRequest::new(model)).await
    }

    /// Unload a model from memory.
    pub async fn unload(&self, model: &str) -> Result<Response> {
        dispatch(self.transport.as_ref(), &UnloadModelRequest::new(model)).await
    }
}
