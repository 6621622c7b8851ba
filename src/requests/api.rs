use super::{ApiRequest, Endpoint};
use crate::Result;
use reqwest::Method;

/// `GET /api/version`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetVersionRequest;

impl Endpoint for GetVersionRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::new(Method::GET, ["api", "version"]))
    }
}
