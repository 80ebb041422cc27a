//! Workshop management

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{Workshop, WorkshopInput};
use reqwest::Method;

impl ApiClient {
    /// List all workshops
    pub async fn list_workshops(&self) -> Result<Vec<Workshop>, ClientError> {
        self.execute(&ApiRequest::get("/workshops")).await
    }

    /// Get a single workshop
    pub async fn get_workshop(&self, id: i64) -> Result<Workshop, ClientError> {
        self.execute(&ApiRequest::get(format!("/workshops/{id}")))
            .await
    }

    /// Create a workshop
    pub async fn create_workshop(&self, workshop: &WorkshopInput) -> Result<Workshop, ClientError> {
        let request = ApiRequest::new(Method::POST, "/workshops").json(workshop)?;
        self.execute(&request).await
    }

    /// Update a workshop
    pub async fn update_workshop(
        &self,
        id: i64,
        workshop: &WorkshopInput,
    ) -> Result<Workshop, ClientError> {
        let request = ApiRequest::new(Method::PUT, format!("/workshops/{id}")).json(workshop)?;
        self.execute(&request).await
    }

    /// Delete a workshop
    pub async fn delete_workshop(&self, id: i64) -> Result<(), ClientError> {
        self.execute_unit(&ApiRequest::delete(format!("/workshops/{id}")))
            .await
    }
}
