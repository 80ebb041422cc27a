//! User management

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{User, UserInput};
use reqwest::Method;

impl ApiClient {
    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.execute(&ApiRequest::get("/users")).await
    }

    /// Get a single user
    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.execute(&ApiRequest::get(format!("/users/{id}"))).await
    }

    /// Create a user
    pub async fn create_user(&self, user: &UserInput) -> Result<User, ClientError> {
        let request = ApiRequest::new(Method::POST, "/users").json(user)?;
        self.execute(&request).await
    }

    /// Update a user
    pub async fn update_user(&self, id: i64, user: &UserInput) -> Result<User, ClientError> {
        let request = ApiRequest::new(Method::PUT, format!("/users/{id}")).json(user)?;
        self.execute(&request).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        self.execute_unit(&ApiRequest::delete(format!("/users/{id}")))
            .await
    }
}
