//! Skill catalogue

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{Skill, SkillInput};
use reqwest::Method;

impl ApiClient {
    pub async fn list_skills(&self) -> Result<Vec<Skill>, ClientError> {
        self.execute(&ApiRequest::get("/skills")).await
    }

    pub async fn get_skill(&self, id: i64) -> Result<Skill, ClientError> {
        self.execute(&ApiRequest::get(format!("/skills/{id}"))).await
    }

    pub async fn create_skill(&self, skill: &SkillInput) -> Result<Skill, ClientError> {
        let request = ApiRequest::new(Method::POST, "/skills").json(skill)?;
        self.execute(&request).await
    }

    pub async fn update_skill(&self, id: i64, skill: &SkillInput) -> Result<Skill, ClientError> {
        let request = ApiRequest::new(Method::PUT, format!("/skills/{id}")).json(skill)?;
        self.execute(&request).await
    }

    pub async fn delete_skill(&self, id: i64) -> Result<(), ClientError> {
        self.execute_unit(&ApiRequest::delete(format!("/skills/{id}")))
            .await
    }
}
