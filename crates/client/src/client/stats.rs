//! Dashboard statistics

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::Stats;

impl ApiClient {
    /// Total number of users
    pub async fn count_users(&self) -> Result<u64, ClientError> {
        self.execute(&ApiRequest::get("/sum/users")).await
    }

    /// Total number of workshops
    pub async fn count_workshops(&self) -> Result<u64, ClientError> {
        self.execute(&ApiRequest::get("/sum/workshops")).await
    }

    /// Total number of skills
    pub async fn count_skills(&self) -> Result<u64, ClientError> {
        self.execute(&ApiRequest::get("/sum/skills")).await
    }

    /// All three totals, fetched concurrently
    pub async fn fetch_all_stats(&self) -> Result<Stats, ClientError> {
        let (user_count, workshop_count, skill_count) = futures::try_join!(
            self.count_users(),
            self.count_workshops(),
            self.count_skills()
        )?;

        Ok(Stats {
            user_count,
            workshop_count,
            skill_count,
        })
    }
}
