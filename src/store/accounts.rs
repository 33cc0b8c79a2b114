//! Companies and user profiles. Both are written once at registration and
//! read on every authenticated request to resolve the caller's tenant.

use sqlx::Row;
use uuid::Uuid;

use super::models::{Company, ProfileRole, UserProfile};
use super::{now_rfc3339, TenantStore};
use crate::core::errors::ApiError;

impl TenantStore {
    pub async fn create_company(&self, name: &str) -> Result<Company, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest(
                "Company name must not be empty".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            "INSERT INTO companies (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create company: {}", e)))?;

        Ok(Company {
            id,
            name: name.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn get_company(&self, company_id: &str) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query("SELECT * FROM companies WHERE id = ?")
            .bind(company_id)
            .fetch_optional(self.pool())
            .await
            .map_err(ApiError::internal)?;

        Ok(row.map(|row| Company::from_row(&row)))
    }

    pub async fn create_profile(
        &self,
        user_id: &str,
        company_id: &str,
        role: ProfileRole,
    ) -> Result<UserProfile, ApiError> {
        if self.get_company(company_id).await?.is_none() {
            return Err(ApiError::BadRequest(format!(
                "Unknown company: {}",
                company_id
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            "INSERT INTO user_profiles (id, user_id, company_id, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(company_id)
        .bind(role.as_str())
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create profile: {}", e)))?;

        Ok(UserProfile {
            id,
            user_id: user_id.to_string(),
            company_id: company_id.to_string(),
            role,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Resolves the caller's tenant. A user belongs to at most one company.
    pub async fn profile_for_user(&self, user_id: &str) -> Result<Option<UserProfile>, ApiError> {
        let row = sqlx::query("SELECT * FROM user_profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(ApiError::internal)?;

        Ok(row.map(|row| UserProfile::from_row(&row)))
    }

    pub async fn company_stats(&self, company_id: &str) -> Result<CompanyStats, ApiError> {
        let documents: i64 =
            sqlx::query("SELECT COUNT(*) FROM documents WHERE company_id = ?")
                .bind(company_id)
                .fetch_one(self.pool())
                .await
                .map(|r| r.get(0))
                .map_err(ApiError::internal)?;

        let processed: i64 = sqlx::query(
            "SELECT COUNT(*) FROM documents WHERE company_id = ? AND processed = 1",
        )
        .bind(company_id)
        .fetch_one(self.pool())
        .await
        .map(|r| r.get(0))
        .map_err(ApiError::internal)?;

        let sessions: i64 =
            sqlx::query("SELECT COUNT(*) FROM chat_sessions WHERE company_id = ?")
                .bind(company_id)
                .fetch_one(self.pool())
                .await
                .map(|r| r.get(0))
                .map_err(ApiError::internal)?;

        Ok(CompanyStats {
            documents,
            processed_documents: processed,
            chat_sessions: sessions,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CompanyStats {
    pub documents: i64,
    pub processed_documents: i64,
    pub chat_sessions: i64,
}
