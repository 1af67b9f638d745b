//! Profile repository (数据库访问层)
//! 社交链接、技能、经历与教育以 JSONB 文档形式存储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{ProfileStore, StoreResult};
use crate::models::profile::{Education, Experience, Profile, Social};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    status: String,
    skills: Json<Vec<String>>,
    bio: Option<String>,
    github_username: Option<String>,
    social: Json<Social>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    date: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: row.user_id,
            company: row.company,
            website: row.website,
            location: row.location,
            status: row.status,
            skills: row.skills.0,
            bio: row.bio,
            github_username: row.github_username,
            social: row.social.0,
            experience: row.experience.0,
            education: row.education.0,
            date: row.date,
        }
    }
}

pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_user(&self, user_id: &Uuid) -> StoreResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Profile::from))
    }

    async fn list(&self) -> StoreResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles ORDER BY date DESC")
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    /// 按 user_id 插入或整体替换
    async fn save(&self, profile: &Profile) -> StoreResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (
                id, user_id, company, website, location, status, skills, bio,
                github_username, social, experience, education, date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                company = EXCLUDED.company,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                github_username = EXCLUDED.github_username,
                social = EXCLUDED.social,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.status)
        .bind(Json(&profile.skills))
        .bind(&profile.bio)
        .bind(&profile.github_username)
        .bind(Json(&profile.social))
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(profile.date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn delete_by_user(&self, user_id: &Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
