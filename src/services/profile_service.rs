//! 个人资料服务：资料维护、工作经历、教育经历与注销账户
//! 所有写操作只作用于调用者自己的资料，所有权由 user_id 隐式保证

use crate::{
    auth::AuthContext,
    error::{AppError, FieldError},
    models::profile::{
        Education, EducationRequest, Experience, ExperienceRequest, Profile, ProfileRequest,
        ProfileResponse,
    },
    repository::{parse_id, PostStore, ProfileStore, UserStore},
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

/// 日期格式 YYYY-MM-DD
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            profiles,
            posts,
            users,
        }
    }

    /// 当前用户的资料
    pub async fn me(&self, identity: &AuthContext) -> Result<ProfileResponse, AppError> {
        let profile = self.own_profile(identity).await?;
        self.with_owner(profile).await
    }

    /// 创建或更新资料
    ///
    /// 未提供的可选字段保留原值；社交链接整体替换；经历与教育不受影响。
    pub async fn upsert(
        &self,
        identity: &AuthContext,
        req: ProfileRequest,
    ) -> Result<Profile, AppError> {
        let skills = req.skill_list();
        let social = req.social();

        let mut profile = match self.profiles.find_by_user(&identity.user_id).await? {
            Some(existing) => existing,
            None => Profile::new(identity.user_id, req.status.trim().to_string(), skills.clone()),
        };

        profile.status = req.status.trim().to_string();
        profile.skills = skills;
        profile.social = social;
        merge(&mut profile.company, req.company);
        merge(&mut profile.website, req.website);
        merge(&mut profile.location, req.location);
        merge(&mut profile.bio, req.bio);
        merge(&mut profile.github_username, req.github_username);

        let saved = self.profiles.save(&profile).await?;
        tracing::info!(user_id = %saved.user, "Profile saved");
        Ok(saved)
    }

    /// 所有资料（公开）
    pub async fn list(&self) -> Result<Vec<ProfileResponse>, AppError> {
        let profiles = self.profiles.list().await?;

        let mut responses = Vec::with_capacity(profiles.len());
        for profile in profiles {
            responses.push(self.with_owner(profile).await?);
        }
        Ok(responses)
    }

    /// 按用户 ID 查看资料（公开），非法 ID 与不存在同样处理
    pub async fn by_user(&self, user_id: &str) -> Result<ProfileResponse, AppError> {
        let user_id = parse_id(user_id).map_err(|_| AppError::bad_request(PROFILE_NOT_FOUND))?;

        let profile = self
            .profiles
            .find_by_user(&user_id)
            .await?
            .ok_or_else(|| AppError::bad_request(PROFILE_NOT_FOUND))?;

        self.with_owner(profile).await
    }

    /// 注销账户：依次删除帖子、资料与用户
    pub async fn delete_account(&self, identity: &AuthContext) -> Result<(), AppError> {
        let removed_posts = self.posts.delete_by_user(&identity.user_id).await?;
        self.profiles.delete_by_user(&identity.user_id).await?;
        self.users.delete(&identity.user_id).await?;

        tracing::info!(
            user_id = %identity.user_id,
            removed_posts,
            "Account deleted"
        );
        Ok(())
    }

    /// 添加工作经历（插入到最前）
    pub async fn add_experience(
        &self,
        identity: &AuthContext,
        req: ExperienceRequest,
    ) -> Result<Profile, AppError> {
        let mut profile = self.own_profile(identity).await?;

        let entry = Experience {
            id: Uuid::new_v4(),
            title: req.title,
            company: req.company,
            location: req.location,
            from: parse_date("from", &req.from)?,
            to: parse_optional_date("to", req.to.as_deref())?,
            current: req.current,
            description: req.description,
        };
        profile.experience.insert(0, entry);

        Ok(self.profiles.save(&profile).await?)
    }

    pub async fn delete_experience(
        &self,
        identity: &AuthContext,
        exp_id: &str,
    ) -> Result<Profile, AppError> {
        let mut profile = self.own_profile(identity).await?;

        let index = parse_id(exp_id)
            .ok()
            .and_then(|id| profile.experience.iter().position(|e| e.id == id))
            .ok_or_else(|| AppError::not_found("Experience not found"))?;
        profile.experience.remove(index);

        Ok(self.profiles.save(&profile).await?)
    }

    /// 添加教育经历（插入到最前）
    pub async fn add_education(
        &self,
        identity: &AuthContext,
        req: EducationRequest,
    ) -> Result<Profile, AppError> {
        let mut profile = self.own_profile(identity).await?;

        let entry = Education {
            id: Uuid::new_v4(),
            school: req.school,
            degree: req.degree,
            field_of_study: req.field_of_study,
            from: parse_date("from", &req.from)?,
            to: parse_optional_date("to", req.to.as_deref())?,
            current: req.current,
            description: req.description,
        };
        profile.education.insert(0, entry);

        Ok(self.profiles.save(&profile).await?)
    }

    pub async fn delete_education(
        &self,
        identity: &AuthContext,
        edu_id: &str,
    ) -> Result<Profile, AppError> {
        let mut profile = self.own_profile(identity).await?;

        let index = parse_id(edu_id)
            .ok()
            .and_then(|id| profile.education.iter().position(|e| e.id == id))
            .ok_or_else(|| AppError::not_found("Education not found"))?;
        profile.education.remove(index);

        Ok(self.profiles.save(&profile).await?)
    }

    async fn own_profile(&self, identity: &AuthContext) -> Result<Profile, AppError> {
        self.profiles
            .find_by_user(&identity.user_id)
            .await?
            .ok_or_else(|| AppError::bad_request(NO_PROFILE))
    }

    async fn with_owner(&self, profile: Profile) -> Result<ProfileResponse, AppError> {
        let (name, avatar) = match self.users.find_by_id(&profile.user).await? {
            Some(user) => (user.name, user.avatar),
            None => (String::new(), String::new()),
        };

        Ok(ProfileResponse {
            profile,
            name,
            avatar,
        })
    }
}

fn merge(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = Some(value);
    }
}

fn parse_date(param: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::Validation(vec![FieldError::for_param(
            param,
            format!("{} must be a date in YYYY-MM-DD format", param),
        )])
    })
}

fn parse_optional_date(param: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(param, raw).map(Some),
    }
}
