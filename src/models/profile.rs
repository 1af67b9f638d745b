//! Profile domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Social network links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Work experience entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Education entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    #[serde(rename = "fieldofstudy")]
    pub field_of_study: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Developer profile, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Owning user
    pub user: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    pub social: Social,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

impl Profile {
    pub fn new(user: Uuid, status: String, skills: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            company: None,
            website: None,
            location: None,
            status,
            skills,
            bio: None,
            github_username: None,
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
        }
    }
}

/// Profile joined with the owner's public name and avatar
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub name: String,
    pub avatar: String,
}

/// Create or update profile request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(default)]
    #[validate(custom(function = "status_present"))]
    pub status: String,

    /// Comma separated list, e.g. "rust, go,  sql"
    #[serde(default)]
    #[validate(custom(function = "skills_present"))]
    pub skills: String,

    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

fn status_present(status: &str) -> Result<(), ValidationError> {
    super::require_text(status, "Status is required")
}

/// At least one non-blank item once the list is split
fn skills_present(skills: &str) -> Result<(), ValidationError> {
    if split_skills(skills).is_empty() {
        return Err(super::required("Skills is required"));
    }
    Ok(())
}

fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ProfileRequest {
    /// Splits the comma separated skills, dropping empty items
    pub fn skill_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }

    pub fn social(&self) -> Social {
        Social {
            youtube: self.youtube.clone(),
            twitter: self.twitter.clone(),
            facebook: self.facebook.clone(),
            linkedin: self.linkedin.clone(),
            instagram: self.instagram.clone(),
        }
    }
}

/// Add experience request; dates are `YYYY-MM-DD`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "From date is required"))]
    pub from: String,

    pub location: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Add education request; dates are `YYYY-MM-DD`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EducationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "School is required"))]
    pub school: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Degree is required"))]
    pub degree: String,

    #[serde(default, rename = "fieldofstudy")]
    #[validate(length(min = 1, message = "Field of study is required"))]
    pub field_of_study: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "From date is required"))]
    pub from: String,

    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}
