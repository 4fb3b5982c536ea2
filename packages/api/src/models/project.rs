//! # Projects
//!
//! [`Project`] is the server-owned record; the client never assigns its id.
//! Admin writes go through [`ProjectDraft`], which is produced from the raw editor
//! fields in [`ProjectForm`] by [`ProjectForm::to_draft`]:
//!
//! - `technologies` is a comma-separated string, split and trimmed into a list
//! - `start_date`/`end_date` are `YYYY-MM-DD`; an empty end date is omitted
//! - an empty live URL is omitted rather than sent as `""`

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::models::{date_part, non_empty, split_list};

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Completed, Self::InProgress, Self::Planned];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Planned => "planned",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DraftError::UnknownStatus(s.to_string()))
    }
}

/// Project categories offered by the public filter, `"all"` meaning no filter.
pub const PROJECT_CATEGORIES: [&str; 6] = ["all", "web-dev", "mobile", "data-science", "devops", "other"];

/// A portfolio project as stored by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Validated write payload for `POST /admin/projects` and `PUT /admin/projects/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub detailed_description: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    pub image_url: String,
    pub featured: bool,
    pub category: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ProjectDraft {
    /// Check the invariants the form cannot enforce by itself.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingField("description"));
        }
        if self.category.trim().is_empty() {
            return Err(DraftError::MissingField("category"));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(DraftError::EndBeforeStart {
                    start: self.start_date.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Raw project editor fields, as typed by the admin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub detailed_description: String,
    /// Comma-separated list, e.g. `"Rust, Dioxus"`.
    pub technologies: String,
    pub github_url: String,
    pub live_url: String,
    pub image_url: String,
    pub featured: bool,
    pub category: String,
    pub status: ProjectStatus,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD` or empty.
    pub end_date: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::starting_on(chrono::Utc::now().date_naive())
    }
}

impl ProjectForm {
    /// An empty form whose start date is `today`.
    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            detailed_description: String::new(),
            technologies: String::new(),
            github_url: String::new(),
            live_url: String::new(),
            image_url: String::new(),
            featured: false,
            category: "web-dev".to_string(),
            status: ProjectStatus::Completed,
            start_date: today.format("%Y-%m-%d").to_string(),
            end_date: String::new(),
        }
    }

    /// Pre-fill the editor from an existing project.
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            detailed_description: project.detailed_description.clone(),
            technologies: project.technologies.join(", "),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone().unwrap_or_default(),
            image_url: project.image_url.clone(),
            featured: project.featured,
            category: project.category.clone(),
            status: project.status,
            start_date: date_part(&project.start_date).to_string(),
            end_date: project
                .end_date
                .as_deref()
                .map(date_part)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Apply the field transforms and validate.
    pub fn to_draft(&self) -> Result<ProjectDraft, DraftError> {
        let start_date = parse_date("startDate", &self.start_date)?
            .ok_or(DraftError::MissingField("startDate"))?;
        let draft = ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            detailed_description: self.detailed_description.trim().to_string(),
            technologies: split_list(&self.technologies),
            github_url: self.github_url.trim().to_string(),
            live_url: non_empty(&self.live_url),
            image_url: self.image_url.trim().to_string(),
            featured: self.featured,
            category: self.category.trim().to_string(),
            status: self.status,
            start_date,
            end_date: parse_date("endDate", &self.end_date)?,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DraftError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
