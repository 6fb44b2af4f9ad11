//! Profile: a viewer persona under an account, with playback preferences.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub account_id: DbId,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub maturity_rating: i16,
    pub autoplay_next_episode: bool,
    pub skip_intro: bool,
    pub skip_credits: bool,
    pub language_code: i32,
    pub last_activity_at: Option<Timestamp>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// New profile. Playback preferences start at their column defaults.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub id: DbId,
    pub account_id: DbId,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub maturity_rating: i16,
    pub language_code: i32,
    pub is_admin: bool,
}

/// Updatable profile fields. `is_admin` is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 50))]
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    #[validate(range(min = 0, max = 18))]
    pub maturity_rating: Option<i16>,
    pub autoplay_next_episode: Option<bool>,
    pub skip_intro: Option<bool>,
    pub skip_credits: Option<bool>,
    pub language_code: Option<i32>,
    pub last_activity_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub enum ProfileFilter {
    ById(DbId),
    ByAccount(DbId),
    ByAccountAndId(DbId, DbId),
}

impl Filter for ProfileFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            ProfileFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            ProfileFilter::ByAccount(account_id) => {
                vec![Condition::Eq("account_id", (*account_id).into())]
            }
            ProfileFilter::ByAccountAndId(account_id, id) => vec![
                Condition::Eq("account_id", (*account_id).into()),
                Condition::Eq("id", (*id).into()),
            ],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("created_at")
    }
}

impl Insertable for CreateProfile {
    const TABLE: &'static str = "profiles";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("account_id", self.account_id.into()),
            ("nickname", self.nickname.clone().into()),
            ("avatar_url", self.avatar_url.clone().into()),
            ("maturity_rating", self.maturity_rating.into()),
            ("language_code", self.language_code.into()),
            ("is_admin", self.is_admin.into()),
        ]
    }
}

impl Patch<Profile> for UpdateProfile {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "nickname", &self.nickname);
        assign(&mut out, "avatar_url", &self.avatar_url);
        assign(&mut out, "maturity_rating", &self.maturity_rating);
        assign(&mut out, "autoplay_next_episode", &self.autoplay_next_episode);
        assign(&mut out, "skip_intro", &self.skip_intro);
        assign(&mut out, "skip_credits", &self.skip_credits);
        assign(&mut out, "language_code", &self.language_code);
        assign(&mut out, "last_activity_at", &self.last_activity_at);
        out
    }

    fn apply(&self, profile: &mut Profile) {
        if let Some(v) = &self.nickname {
            profile.nickname = v.clone();
        }
        if let Some(v) = &self.avatar_url {
            profile.avatar_url = Some(v.clone());
        }
        if let Some(v) = self.maturity_rating {
            profile.maturity_rating = v;
        }
        if let Some(v) = self.autoplay_next_episode {
            profile.autoplay_next_episode = v;
        }
        if let Some(v) = self.skip_intro {
            profile.skip_intro = v;
        }
        if let Some(v) = self.skip_credits {
            profile.skip_credits = v;
        }
        if let Some(v) = self.language_code {
            profile.language_code = v;
        }
        if let Some(v) = self.last_activity_at {
            profile.last_activity_at = Some(v);
        }
    }
}

impl Entity for Profile {
    const NAME: &'static str = "Profile";
    const TABLE: &'static str = "profiles";
    const COLUMNS: &'static str = "id, account_id, nickname, avatar_url, maturity_rating, \
                                   autoplay_next_episode, skip_intro, skip_credits, language_code, \
                                   last_activity_at, is_admin, created_at";

    type New = CreateProfile;
    type Filter = ProfileFilter;
    type Patch = UpdateProfile;

    fn key(&self) -> ProfileFilter {
        ProfileFilter::ById(self.id)
    }

    fn new_key(new: &CreateProfile) -> ProfileFilter {
        ProfileFilter::ById(new.id)
    }
}
