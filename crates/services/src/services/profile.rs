use serde::Deserialize;
use streamify_core::error::CoreResult;
use streamify_core::types::{new_id, DbId};
use streamify_db::models::profile::{CreateProfile, Profile, ProfileFilter, UpdateProfile};
use streamify_db::repositories::ProfileRepo;
use streamify_db::UnitOfWork;
use validator::Validate;

const AVATAR_COUNT: u32 = 5;

/// One of the stock avatars, picked at random.
pub fn default_avatar() -> String {
    format!("avatar{}.jpeg", rand::random_range(1..=AVATAR_COUNT))
}

/// A profile created by the account owner. Never an admin profile; the admin
/// profile is only created during registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewProfile {
    #[validate(length(min = 1, max = 50))]
    pub nickname: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 18))]
    pub maturity_rating: Option<i16>,
    #[serde(default)]
    pub language_code: Option<i32>,
}

pub struct ProfileService;

impl ProfileService {
    pub async fn list(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Vec<Profile>> {
        ProfileRepo::get_many(&ProfileFilter::ByAccount(account_id), uow).await
    }

    pub async fn get(account_id: DbId, profile_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Profile> {
        ProfileRepo::get_one(&ProfileFilter::ByAccountAndId(account_id, profile_id), uow).await
    }

    pub async fn create(
        account_id: DbId,
        input: &NewProfile,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Profile> {
        input.validate()?;
        let new = CreateProfile {
            id: new_id(),
            account_id,
            nickname: input.nickname.clone(),
            avatar_url: Some(input.avatar_url.clone().unwrap_or_else(default_avatar)),
            maturity_rating: input.maturity_rating.unwrap_or(0),
            language_code: input.language_code.unwrap_or(0),
            is_admin: false,
        };
        ProfileRepo::create(new, uow, true).await?.into_committed()
    }

    pub async fn update(
        account_id: DbId,
        profile_id: DbId,
        patch: &UpdateProfile,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Profile> {
        patch.validate()?;
        let filter = ProfileFilter::ByAccountAndId(account_id, profile_id);
        ProfileRepo::update_one(&filter, patch, uow, true).await
    }

    pub async fn delete(account_id: DbId, profile_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Profile> {
        let filter = ProfileFilter::ByAccountAndId(account_id, profile_id);
        ProfileRepo::delete_one(&filter, uow, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_avatar_is_one_of_the_stock_images() {
        for _ in 0..50 {
            let avatar = default_avatar();
            let n: u32 = avatar
                .trim_start_matches("avatar")
                .trim_end_matches(".jpeg")
                .parse()
                .unwrap();
            assert!((1..=AVATAR_COUNT).contains(&n), "{avatar}");
        }
    }

    #[test]
    fn maturity_rating_out_of_range_is_rejected() {
        let input = NewProfile {
            nickname: "kids".into(),
            avatar_url: None,
            maturity_rating: Some(21),
            language_code: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_uses_the_same_bounds_as_create() {
        let too_mature = UpdateProfile {
            maturity_rating: Some(99),
            ..Default::default()
        };
        assert!(too_mature.validate().is_err());

        let blank = UpdateProfile {
            nickname: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let fine = UpdateProfile {
            nickname: Some("kids".into()),
            maturity_rating: Some(7),
            ..Default::default()
        };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn admin_flag_cannot_be_requested() {
        let raw = r#"{"nickname": "me", "is_admin": true}"#;
        assert!(serde_json::from_str::<NewProfile>(raw).is_err());
    }
}
