//! Account and Family Tools
//!
//! Sign in by phone, profile creation, and family groups.

use serde::Serialize;

use super::{current_user, Services};
use crate::error::AppResult;
use crate::models::{AppSettings, AppSettingsUpdate, FamilyActivity, FamilyGroup, User};
use crate::store::AppStores;
use crate::validation::{check_otp, check_phone_number, format_phone_number, ProfileForm};

/// How many feed entries a family refresh loads
pub const FAMILY_FEED_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub phone_number: String,
    pub display_phone_number: String,
    pub user: Option<User>,
    /// True when no profile exists for this number yet
    pub needs_profile: bool,
}

#[derive(Debug, Serialize)]
pub struct FamilyOverview {
    pub family_group: Option<FamilyGroup>,
    pub members: Vec<User>,
    pub activities: Vec<FamilyActivity>,
}

/// Sign in with a phone number and the code sent to it.
///
/// Code delivery and checking belong to the verification provider; only the
/// code's shape is checked here.
pub async fn sign_in(
    stores: &mut AppStores,
    services: &Services,
    phone_number: &str,
    otp: &str,
) -> AppResult<SignInResponse> {
    let phone_number = check_phone_number(phone_number)?;
    check_otp(otp)?;

    stores.auth.set_loading(true)?;
    let lookup = services.users.get_user_by_phone_number(&phone_number).await;
    stores.auth.set_loading(false)?;
    let user = lookup?;

    if let Some(user) = &user {
        stores.auth.set_user(Some(user.clone()))?;
        stores.auth.set_authenticated(true)?;
        tracing::info!(user_id = %user.id, "signed in");
        refresh_family(stores, services).await?;
    }

    Ok(SignInResponse {
        display_phone_number: format_phone_number(&phone_number),
        needs_profile: user.is_none(),
        phone_number,
        user,
    })
}

/// Validate the profile form, create the user and sign them in
pub async fn create_profile(
    stores: &mut AppStores,
    services: &Services,
    phone_number: &str,
    form: &ProfileForm,
) -> AppResult<User> {
    let phone_number = check_phone_number(phone_number)?;
    let data = form.validate(&phone_number)?;

    let user = services.users.create_user(data).await?;
    stores.auth.set_user(Some(user.clone()))?;
    stores.auth.set_authenticated(true)?;
    if stores.settings.get().settings.is_none() {
        stores.settings.set_settings(AppSettings::defaults_for(&user.id))?;
    }
    Ok(user)
}

/// Sign out and drop the in-memory family data
pub fn sign_out(stores: &mut AppStores) -> AppResult<()> {
    stores.auth.logout()?;
    stores.family.reset()?;
    Ok(())
}

/// Create a family group led by the signed-in user
pub async fn create_family(
    stores: &mut AppStores,
    services: &Services,
    name: &str,
) -> AppResult<FamilyOverview> {
    let user_id = current_user(stores)?.id.clone();
    let group = services.family.create_family_group(name, &user_id).await?;
    link_family(stores, &group.id)?;
    refresh_family(stores, services).await
}

/// Join the family group with this invite code
pub async fn join_family(
    stores: &mut AppStores,
    services: &Services,
    invite_code: &str,
) -> AppResult<FamilyOverview> {
    let user_id = current_user(stores)?.id.clone();
    let group_id = services.family.join_family_group(invite_code, &user_id).await?;
    link_family(stores, &group_id)?;
    refresh_family(stores, services).await
}

fn link_family(stores: &mut AppStores, group_id: &str) -> AppResult<()> {
    let mut user = current_user(stores)?.clone();
    user.family_group_id = Some(group_id.to_string());
    stores.auth.set_user(Some(user))?;
    Ok(())
}

/// Reload the signed-in user's group, members and recent activity into the family store
pub async fn refresh_family(
    stores: &mut AppStores,
    services: &Services,
) -> AppResult<FamilyOverview> {
    let group_id = current_user(stores)?.family_group_id.clone();

    let (group, members, activities) = match group_id {
        Some(group_id) => {
            let group = services.family.get_family_group(&group_id).await?;
            let members = services.family.get_family_members(&group_id).await?;
            let activities = services
                .family
                .get_family_activities(&group_id, Some(FAMILY_FEED_LIMIT))
                .await?;
            (group, members, activities)
        }
        None => (None, Vec::new(), Vec::new()),
    };

    stores.family.set_family_group(group.clone())?;
    stores.family.set_family_members(members.clone())?;
    stores.family.set_family_activities(activities.clone())?;

    Ok(FamilyOverview {
        family_group: group,
        members,
        activities,
    })
}

/// The signed-in user's settings, created with defaults on first use
pub fn get_settings(stores: &mut AppStores) -> AppResult<AppSettings> {
    let user_id = current_user(stores)?.id.clone();
    let stored = stores.settings.get().settings.clone();
    match stored {
        Some(settings) if settings.user_id == user_id => Ok(settings),
        _ => {
            let settings = AppSettings::defaults_for(&user_id);
            stores.settings.set_settings(settings.clone())?;
            Ok(settings)
        }
    }
}

pub fn update_settings(stores: &mut AppStores, update: AppSettingsUpdate) -> AppResult<AppSettings> {
    get_settings(stores)?;
    stores.settings.update_settings(update)?;
    get_settings(stores)
}
