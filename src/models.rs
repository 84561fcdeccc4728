use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Account kind selected on the settings form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Individual,
    Organization,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Individual => "individual",
            UserType::Organization => "organization",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserType::Individual => "Individual",
            UserType::Organization => "Organization",
        }
    }

    pub fn next(&self) -> UserType {
        match self {
            UserType::Individual => UserType::Organization,
            UserType::Organization => UserType::Individual,
        }
    }
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(UserType::Individual),
            "organization" => Ok(UserType::Organization),
            other => bail!("unknown user type '{}'", other),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text fields of the profile form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Bio,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    City,
    StateCounty,
    Postcode,
    Country,
}

impl ProfileField {
    /// Form order
    pub const ALL: [ProfileField; 9] = [
        ProfileField::Bio,
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::PhoneNumber,
        ProfileField::City,
        ProfileField::StateCounty,
        ProfileField::Postcode,
        ProfileField::Country,
    ];

    /// Wire name, as used in config files and submissions
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::Bio => "bio",
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Email => "email",
            ProfileField::PhoneNumber => "phoneNumber",
            ProfileField::City => "city",
            ProfileField::StateCounty => "stateCounty",
            ProfileField::Postcode => "postcode",
            ProfileField::Country => "country",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Bio => "Bio",
            ProfileField::FirstName => "First Name",
            ProfileField::LastName => "Last Name",
            ProfileField::Email => "Email Address",
            ProfileField::PhoneNumber => "Phone Number",
            ProfileField::City => "City",
            ProfileField::StateCounty => "State/County",
            ProfileField::Postcode => "Postcode",
            ProfileField::Country => "Country",
        }
    }

    pub fn from_name(name: &str) -> Option<ProfileField> {
        ProfileField::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// The nine free-text form values
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state_county: String,
    #[serde(deserialize_with = "lenient_string")]
    pub postcode: String,
    #[serde(deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bio: String,
}

impl ProfileForm {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Bio => &self.bio,
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::PhoneNumber => &self.phone_number,
            ProfileField::City => &self.city,
            ProfileField::StateCounty => &self.state_county,
            ProfileField::Postcode => &self.postcode,
            ProfileField::Country => &self.country,
        }
    }

    pub fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Bio => &mut self.bio,
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::PhoneNumber => &mut self.phone_number,
            ProfileField::City => &mut self.city,
            ProfileField::StateCounty => &mut self.state_county,
            ProfileField::Postcode => &mut self.postcode,
            ProfileField::Country => &mut self.country,
        }
    }
}

/// Reads any scalar as text, so an unquoted `postcode: 12345` in a config
/// file is taken as "12345"; null reads as empty
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Unsigned(n)) => n.to_string(),
        Some(Scalar::Signed(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
    })
}

/// Points and level shown in the summary drawer (display only)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gamification {
    pub points: u32,
    pub level: u32,
    /// Percentage toward the next level, 0..=100
    pub level_progress: u8,
}

impl Gamification {
    pub fn new(points: u32, level: u32, level_progress: u8) -> Self {
        Gamification {
            points,
            level,
            level_progress: level_progress.min(100),
        }
    }

    /// Progress as a ratio for gauges; tolerates out-of-range config values
    pub fn progress_ratio(&self) -> f64 {
        f64::from(self.level_progress.min(100)) / 100.0
    }
}

impl Default for Gamification {
    fn default() -> Self {
        Gamification::new(120, 3, 60)
    }
}

/// Subscription and achievement info shown in the summary drawer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountStatus {
    pub subscription: String,
    pub renewal: String,
    pub achievements: Vec<String>,
}

impl AccountStatus {
    pub fn achievements_label(&self) -> String {
        if self.achievements.is_empty() {
            String::from("No badges earned yet")
        } else {
            self.achievements.join(", ")
        }
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus {
            subscription: String::from("Free Plan"),
            renewal: String::from("N/A"),
            achievements: Vec::new(),
        }
    }
}

/// Unsaved, session-local snapshot of the user's editable profile
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub form: ProfileForm,
    pub date_of_birth: String,
    /// None until the user picks a type
    pub user_type: Option<UserType>,
    /// Kept when the type switches away from organization; only hidden
    pub admin_name: String,
    pub gamification: Gamification,
    pub account: AccountStatus,
}

impl ProfileDraft {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.form.first_name, self.form.last_name)
            .trim()
            .to_string()
    }

    pub fn is_organization(&self) -> bool {
        self.user_type == Some(UserType::Organization)
    }

    pub fn admin_name_visible(&self) -> bool {
        self.is_organization()
    }

    /// Label under the name in the drawer; an unset type reads as individual
    pub fn user_type_label(&self) -> &'static str {
        if self.is_organization() {
            UserType::Organization.label()
        } else {
            UserType::Individual.label()
        }
    }

    /// Date of birth formatted for display; falls back to the raw text
    pub fn date_of_birth_display(&self) -> String {
        match NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d") {
            Ok(date) => date.format("%-d %B %Y").to_string(),
            Err(_) => self.date_of_birth.clone(),
        }
    }

    pub fn to_submission(&self, picture: Option<&str>) -> ProfileSubmission {
        ProfileSubmission {
            form: self.form.clone(),
            date_of_birth: self.date_of_birth.clone(),
            user_type: self.user_type,
            admin_name: self
                .admin_name_visible()
                .then(|| self.admin_name.clone()),
            picture: picture.map(String::from),
        }
    }
}

/// Payload handed to the profile-update collaborator
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    #[serde(flatten)]
    pub form: ProfileForm,
    pub date_of_birth: String,
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_first_and_last() {
        let mut draft = ProfileDraft::default();
        assert_eq!(draft.full_name(), "");
        draft.form.first_name = "Ada".into();
        draft.form.last_name = "Lovelace".into();
        assert_eq!(draft.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!("organization".parse::<UserType>().unwrap(), UserType::Organization);
        assert_eq!(" Individual ".parse::<UserType>().unwrap(), UserType::Individual);
        assert!("company".parse::<UserType>().is_err());
    }

    #[test]
    fn test_user_type_labels_outlive_the_value() {
        let draft = ProfileDraft {
            user_type: Some(UserType::Organization),
            ..ProfileDraft::default()
        };
        let label: &'static str = match draft.user_type {
            Some(t) => t.label(),
            None => "",
        };
        assert_eq!(label, "Organization");
        assert_eq!(UserType::Individual.as_str(), "individual");
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::from_name(field.name()), Some(field));
        }
        assert_eq!(ProfileField::from_name("nickname"), None);
    }

    #[test]
    fn test_unset_user_type_reads_as_individual() {
        let draft = ProfileDraft::default();
        assert_eq!(draft.user_type_label(), "Individual");
        assert!(!draft.admin_name_visible());
    }

    #[test]
    fn test_gamification_progress_is_clamped() {
        assert_eq!(Gamification::new(0, 1, 250).level_progress, 100);
        assert_eq!(Gamification::default().progress_ratio(), 0.6);
    }

    #[test]
    fn test_date_of_birth_display() {
        let mut draft = ProfileDraft::default();
        draft.date_of_birth = "1815-12-10".into();
        assert_eq!(draft.date_of_birth_display(), "10 December 1815");
        draft.date_of_birth = "sometime".into();
        assert_eq!(draft.date_of_birth_display(), "sometime");
    }

    #[test]
    fn test_submission_drops_hidden_admin_name() {
        let mut draft = ProfileDraft::default();
        draft.admin_name = "Grace".into();
        draft.user_type = Some(UserType::Individual);
        assert_eq!(draft.to_submission(None).admin_name, None);

        draft.user_type = Some(UserType::Organization);
        let json = serde_json::to_value(draft.to_submission(Some("me.png"))).unwrap();
        assert_eq!(json["adminName"], "Grace");
        assert_eq!(json["userType"], "organization");
        assert_eq!(json["firstName"], "");
        assert_eq!(json["picture"], "me.png");
    }
}
