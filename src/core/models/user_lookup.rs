use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::core::errors::NamewatchError;

/// Which attribute of an account is watched for changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    /// The @handle.
    #[default]
    Username,
    /// The free-form display name.
    #[serde(alias = "display_name")]
    Name,
}

impl TrackedField {
    /// Pick the tracked attribute out of a looked-up user.
    pub fn extract<'a>(&self, user: &'a TwitterUser) -> &'a str {
        match self {
            TrackedField::Username => &user.username,
            TrackedField::Name => &user.name,
        }
    }
}

impl FromStr for TrackedField {
    type Err = NamewatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "username" => Ok(TrackedField::Username),
            "name" | "display_name" => Ok(TrackedField::Name),
            other => Err(NamewatchError::InvalidConfig {
                detail: format!("Unknown field '{other}'. Expected 'username' or 'name'"),
            }),
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackedField::Username => f.write_str("username"),
            TrackedField::Name => f.write_str("name"),
        }
    }
}

/// Response body of `GET /2/users/{id}`.
///
/// Unknown IDs come back as `200 OK` with `errors` and no `data`.
#[derive(Debug, Deserialize)]
pub struct UserLookupResponse {
    pub data: Option<TwitterUser>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// Subset of the user object we request via `user.fields`.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// A problem entry from the API's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_found_user() {
        let body = r#"{"data":{"id":"2244994945","name":"Dev Team","username":"devteam"}}"#;
        let resp: UserLookupResponse = serde_json::from_str(body).unwrap();
        let user = resp.data.unwrap();
        assert_eq!(TrackedField::Username.extract(&user), "devteam");
        assert_eq!(TrackedField::Name.extract(&user), "Dev Team");
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn parse_not_found_user() {
        let body = r#"{"errors":[{"value":"1","detail":"Could not find user with id: [1].","title":"Not Found Error","resource_type":"user"}]}"#;
        let resp: UserLookupResponse = serde_json::from_str(body).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors[0].title, "Not Found Error");
    }

    #[test]
    fn field_from_str() {
        assert_eq!("username".parse::<TrackedField>().unwrap(), TrackedField::Username);
        assert_eq!("Name".parse::<TrackedField>().unwrap(), TrackedField::Name);
        assert_eq!("display_name".parse::<TrackedField>().unwrap(), TrackedField::Name);
        assert!("email".parse::<TrackedField>().is_err());
    }

    #[test]
    fn config_accepts_the_same_field_names_as_the_cli() {
        #[derive(Deserialize)]
        struct Watch {
            field: TrackedField,
        }

        for (raw, expected) in [
            ("username", TrackedField::Username),
            ("name", TrackedField::Name),
            ("display_name", TrackedField::Name),
        ] {
            let watch: Watch = toml::from_str(&format!("field = \"{raw}\"")).unwrap();
            assert_eq!(watch.field, expected);
            assert_eq!(raw.parse::<TrackedField>().unwrap(), expected);
        }
    }

    #[test]
    fn field_defaults_to_username() {
        assert_eq!(TrackedField::default(), TrackedField::Username);
    }
}
