use serde::Deserialize;
use validator::Validate;

use crate::features::schemas::validate_not_blank;

/// Body of `POST` and `PUT`; `PUT` only touches the fields it carries.
#[derive(Deserialize, Validate, Default, Debug)]
#[serde(default)]
pub struct NotificationIn {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
}
