use serde::Deserialize;
use validator::Validate;

use crate::features::schemas::validate_not_blank;

#[derive(Deserialize, Validate, Default, Debug)]
#[serde(default)]
pub struct AdIn {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub image: Option<String>,
}
