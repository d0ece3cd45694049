use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct SavedSearchIn {
    pub user_id: Option<String>,
    pub search_term: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct SavedSearchOwner {
    pub user_id: Option<String>,
}
