use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct CategoryIn {
    pub title: Option<String>,
}
