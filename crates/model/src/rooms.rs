use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum Space {
    #[serde(rename = "Palace 1")]
    #[strum(serialize = "Palace 1")]
    Palace1,
    #[serde(rename = "Palace 2")]
    #[strum(serialize = "Palace 2")]
    Palace2,
}
