use serde::{Deserialize, Serialize};

use crate::record::impl_record;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub mobile_number: String,
    pub preferences: Vec<String>,
}

impl_record!(Guest, "guest");
