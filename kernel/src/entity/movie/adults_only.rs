use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct AdultsOnly(bool);

impl AdultsOnly {
    pub fn new(flag: impl Into<bool>) -> Self {
        Self(flag.into())
    }
}
