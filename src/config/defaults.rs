use crate::config::types::*;
use crate::family::FamilyKind;

impl Default for Migration {
    fn default() -> Self {
        Self {
            family: FamilyKind::Chain,
            reject_unknown_versions: false,
        }
    }
}
