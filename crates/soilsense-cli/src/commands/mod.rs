pub mod analyze;
pub mod batch;
pub mod policy;

use soilsense_core::error::SoilError;
use soilsense_core::rules::builtin;
use soilsense_core::rules::schema::PolicyDef;
use std::borrow::Cow;
use std::path::Path;

/// Load a custom policy file, or borrow the builtin policy when none is given.
fn resolve_policy(rules: Option<&Path>) -> Result<Cow<'static, PolicyDef>, SoilError> {
    match rules {
        Some(path) => Ok(Cow::Owned(soilsense_core::rules::load_policy(path)?)),
        None => Ok(Cow::Borrowed(builtin::default_policy())),
    }
}
