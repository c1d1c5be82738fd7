use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sync_logging::{sync_debug, sync_info};

use crate::persist::{write_file_atomic, PersistError, WriteOutcome};

pub const CATEGORY_FILENAME: &str = "_category_.json";

/// Sidebar descriptor written into every mirrored folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub label: String,
    pub position: i32,
    pub link: CategoryLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

impl CategoryDescriptor {
    /// Descriptor for `label`; `{label}` in `description_template` is substituted.
    pub fn new(label: &str, description_template: &str) -> Self {
        Self {
            label: label.to_string(),
            position: 0,
            link: CategoryLink {
                kind: "generated-index".to_string(),
                description: description_template.replace("{label}", label),
            },
        }
    }
}

/// Writes `descriptor` into `dir` unless an equal descriptor is already there.
///
/// An unreadable or unparsable existing file is overwritten.
pub fn materialize_category(
    dir: &Path,
    descriptor: &CategoryDescriptor,
) -> Result<WriteOutcome, PersistError> {
    let path = dir.join(CATEGORY_FILENAME);
    let wanted = serde_json::to_value(descriptor).map_err(io_error)?;

    if let Ok(existing) = fs::read_to_string(&path) {
        match serde_json::from_str::<serde_json::Value>(&existing) {
            Ok(current) if current == wanted => {
                sync_info!("No changes in {} at {}", CATEGORY_FILENAME, dir.display());
                return Ok(WriteOutcome::Unchanged);
            }
            Ok(_) => {}
            Err(err) => sync_debug!("Replacing unparsable {}: {}", path.display(), err),
        }
    }

    let json = serde_json::to_string_pretty(&wanted).map_err(io_error)?;
    write_file_atomic(&path, json.as_bytes())?;
    sync_info!("Wrote {} at {}", CATEGORY_FILENAME, dir.display());
    Ok(WriteOutcome::Written)
}

fn io_error(err: serde_json::Error) -> PersistError {
    PersistError::Io(std::io::Error::other(err))
}
