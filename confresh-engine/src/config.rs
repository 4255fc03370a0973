//! Bootstrap configuration for the refresh engine.

use confresh_types::DocumentId;

/// Naming inputs read once from the environment or bootstrap configuration.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// The process's application name; the identifier stem when no explicit
    /// prefix is configured.
    pub application_name: String,
    /// Explicit identifier prefix; overrides the application name when
    /// non-blank.
    pub prefix: String,
    /// Active profile name.
    pub profile: String,
    /// Remote document file extension, e.g. `yml` or `json`.
    pub file_extension: String,
    /// Subscription group.
    pub group: String,
}

impl RefreshConfig {
    /// The remote document identifier for these inputs. Computed once at
    /// subscription time, not per push.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        DocumentId::from_naming(
            &self.prefix,
            &self.application_name,
            &self.profile,
            &self.file_extension,
        )
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            application_name: String::new(),
            prefix: String::new(),
            profile: String::new(),
            file_extension: "yml".to_string(),
            group: "DEFAULT_GROUP".to_string(),
        }
    }
}
