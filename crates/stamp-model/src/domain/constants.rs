//! Common model-level constants.
//!
//! Well-known keys and label limits shared by the model and the label pipeline.
//! Keeping them here avoids scattering magic strings throughout the codebase.

/// Config-bag key holding the labels declared by the task author.
///
/// The value must be an object whose values are all strings.
pub const DECLARED_LABELS_KEY: &str = "labels";

/// Config-bag key holding the compiled statement a runner submits.
pub const COMPILED_CODE_KEY: &str = "compiled_code";

/// Default label key carrying the invocation identifier.
pub const DEFAULT_INVOCATION_LABEL_KEY: &str = "dbt_invocation_id";

/// Metadata key under which the sanitized label map is attached to a remote request.
pub const METADATA_LABELS_KEY: &str = "labels";

/// Default maximum length (in characters) of a sanitized label key or value.
pub const DEFAULT_MAX_LABEL_LEN: usize = 63;

/// Default maximum number of labels on a single remote request.
pub const DEFAULT_MAX_LABELS: usize = 64;
