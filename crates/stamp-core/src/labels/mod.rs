//! Label pipeline: extract declared labels, merge the precedence tiers, sanitize for the remote API.
mod error;
pub use error::PolicyError;

mod policy;
pub use policy::LabelPolicy;

mod extract;
pub use extract::LabelExtractor;

mod merge;
pub use merge::{LabelEntry, LabelSet, merge, merge_with_invocation};

mod sanitize;
pub use sanitize::{LabelSanitizer, SanitizeReport, is_label_char};

mod annotation;
pub use annotation::caller_labels_from_annotation;

mod pipeline;
pub use pipeline::LabelPipeline;
