mod labels;
pub use labels::Labels;

mod tier;
pub use tier::LabelTier;

mod invocation;
pub use invocation::InvocationId;

mod constants;
pub use constants::{
    COMPILED_CODE_KEY, DECLARED_LABELS_KEY, DEFAULT_INVOCATION_LABEL_KEY, DEFAULT_MAX_LABEL_LEN,
    DEFAULT_MAX_LABELS, METADATA_LABELS_KEY,
};
