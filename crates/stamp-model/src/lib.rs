mod domain;
pub use domain::{
    COMPILED_CODE_KEY, DECLARED_LABELS_KEY, DEFAULT_INVOCATION_LABEL_KEY, DEFAULT_MAX_LABEL_LEN,
    DEFAULT_MAX_LABELS, METADATA_LABELS_KEY,
};
pub use domain::{InvocationId, LabelTier, Labels};

mod error;
pub use error::{ModelError, ModelResult};

mod descriptor;
pub use descriptor::{ConfigBag, TaskDescriptor, TaskId};
