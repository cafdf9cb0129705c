pub mod field;
pub mod step;

pub use field::{
    CHANNEL_OPTIONS, FieldKey, FieldKind, FieldSpec, PROGRAM_DEFINITIONS, field_spec,
    group_thousands,
};
pub use step::{STEP_COUNT, STEPS, StepId, StepSpec};
