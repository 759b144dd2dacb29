pub mod normalize;
pub mod status;

pub use normalize::{is_valid_student_number, normalize, normalize_student_number};
pub use status::{DisplayState, StatusKind, UiStatus, RESULT_PLACEHOLDER};
