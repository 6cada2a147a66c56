mod block;
mod guide;
mod ids;
mod section;
mod state;

pub use block::{BlockError, CalloutVariant, ContentBlock, DEFAULT_CODE_LANGUAGE, Step};
pub use guide::{Guide, GuideDraft, GuideError};
pub use ids::{ParseIdError, SectionId, TaskId};
pub use section::{Section, SectionDraft, SectionError, Task};
pub use state::{SectionProgress, SessionState, percent};
