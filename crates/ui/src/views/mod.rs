mod blocks;
mod chrome;
mod guide;
mod scripts;
mod section;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use blocks::{CheckboxTask, CodeBlock, ContentBlockView};
pub use chrome::{GuideHeader, Sidebar};
pub use guide::{GuidePage, GuideView};
pub use section::SectionPage;
pub use state::{ViewError, ViewState, view_state_from_resource};
