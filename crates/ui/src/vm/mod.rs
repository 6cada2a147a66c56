mod guide_vm;
mod html;

pub use guide_vm::{
    BlockVm, CodeVm, GuideVm, HeaderVm, NavVm, SectionPageVm, SidebarItemVm, StepVm, TaskItemVm,
    map_sidebar,
};
pub use html::sanitize_html;
