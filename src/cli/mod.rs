pub mod orchestration;

pub use orchestration::{run_tag_workflow, WorkflowResult};
