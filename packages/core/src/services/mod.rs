//! Business Services
//!
//! The hierarchy-maintenance logic layered over the document store:
//!
//! - `TreeService` - write/read orchestration and the deletion policy
//! - `path_maintainer` - the pre-write path state machine and its plans
//! - `tree_assembler` - flat-list to nested-tree conversion
//!
//! Services coordinate between the store layer and the pure path/assembly
//! logic, sequencing the writes that keep path invariants intact.

pub mod error;
pub mod path_maintainer;
pub mod tree_assembler;
pub mod tree_service;

pub use error::TreeError;
pub use path_maintainer::{build_plan, PathAction, PathPlan, PathRewrite, WriteIntent};
pub use tree_assembler::{assemble, AssembleArgs};
pub use tree_service::{
    ChildrenQueryArgs, DeleteBehavior, TreeConfig, TreeQueryArgs, TreeService,
};
