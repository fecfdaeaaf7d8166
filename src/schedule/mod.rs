pub mod types;
pub mod pool;
pub mod rotation;
pub mod picker;
pub mod treasures;
pub mod ministry;
pub mod christian_living;
pub mod planner;

pub use types::{Candidate, LastServed, Meeting, PoolIndex, RoleQueue, Section, UsedInMeeting};
pub use pool::build_pool_index;
pub use rotation::{select_next, Selection};
pub use picker::MeetingPicker;
pub use planner::{plan_meeting, plan_meetings};
