//! The allocation core: category-to-program mapping, per-employee tax and
//! deduction allocation, and reconciliation against the stated grand totals.

mod allocator;
mod mapping;
mod reporter;

pub use allocator::{EmployeeAllocation, ProgramLine, allocate_employee};
pub use mapping::{build_program_buckets, map_category};
pub use reporter::{accumulate, build_report, reconcile};
