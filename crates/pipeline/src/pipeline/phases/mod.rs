// Recipe discovery phases, in execution order.

#[path = "01_layout.rs"]
pub mod layout;
#[path = "02_requirement.rs"]
pub mod requirement;
#[path = "03_tag.rs"]
pub mod tag;
#[path = "04_assemble.rs"]
pub mod assemble;
