//! Source control: selecting the tag a version was released from and the
//! repository a descriptor points at.

pub mod origin;
pub mod tag;

pub use origin::normalize_scm_url;
pub use tag::{resolve_tag, ResolvedTag, TagCandidates, TagMapping, TagResolver};
