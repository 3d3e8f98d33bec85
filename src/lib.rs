//! Operations toolkit: one-shot host resource snapshot reports plus the
//! directory-mirror, image build/push, and cluster image rollout commands
//! that surround them.

pub mod config;
pub mod format;
pub mod monitor;
pub mod ops;
pub mod report;
pub mod system;
