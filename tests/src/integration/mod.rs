//! Cross-subsystem flows driven through `probe_runtime::ProbeRuntime` with
//! scripted and static adapters.

pub mod fixtures;
mod report_flow;
mod visit_persistence;
