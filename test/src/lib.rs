pub mod fixtures;
pub mod local_harness;

pub use fixtures::{
    components::{ProbeComponent, ProbeLog},
    resources::{ball, level, sample_loader},
    scripts::{CountingScript, ScriptTicks},
};
pub use local_harness::LocalHarness;
