//! Developer Tooling: scene inspector for diagnostic output.
//!
//! # Invariants
//! - Inspection is read-only.

mod inspector;

pub use inspector::{BodyInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "planarvis-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
