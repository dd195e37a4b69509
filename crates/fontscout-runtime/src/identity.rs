//! Client identity string scoping cached results.

/// Identity of this build and platform, e.g. `fontscout/0.3.0 (linux; x86_64)`.
///
/// Cached detections are only reused for the same identity, since another
/// OS or release may resolve fonts differently.
pub fn client_identity() -> String {
    format!(
        "fontscout/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_names_platform() {
        let id = client_identity();
        assert!(id.starts_with("fontscout/"));
        assert!(id.contains(std::env::consts::OS));
        assert!(id.ends_with(&format!("{})", std::env::consts::ARCH)));
        assert!(!id.contains(':'));
    }
}
