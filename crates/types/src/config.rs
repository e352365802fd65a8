//! Host-supplied SDK configuration.

/// Configuration the host application passes into the SDK.
///
/// There is no file-backed configuration; the SDK is embedded and the host
/// owns how these values are sourced.
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    /// The custom URI scheme the host registered with the OS for return
    /// deep links (e.g. `"com.example.shop.payments"`). The full return URI
    /// is `{return_url_scheme}://{slot host literal}`.
    pub return_url_scheme: String,
    /// Whether companion-app switches also persist a durable pending
    /// record. Defaults to `true`; hosts whose companion flow cannot
    /// outlive the process may opt out, in which case slot uniqueness is
    /// still tracked in-process.
    pub persist_companion_requests: bool,
}

impl SwitchConfig {
    /// Create a config with the given return-URI scheme and defaults
    /// everywhere else.
    #[must_use]
    pub fn new(return_url_scheme: impl Into<String>) -> Self {
        Self {
            return_url_scheme: return_url_scheme.into(),
            persist_companion_requests: true,
        }
    }

    /// Opt companion-app switches out of durable persistence.
    #[must_use]
    pub fn with_in_process_companion_tracking(mut self) -> Self {
        self.persist_companion_requests = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SwitchConfig::new("app");
        assert_eq!(cfg.return_url_scheme, "app");
        assert!(cfg.persist_companion_requests);
    }

    #[test]
    fn test_in_process_companion_tracking() {
        let cfg = SwitchConfig::new("app").with_in_process_companion_tracking();
        assert!(!cfg.persist_companion_requests);
    }
}
