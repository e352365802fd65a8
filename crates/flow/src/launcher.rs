//! Default OS hand-off for desktop hosts.

use payswitch_types::{HostLauncher, SwitchError, SwitchRequest, traits::Result};

/// Opens destination URLs with the system's default handler via the `open`
/// crate.
///
/// Companion-app launches are platform-specific (app identifiers, intent
/// mechanisms), so this launcher reports them unavailable; mobile hosts
/// supply their own [`HostLauncher`].
pub struct SystemLauncher;

impl HostLauncher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url)
            .map_err(|e| SwitchError::DestinationUnavailable(format!("failed to open browser: {e}")))
    }

    fn companion_available(&self, _app_id: &str) -> bool {
        false
    }

    fn launch_companion(&self, app_id: &str, _request: &SwitchRequest) -> Result<()> {
        Err(SwitchError::DestinationUnavailable(format!(
            "no companion-app launcher on this platform: {app_id}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payswitch_types::{Destination, Slot};

    #[test]
    fn test_companion_launch_unavailable() {
        let launcher = SystemLauncher;
        assert!(!launcher.companion_available("com.venmo"));
        let request =
            SwitchRequest::new(Slot::Venmo, Destination::CompanionApp("com.venmo".into()));
        let err = launcher.launch_companion("com.venmo", &request).unwrap_err();
        assert!(matches!(err, SwitchError::DestinationUnavailable(_)));
    }
}
