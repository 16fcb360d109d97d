//! Client detection
//!
//! Finds the external programs a launch needs in `PATH`.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::rdp::{RdpClient, RdpClientKind, RdpClientPreference};

/// FreeRDP binaries in order of preference (3.x before 2.x)
const FREERDP_BINARIES: [&str; 2] = ["xfreerdp3", "xfreerdp"];

/// rdesktop binary
const RDESKTOP_BINARY: &str = "rdesktop";

/// Finds a binary in PATH. A name containing `/` is checked as a path.
#[must_use]
pub fn which_binary(binary: &str) -> Option<PathBuf> {
    if binary.contains('/') {
        let path = Path::new(binary);
        return path.is_file().then(|| path.to_path_buf());
    }

    let output = Command::new("which").arg(binary).output().ok()?;
    if output.status.success() {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let path = path_str.trim();
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    None
}

/// Resolves the RDP client for `preference`, asking `installed` about each
/// candidate binary.
pub fn detect_rdp_client_with<F>(preference: RdpClientPreference, installed: F) -> Option<RdpClient>
where
    F: Fn(&str) -> bool,
{
    let freerdp = || {
        FREERDP_BINARIES
            .iter()
            .find(|b| installed(**b))
            .map(|b| RdpClient::new(RdpClientKind::FreeRdp, *b))
    };
    let rdesktop = || {
        installed(RDESKTOP_BINARY)
            .then(|| RdpClient::new(RdpClientKind::Rdesktop, RDESKTOP_BINARY))
    };

    match preference {
        RdpClientPreference::Auto => freerdp().or_else(rdesktop),
        RdpClientPreference::Xfreerdp => freerdp(),
        RdpClientPreference::Rdesktop => rdesktop(),
    }
}
