use crate::error::{GalleryError, Result};
use std::process::{Command, Stdio};

/// The OS command that hands `target` (a URL or file path) to the default viewer.
/// - macOS: `open`
/// - Linux: `xdg-open`
/// - Windows: `cmd /C start`
pub fn viewer_command(target: &str) -> Result<(String, Vec<String>)> {
    #[cfg(target_os = "macos")]
    {
        Ok(("open".to_string(), vec![target.to_string()]))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(("xdg-open".to_string(), vec![target.to_string()]))
    }

    #[cfg(target_os = "windows")]
    {
        Ok((
            "cmd".to_string(),
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                target.to_string(),
            ],
        ))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = target;
        Err(GalleryError::Api(
            "Opening a viewer is not supported on this platform".to_string(),
        ))
    }
}

pub fn open_in_viewer(target: &str) -> Result<()> {
    let (program, args) = viewer_command(target)?;

    let status = Command::new(&program)
        .args(&args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| GalleryError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(GalleryError::Api(format!("{} exited with error", program)))
    }
}
