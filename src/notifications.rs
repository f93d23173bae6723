/// Desktop notifications. Only macOS is implemented.

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a count-down runs out
pub fn notify_countdown_finished(minutes: f64) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {:.2} minutes done" with title "studylog - Time's up""#,
            minutes
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = minutes;
    }
}
