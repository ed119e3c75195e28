//! Handing the registration SMS to the operating system.

use std::process::Command;
use std::thread;
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Error raised when the SMS app could not be opened.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No usable phone number.
    #[error("Phone number cannot be empty")]
    EmptyNumber,

    /// The system opener could not be started.
    #[error("Failed to start SMS opener '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Launcher-specific failure.
    #[error("Failed to open SMS app: {0}")]
    Other(String),
}

/// Opens the platform SMS composer with a number and a prefilled body.
///
/// Any `Fn(&str, &str) -> Result<(), LaunchError>` closure is a launcher,
/// which keeps test doubles short.
pub trait SmsLauncher: Send + Sync {
    /// Open the SMS app addressed to `phone_number` with `message_body` prefilled.
    fn open_sms_app(&self, phone_number: &str, message_body: &str) -> Result<(), LaunchError>;
}

impl<F> SmsLauncher for F
where
    F: Fn(&str, &str) -> Result<(), LaunchError> + Send + Sync,
{
    fn open_sms_app(&self, phone_number: &str, message_body: &str) -> Result<(), LaunchError> {
        self(phone_number, message_body)
    }
}

/// How the body is attached to an `sms:` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsUriStyle {
    /// `sms:<number>?body=...` (Android and most desktop handlers).
    Query,
    /// `sms:<number>&body=...` (Apple platforms).
    Ampersand,
}

impl SmsUriStyle {
    /// Style expected by the platform this binary was built for.
    pub fn for_current_platform() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Self::Ampersand
        } else {
            Self::Query
        }
    }

    fn separator(&self) -> char {
        match self {
            Self::Query => '?',
            Self::Ampersand => '&',
        }
    }
}

/// Build an `sms:` URI. The body is percent-encoded (spaces become `%20`).
///
/// ```rust
/// use sms_verify_sdk::launcher::{SmsUriStyle, sms_uri};
///
/// assert_eq!(
///     sms_uri("+15550100", "tb_verify_1 ok", SmsUriStyle::Query),
///     "sms:+15550100?body=tb_verify_1%20ok"
/// );
/// ```
pub fn sms_uri(phone_number: &str, message_body: &str, style: SmsUriStyle) -> String {
    let number: String = phone_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!(
        "sms:{}{}body={}",
        number,
        style.separator(),
        urlencoding::encode(message_body)
    )
}

/// Launcher that passes an `sms:` URI to the desktop opener
/// (`open`, `xdg-open` or `cmd /C start`).
#[derive(Debug, Clone, Copy)]
pub struct SystemSmsLauncher {
    style: SmsUriStyle,
}

impl Default for SystemSmsLauncher {
    fn default() -> Self {
        Self {
            style: SmsUriStyle::for_current_platform(),
        }
    }
}

impl SystemSmsLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the URI style.
    pub fn with_style(mut self, style: SmsUriStyle) -> Self {
        self.style = style;
        self
    }

    fn command(uri: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", uri]);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            cmd
        }
    }
}

impl SmsLauncher for SystemSmsLauncher {
    fn open_sms_app(&self, phone_number: &str, message_body: &str) -> Result<(), LaunchError> {
        if phone_number.trim().is_empty() {
            return Err(LaunchError::EmptyNumber);
        }

        let uri = sms_uri(phone_number, message_body, self.style);
        let command = Self::command(&uri);
        let program = command.get_program().to_string_lossy().into_owned();

        #[cfg(feature = "tracing")]
        debug!(program = %program, "Opening SMS app");

        spawn_and_reap(command, program).map(|_| ())
    }
}

/// Start `command` and reap the child on a background thread.
fn spawn_and_reap(
    mut command: Command,
    program: String,
) -> Result<thread::JoinHandle<()>, LaunchError> {
    let mut child = command
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

    thread::Builder::new()
        .name("sms-opener-reaper".to_string())
        .spawn(move || {
            if let Err(_e) = child.wait() {
                #[cfg(feature = "tracing")]
                debug!(program = %program, error = %_e, "Failed to wait for SMS opener");
            }
        })
        .map_err(|e| LaunchError::Other(format!("failed to start reaper thread: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_sms_uri_styles() {
        assert_eq!(
            sms_uri("+1 555 0100", "hello", SmsUriStyle::Query),
            "sms:+15550100?body=hello"
        );
        assert_eq!(
            sms_uri("+15550100", "hello", SmsUriStyle::Ampersand),
            "sms:+15550100&body=hello"
        );
    }

    #[test]
    fn test_sms_uri_encodes_body() {
        assert_eq!(
            sms_uri("123", "a b&c=d", SmsUriStyle::Query),
            "sms:123?body=a%20b%26c%3Dd"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_opener_is_reaped() {
        let reaper = spawn_and_reap(Command::new("true"), "true".to_string()).unwrap();
        reaper.join().unwrap();
    }

    #[test]
    fn test_spawn_failure_names_program() {
        let err = spawn_and_reap(
            Command::new("definitely-not-an-sms-opener"),
            "definitely-not-an-sms-opener".to_string(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::Spawn { ref program, .. } if program == "definitely-not-an-sms-opener"
        ));
    }

    #[test]
    fn test_closure_launcher() {
        let seen = Mutex::new(Vec::new());
        let launcher = |number: &str, body: &str| {
            seen.lock()
                .unwrap()
                .push((number.to_string(), body.to_string()));
            Ok::<(), LaunchError>(())
        };

        launcher.open_sms_app("+1", "code").unwrap();
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[("+1".to_string(), "code".to_string())]
        );
    }

    #[test]
    fn test_system_launcher_rejects_empty_number() {
        let err = SystemSmsLauncher::new().open_sms_app("  ", "body").unwrap_err();
        assert!(matches!(err, LaunchError::EmptyNumber));
    }
}
