//! Progress bar styling options.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_BAR_WITH_POSITION.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
            enabled: true,
            clear: false,
        }
    }
}

impl ProgressBarOpts {
    /// Template representing the bar, its position and the last file handled.
    ///
    ///`███████████████████████████████████████ 11/12 (91%) eta 00:00:02 0011_xyz.jpeg`
    pub const TEMPLATE_BAR_WITH_POSITION: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue} {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    /// Return `true` if the bar will be drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::default_bar().template(&template) {
                Ok(s) => style = s,
                Err(e) => warn!(error = %e, "Ignoring invalid progress template"),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar() {
        let pb = ProgressBarOpts::hidden().to_progress_bar(10);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_bar_length() {
        let pb = ProgressBarOpts::default().to_progress_bar(42);
        assert_eq!(pb.length(), Some(42));
    }

    #[test]
    fn test_invalid_template_falls_back() {
        let opts = ProgressBarOpts::new(Some("{bar:".into()), None, true, false);
        let pb = opts.to_progress_bar(3);
        assert_eq!(pb.length(), Some(3));
    }
}
