//! User-facing collaborators: dialogs, choosers, the metadata view and
//! the platform URL opener.
//!
//! All prompts are modal from the bridge's point of view: a call blocks
//! until the user answers, and there is no timeout.

use std::path::PathBuf;

/// Outcome of a yes/no prompt. Exactly two sentinels; the script-facing
/// encoding is `"OK"` / `"NO"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Ok,
    No,
}

impl Confirm {
    pub fn as_str(self) -> &'static str {
        match self {
            Confirm::Ok => "OK",
            Confirm::No => "NO",
        }
    }
}

/// Modal interaction with the user.
pub trait UserInteraction {
    /// Informational notification; never fails.
    fn show_message(&self, title: &str, message: &str);

    /// Error notification; never fails.
    fn show_error(&self, title: &str, message: &str);

    /// Blocking yes/no prompt.
    fn confirm(&self, title: &str, message: &str) -> Confirm;

    /// Blocking directory chooser; `None` when the user cancels.
    fn choose_directory(&self) -> Option<PathBuf>;

    /// Open a URL with the platform's default handler; fire-and-forget.
    fn open_url(&self, url: &str);

    /// Toggle the host's busy indication around long-running work.
    fn set_busy(&self, busy: bool);
}

/// Reusable modal metadata view. The bridge constructs a single
/// instance lazily on first use and re-presents it afterwards.
pub trait MetadataView {
    fn present(&mut self, layer_name: &str, metadata_url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_sentinels_are_stable() {
        assert_eq!(Confirm::Ok.as_str(), "OK");
        assert_eq!(Confirm::No.as_str(), "NO");
    }
}
