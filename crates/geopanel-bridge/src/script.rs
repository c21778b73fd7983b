//! One-way calls back into the embedded panel content.
//!
//! These are fire-and-forget notifications, not return values: the host
//! glue translates each [`ScriptCall`] into a script-function invocation
//! inside the embedded view.

/// Calls the bridge pushes back into the embedded script context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCall {
    /// Hand the persisted password to the panel.
    SetPassword(String),
    /// Hand the persisted user name to the panel.
    SetUser(String),
    /// Hand the (possibly updated) download folder to the panel.
    SetDownloadFolder(String),
    /// Continuation fired after `setCredentials` completes.
    SubmitUser,
}

/// Sink for script-side continuations.
pub trait ScriptHost {
    fn push(&self, call: ScriptCall);
}
