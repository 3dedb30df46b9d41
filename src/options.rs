//! Module option parsing.

use crate::context::{HostContext, Severity};

/// Options recognized by the module, parsed once per authentication attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    uri: String,
    bind_template: String,
}

impl ModuleOptions {
    /// Parses `key=value` tokens supplied by the host framework.
    ///
    /// Tokens are folded left to right, so the last occurrence of a
    /// recognized key wins. Unrecognized tokens are reported through the
    /// diagnostic sink and ignored; parsing itself never fails.
    pub fn parse<S: AsRef<str>>(args: &[S], ctx: &dyn HostContext) -> Self {
        let mut options = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(template) = arg.strip_prefix("binddn=") {
                options.bind_template = template.to_string();
            } else if let Some(uri) = arg.strip_prefix("uri=") {
                options.uri = uri.to_string();
            } else {
                ctx.log(Severity::Error, &format!("unknown option: {arg}"));
            }
        }
        options
    }

    /// Directory endpoint URI. Empty when no `uri=` token was supplied.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Bind identity template. Empty when no `binddn=` token was supplied.
    #[must_use]
    pub fn bind_template(&self) -> &str {
        &self.bind_template
    }
}
