//! Bind identity template expansion.
//!
//! The bind template is a format string in which `%s` and `%u` both stand
//! for the username being authenticated and `%%` stands for a literal `%`.
//! Expansion is bounded by [`MAX_IDENTITY_SIZE`], the host framework's
//! maximum message size; the bound is a hard contract checked before every
//! append, so an oversized expansion fails outright and is never truncated.

use thiserror::Error;
use tracing::warn;

/// Maximum size in bytes of an expanded bind identity.
pub const MAX_IDENTITY_SIZE: usize = 512;

/// Errors that can occur while expanding a bind template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The expansion would exceed [`MAX_IDENTITY_SIZE`].
    #[error("expanded bind identity would exceed {MAX_IDENTITY_SIZE} bytes")]
    CapacityExceeded,
    /// The username accessor could not supply a username.
    #[error("username unavailable during template expansion")]
    UsernameUnavailable,
}

/// Expands `template`, substituting the username obtained from `username`
/// for each `%s`/`%u` directive.
///
/// A `%%` directive yields one literal `%`, and a `%` at the end of the
/// template expands to nothing. Any other character after `%` is not a
/// directive: a warning is emitted and both the `%` and the character pass
/// through as literal text.
///
/// # Errors
///
/// Returns [`TemplateError::CapacityExceeded`] if the output would exceed
/// [`MAX_IDENTITY_SIZE`] at any point, or
/// [`TemplateError::UsernameUnavailable`] if the accessor returns `None`
/// mid-expansion. No partial result is returned on failure.
pub fn expand_template<F>(template: &str, mut username: F) -> Result<String, TemplateError>
where
    F: FnMut() -> Option<String>,
{
    let mut output = String::new();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        push_checked(&mut output, &rest[..pos])?;
        let after = &rest[pos + 1..];

        rest = match after.chars().next() {
            Some('s') | Some('u') => {
                let name = username().ok_or(TemplateError::UsernameUnavailable)?;
                push_checked(&mut output, &name)?;
                &after[1..]
            }
            Some('%') => {
                push_checked(&mut output, "%")?;
                &after[1..]
            }
            // Trailing percent expands to nothing.
            None => after,
            Some(other) => {
                warn!("unexpected format character: {other}");
                push_checked(&mut output, "%")?;
                // The unrecognized character flows through as literal text.
                after
            }
        };
    }

    push_checked(&mut output, rest)?;
    Ok(output)
}

fn push_checked(output: &mut String, piece: &str) -> Result<(), TemplateError> {
    if output.len() + piece.len() > MAX_IDENTITY_SIZE {
        return Err(TemplateError::CapacityExceeded);
    }
    output.push_str(piece);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Option<String> {
        Some("alice".to_string())
    }

    #[test]
    fn template_without_directives_is_verbatim() {
        let expanded = expand_template("cn=service,dc=example,dc=com", alice).unwrap();
        assert_eq!(expanded, "cn=service,dc=example,dc=com");
    }

    #[test]
    fn substitutes_username_for_s_and_u() {
        let expanded = expand_template("uid=%u,ou=people,dc=example,dc=com", alice).unwrap();
        assert_eq!(expanded, "uid=alice,ou=people,dc=example,dc=com");

        let expanded = expand_template("uid=%s,ou=people,dc=example,dc=com", alice).unwrap();
        assert_eq!(expanded, "uid=alice,ou=people,dc=example,dc=com");
    }

    #[test]
    fn substitutes_every_occurrence() {
        let expanded = expand_template("%u+%s", alice).unwrap();
        assert_eq!(expanded, "alice+alice");
    }

    #[test]
    fn double_percent_is_literal_percent() {
        let expanded = expand_template("cn=admin%%,dc=x", alice).unwrap();
        assert_eq!(expanded, "cn=admin%,dc=x");

        let expanded = expand_template("%%%u%%", alice).unwrap();
        assert_eq!(expanded, "%alice%");
    }

    #[test]
    fn trailing_percent_expands_to_nothing() {
        let expanded = expand_template("uid=alice%", alice).unwrap();
        assert_eq!(expanded, "uid=alice");
    }

    // Unrecognized directives are kept as literal text rather than failing
    // the expansion; see DESIGN.md for the rationale behind this choice.
    #[test]
    fn unrecognized_directive_passes_through_as_literal_text() {
        let expanded = expand_template("uid=%x,dc=example", alice).unwrap();
        assert_eq!(expanded, "uid=%x,dc=example");
    }

    #[test]
    fn expansion_is_idempotent() {
        let first = expand_template("uid=%u,dc=example,dc=com", alice).unwrap();
        let second = expand_template("uid=%u,dc=example,dc=com", alice).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn username_unavailable_fails() {
        let err = expand_template("uid=%u", || None).unwrap_err();
        assert_eq!(err, TemplateError::UsernameUnavailable);
    }

    #[test]
    fn username_not_requested_for_literal_templates() {
        let expanded = expand_template("cn=static", || None).unwrap();
        assert_eq!(expanded, "cn=static");
    }

    #[test]
    fn expansion_filling_the_ceiling_exactly_succeeds() {
        let template = "a".repeat(MAX_IDENTITY_SIZE);
        let expanded = expand_template(&template, alice).unwrap();
        assert_eq!(expanded.len(), MAX_IDENTITY_SIZE);
    }

    #[test]
    fn one_byte_over_the_ceiling_fails() {
        let template = "a".repeat(MAX_IDENTITY_SIZE + 1);
        let err = expand_template(&template, alice).unwrap_err();
        assert_eq!(err, TemplateError::CapacityExceeded);
    }

    #[test]
    fn substitution_respects_the_ceiling() {
        // 507 literal bytes + "alice" lands exactly on the ceiling.
        let template = format!("{}%u", "a".repeat(MAX_IDENTITY_SIZE - 5));
        let expanded = expand_template(&template, alice).unwrap();
        assert_eq!(expanded.len(), MAX_IDENTITY_SIZE);

        let template = format!("{}%u", "a".repeat(MAX_IDENTITY_SIZE - 4));
        let err = expand_template(&template, alice).unwrap_err();
        assert_eq!(err, TemplateError::CapacityExceeded);
    }

    #[test]
    fn literal_percent_respects_the_ceiling() {
        let template = format!("{}%%", "a".repeat(MAX_IDENTITY_SIZE));
        let err = expand_template(&template, alice).unwrap_err();
        assert_eq!(err, TemplateError::CapacityExceeded);
    }

    #[test]
    fn empty_template_expands_to_empty() {
        let expanded = expand_template("", alice).unwrap();
        assert_eq!(expanded, "");
    }
}
