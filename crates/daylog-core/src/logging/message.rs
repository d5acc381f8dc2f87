//! Message composition: positional templates and error details
//!
//! Templates use numbered placeholders: `{0}`, `{1}`, and so on. A placeholder
//! may carry an alignment, `{0,8}` (right-aligned) or `{0,-8}` (left-aligned).
//! Literal braces are written `{{` and `}}`. Format strings after a colon
//! (`{0:N2}`) are rejected.

use std::error::Error;
use std::fmt::{Display, Write};

use super::error::{LogError, LogResult};

/// Widest alignment a placeholder may request
const MAX_ALIGNMENT: u64 = u16::MAX as u64;

/// Render a positional template against an ordered list of values
pub fn render_template(template: &str, values: &[&dyn Display]) -> LogResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let end = loop {
                    match chars.next() {
                        Some((i, '}')) => break i,
                        Some((_, '{')) | None => {
                            return Err(LogError::format(format!(
                                "unclosed placeholder at byte {} in {:?}",
                                pos, template
                            )))
                        }
                        Some(_) => {}
                    }
                };
                write_placeholder(&mut out, &template[pos + 1..end], values)?;
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(LogError::format(format!(
                        "unescaped '}}' at byte {} in {:?}",
                        pos, template
                    )));
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

fn write_placeholder(out: &mut String, spec: &str, values: &[&dyn Display]) -> LogResult<()> {
    if spec.contains(':') {
        return Err(LogError::format(format!(
            "format strings are not supported: {{{}}}",
            spec
        )));
    }

    let (index, alignment) = match spec.split_once(',') {
        Some((index, alignment)) => (index, Some(alignment)),
        None => (spec, None),
    };

    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| LogError::format(format!("invalid placeholder {{{}}}", spec)))?;
    let value = values.get(index).ok_or_else(|| {
        LogError::format(format!(
            "placeholder {{{}}} has no value ({} given)",
            index,
            values.len()
        ))
    })?;

    let mut text = String::new();
    write!(text, "{}", value)
        .map_err(|_| LogError::format(format!("value for {{{}}} failed to format", index)))?;

    let width = match alignment {
        None => 0,
        Some(alignment) => alignment
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|width| width.unsigned_abs() <= MAX_ALIGNMENT)
            .ok_or_else(|| LogError::format(format!("invalid alignment in {{{}}}", spec)))?,
    };

    let fill = (width.unsigned_abs() as usize).saturating_sub(text.chars().count());
    if width > 0 {
        out.extend(std::iter::repeat(' ').take(fill));
    }
    out.push_str(&text);
    if width < 0 {
        out.extend(std::iter::repeat(' ').take(fill));
    }
    Ok(())
}

/// Message followed by the error's one-line summary
///
/// This is what the main log file receives.
pub fn short_form(message: &str, err: &dyn Error) -> String {
    format!("{}\r\n{}", message, err)
}

/// Message followed by the error's full detail and cause chain
///
/// This is what the error file receives.
pub fn extended_form(message: &str, err: &dyn Error) -> String {
    let mut out = format!("{}\r\n{:?}", message, err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\r\nCaused by: {}", cause);
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_render_positional() {
        let rendered = render_template("failed op {0} after {1} tries", &[&"X", &3]).unwrap();
        assert_eq!(rendered, "failed op X after 3 tries");

        // Reordered and repeated
        let rendered = render_template("{1}-{0}-{1}", &[&"a", &"b"]).unwrap();
        assert_eq!(rendered, "b-a-b");
    }

    #[test]
    fn test_render_escapes_and_alignment() {
        let rendered = render_template("{{{0}}}", &[&7]).unwrap();
        assert_eq!(rendered, "{7}");

        let rendered = render_template("[{0,-5}][{0,5}]", &[&"ab"]).unwrap();
        assert_eq!(rendered, "[ab   ][   ab]");
    }

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render_template("plain text", &[]).unwrap(), "plain text");
        assert_eq!(render_template("", &[&1]).unwrap(), "");
    }

    #[test]
    fn test_render_errors() {
        assert!(matches!(render_template("{1}", &[&"only one"]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0", &[&1]), Err(LogError::Format(_))));
        assert!(matches!(render_template("oops }", &[]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{x}", &[&1]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0:N2}", &[&1.5]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0,wide}", &[&1]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0,70000}", &[&"x"]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0,-70000}", &[&"x"]), Err(LogError::Format(_))));
    }

    #[test]
    fn test_alignment_limit() {
        let rendered = render_template("{0,65535}", &[&"x"]).unwrap();
        assert_eq!(rendered.len(), 65535);
        assert!(rendered.ends_with(" x"));
    }

    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    #[test]
    fn test_failing_value_is_a_format_error() {
        assert!(matches!(render_template("{0}", &[&Broken]), Err(LogError::Format(_))));
        assert!(matches!(render_template("{0,-5}", &[&Broken]), Err(LogError::Format(_))));
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "write failed")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_forms() {
        let err = io::Error::new(io::ErrorKind::Other, "disk full");

        let short = short_form("failed op X", &err);
        assert_eq!(short, "failed op X\r\ndisk full");

        let extended = extended_form("failed op X", &err);
        assert!(extended.starts_with("failed op X\r\n"));
        assert!(extended.contains("disk full"));
        assert_ne!(short, extended);
    }

    #[test]
    fn test_extended_form_walks_cause_chain() {
        let err = Wrapped(io::Error::new(io::ErrorKind::Other, "disk full"));
        let extended = extended_form("saving", &err);
        assert!(extended.ends_with("\r\nCaused by: disk full"));
        assert_eq!(short_form("saving", &err), "saving\r\nwrite failed");
    }
}
