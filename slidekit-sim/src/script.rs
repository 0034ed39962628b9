//! Line-based simulator scripts.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! next
//! wait 400
//! go 3
//! drag 400 100
//! resize 1024
//! wait 150
//! info
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use slidekit_core::{Control, GoTarget, Key, PointerKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Go(GoTarget),
    /// Document-level key press.
    Key(Key),
    /// Click on a prev/next control.
    Control(Control),
    /// Key press on the focused controls.
    ControlsKey(Key),
    Nav(usize),
    /// Press, move along the axis, release.
    Drag {
        kind: PointerKind,
        from: f64,
        to: f64,
    },
    Click,
    Wait(Duration),
    /// Deliver the pending end-of-transition event now.
    End,
    Resize(f64),
    Play,
    Pause,
    Hover(bool),
    Hidden(bool),
    Info,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Go(target) => write!(f, "go {target}"),
            Step::Key(key) => write!(f, "key {key:?}"),
            Step::Control(control) => write!(f, "control {control:?}"),
            Step::ControlsKey(key) => write!(f, "controls-key {key:?}"),
            Step::Nav(nav) => write!(f, "nav {nav}"),
            Step::Drag { kind, from, to } => write!(f, "{kind:?} drag {from} -> {to}"),
            Step::Click => f.write_str("click"),
            Step::Wait(d) => write!(f, "wait {}", d.as_millis()),
            Step::End => f.write_str("end"),
            Step::Resize(width) => write!(f, "resize {width}"),
            Step::Play => f.write_str("play"),
            Step::Pause => f.write_str("pause"),
            Step::Hover(entered) => write!(f, "hover {}", if *entered { "in" } else { "out" }),
            Step::Hidden(hidden) => f.write_str(if *hidden { "hide" } else { "show" }),
            Step::Info => f.write_str("info"),
        }
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty step".into());
        };
        let args: Vec<&str> = words.collect();
        let arg = |i: usize| nth_arg(&args, verb, i);
        let number = |i: usize| nth_number(&args, verb, i);

        let step = match verb {
            "next" | "prev" | "first" | "last" => Step::Go(parse_target(verb)?),
            "go" => Step::Go(parse_target(arg(0)?)?),
            "key" => Step::Key(parse_key(arg(0)?)?),
            "control" => Step::Control(match arg(0)? {
                "prev" => Control::Prev,
                "next" => Control::Next,
                other => return Err(format!("unknown control `{other}`")),
            }),
            "controls-key" => Step::ControlsKey(parse_key(arg(0)?)?),
            "nav" => {
                let raw = arg(0)?;
                Step::Nav(
                    raw.parse()
                        .map_err(|_| format!("`{raw}` is not a nav index"))?,
                )
            }
            "drag" | "swipe" => Step::Drag {
                kind: if verb == "drag" {
                    PointerKind::Mouse
                } else {
                    PointerKind::Touch
                },
                from: number(0)?,
                to: number(1)?,
            },
            "click" => Step::Click,
            "wait" => {
                let ms = number(0)?;
                if ms < 0.0 {
                    return Err("wait must not be negative".into());
                }
                Step::Wait(Duration::from_millis(ms as u64))
            }
            "end" => Step::End,
            "resize" => Step::Resize(number(0)?),
            "play" => Step::Play,
            "pause" => Step::Pause,
            "hover" => Step::Hover(match arg(0)? {
                "in" => true,
                "out" => false,
                other => return Err(format!("hover takes `in` or `out`, got `{other}`")),
            }),
            "hide" => Step::Hidden(true),
            "show" => Step::Hidden(false),
            "info" => Step::Info,
            other => return Err(format!("unknown step `{other}`")),
        };
        Ok(step)
    }
}

fn nth_arg<'a>(args: &[&'a str], verb: &str, i: usize) -> Result<&'a str, String> {
    args.get(i)
        .copied()
        .ok_or_else(|| format!("`{verb}` needs {} argument(s)", i + 1))
}

fn nth_number(args: &[&str], verb: &str, i: usize) -> Result<f64, String> {
    let raw = nth_arg(args, verb, i)?;
    raw.parse::<f64>()
        .map_err(|_| format!("`{raw}` is not a number"))
}

fn parse_target(raw: &str) -> Result<GoTarget, String> {
    raw.parse::<GoTarget>().map_err(|err| err.to_string())
}

/// Key names use the serialized form: `left`, `pageUp`, `home`, ...
fn parse_key(raw: &str) -> Result<Key, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown key `{raw}`"))
}

/// Parse a whole script, skipping blank lines and comments.
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = line.parse().map_err(|message| ScriptError {
            line: i + 1,
            message,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_and_skips_comments() {
        let steps = parse(
            "# warm up\nnext\n\ngo -2   # negative targets clamp\nkey pageDown\nswipe 300 40\nwait 250\n",
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Go(GoTarget::Next),
                Step::Go(GoTarget::Index(-2)),
                Step::Key(Key::PageDown),
                Step::Drag {
                    kind: PointerKind::Touch,
                    from: 300.0,
                    to: 40.0
                },
                Step::Wait(Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn errors_carry_the_line_number() {
        let err = parse("next\nfly away\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unknown step"));

        let err = parse("go\n").unwrap_err();
        assert!(err.to_string().starts_with("line 1:"));

        assert!(parse("key sideways").is_err());
        assert!(parse("go NaN").is_err());
    }
}
