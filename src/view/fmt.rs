use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);
static STDOUT_TTY: OnceLock<bool> = OnceLock::new();
static STDERR_TTY: OnceLock<bool> = OnceLock::new();

/// Output stream a coloured line is headed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

/// `--no-color`; wins over any tty detection.
pub(crate) fn disable_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

/// Colour is used only when the target stream is a terminal and neither
/// `--no-color` nor `NO_COLOR` is set.
pub(crate) fn use_color(stream: Stream) -> bool {
    if NO_COLOR_FLAG.load(Ordering::Relaxed) || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match stream {
        Stream::Stdout => *STDOUT_TTY.get_or_init(|| atty::is(atty::Stream::Stdout)),
        Stream::Stderr => *STDERR_TTY.get_or_init(|| atty::is(atty::Stream::Stderr)),
    }
}

/// Line as it should be written to `stream`.
pub(crate) fn paint(stream: Stream, line: &str) -> Cow<'_, str> {
    if use_color(stream) {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(strip_ansi(line))
    }
}

/// Drop CSI escape sequences (`ESC [ params final`).
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        if chars.next_if_eq(&'[').is_none() {
            continue;
        }
        for c in chars.by_ref() {
            if ('@'..='~').contains(&c) {
                break;
            }
        }
    }
    out
}

macro_rules! cprintln {
    () => { println!() };
    ($($arg:tt)*) => {
        println!(
            "{}",
            $crate::view::fmt::paint($crate::view::fmt::Stream::Stdout, &format!($($arg)*))
        )
    };
}
pub(crate) use cprintln;

macro_rules! ceprintln {
    () => { eprintln!() };
    ($($arg:tt)*) => {
        eprintln!(
            "{}",
            $crate::view::fmt::paint($crate::view::fmt::Stream::Stderr, &format!($($arg)*))
        )
    };
}
pub(crate) use ceprintln;

pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const CYAN: &str = "\x1b[36m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";

/// Pluralize a count for status lines.
pub(crate) fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}
