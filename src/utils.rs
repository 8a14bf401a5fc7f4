use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Splits a command line into words.
///
/// Whitespace separates words, except inside a pair of matching `"` or `'`
/// quotes. A quote only opens a quoted section at the start of a word, so
/// apostrophes inside words (`Don't`) stay literal. Quote characters are
/// dropped; an unterminated quote runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None if (c == '"' || c == '\'') && current.is_empty() => {
                quote = Some(c);
                in_token = true;
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

/// Clamps a requested volume into the 0..=100 range the API accepts.
pub fn clamp_volume(percent: i64) -> u32 {
    percent.clamp(0, 100) as u32
}

/// Computes a seek target from the current position, clamped to the track.
pub fn seek_target(progress_ms: u64, duration_ms: u64, delta_secs: i64) -> u64 {
    let target = progress_ms as i64 + delta_secs * 1000;
    let upper = if duration_ms == 0 {
        i64::MAX
    } else {
        duration_ms as i64
    };
    target.clamp(0, upper) as u64
}

/// Joins artist names the way they are shown everywhere: `A, B, C`.
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
