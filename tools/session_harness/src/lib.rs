//! Line-oriented replay of shop and plot effect commands against a
//! [`GameSession`], shared by the `session_harness` binary and tests.

use std::io::Write;

use anyhow::{Context, Result};
use quest_core::{execute_command, parse_command_line, GameSession, RoboticonArt, RoboticonShop};
use serde_json::json;

/// Art names written into the shop view of each report line.
pub fn script_art() -> RoboticonArt<&'static str> {
    RoboticonArt {
        uncustomised: "roboticon",
        energy: "roboticon_energy",
        ore: "roboticon_ore",
        food: "roboticon_food",
        empty: "none",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub executed: usize,
    pub rejected: usize,
}

/// Runs every command in `script`, writing one JSON object per command to `out`.
///
/// Blank lines and `#` comments are skipped. A parse error always aborts; a
/// rejected command aborts only when `strict` is set, otherwise it is reported
/// as an `error` line and replay continues.
pub fn replay_script<W: Write>(
    session: &mut GameSession,
    shop: &mut RoboticonShop<&'static str>,
    script: &str,
    strict: bool,
    out: &mut W,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let command = parse_command_line(line)
            .with_context(|| format!("Failed to parse line {}: '{}'", line_no, line))?;

        let report = match execute_command(session, shop, command) {
            Ok(outcome) => {
                summary.executed += 1;
                json!({
                    "line": line_no,
                    "command": line,
                    "result": outcome,
                    "shop": shop.view(),
                })
            }
            Err(err) if !strict => {
                summary.rejected += 1;
                json!({
                    "line": line_no,
                    "command": line,
                    "error": err.to_string(),
                })
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Command on line {} rejected", line_no));
            }
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    }

    Ok(summary)
}
