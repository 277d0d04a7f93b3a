//! Terminal styling for the startup card and CLI messages

use console::{style, Emoji};
use std::net::SocketAddr;
use std::path::Path;

pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static MODEL: Emoji<'_, '_> = Emoji("🧮 ", "");
pub static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
           _           _
     _ __ | |__   __ _| |_ ___  ___ _ ____   _____
    | '_ \| '_ \ / _` | __/ __|/ _ \ '__\ \ / / _ \
    | |_) | | | | (_| | |_\__ \  __/ |   \ V /  __/
    | .__/|_| |_|\__,_|\__|___/\___|_|    \_/ \___|
    |_|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("p̂").magenta().bold(),
        style("Batch scoring behind a single endpoint").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the server configuration card
pub fn print_config(model: &Path, bind: &SocketAddr, threshold: f64, max_body_mb: usize) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Model:  {:<39}│", MODEL, truncate_path(model, 38));
    println!("    │  {} Bind:   {:<39}│", GLOBE, bind);
    println!("    ├{}┤", line);
    println!(
        "    │  {} Event threshold:   {:<28}│",
        TARGET,
        style(format!("{:.2}", threshold)).yellow()
    );
    println!(
        "    │  {} Max body size:     {:<28}│",
        PACKAGE,
        style(format!("{} MB", max_body_mb)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the listening message once the socket is bound
pub fn print_listening(addr: &SocketAddr) {
    println!();
    println!(
        "    {} {} {}",
        ROCKET,
        style("Serving on").green().bold(),
        style(format!("http://{}", addr)).cyan().underlined()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("/a/very/long/path/model.json", 13), "...model.json");
    }
}
