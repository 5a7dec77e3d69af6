//! Structured crash report on panic.

use super::context::{current_context, ReportContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

/// Install the crash-report panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = current_context();

    eprintln!();
    eprintln!("{}", RULE);
    eprintln!("HEALTHHIVE CRASH REPORT");
    eprintln!("{}", RULE);
    eprintln!("  Version:  {}", VERSION);
    eprintln!("  Platform: {}", std::env::consts::OS);
    eprintln!("  Time:     {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("  Panic:    {}", truncate(&extract_panic_message(info), 120));
    if let Some(location) = info.location() {
        eprintln!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
    for line in context_lines(&context) {
        eprintln!("  {}", line);
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("  Run with RUST_BACKTRACE=1 for stack trace");
    }
    eprintln!("{}", RULE);
}

fn context_lines(context: &ReportContext) -> Vec<String> {
    let mut lines = Vec::new();
    match context.command {
        Some(command) => lines.push(format!("Command:  {}", command)),
        None => lines.push("Command:  (not set - crash occurred during startup)".to_string()),
    }
    if let Some(snapshot) = &context.snapshot {
        lines.push(format!("Snapshot: {}", snapshot.display()));
    }
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
