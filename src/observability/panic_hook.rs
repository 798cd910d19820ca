//! Panic hook that prints a short crash report.
//!
//! A panic in the calculation core is a bug: the models are meant to turn
//! every malformed input into zeros. The report names the version, the
//! active tracing span and the panic location so it can be filed as-is.

use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";

/// Install the crash-report panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "GAPMAP CRASH REPORT".to_string(),
        RULE.to_string(),
        format!("  Version:  {}", VERSION),
        format!("  Platform: {}", std::env::consts::OS),
        format!("  Panic:    {}", truncate(&extract_panic_message(info), 68)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("  Span:     {}", truncate(metadata.name(), 68)));
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push(RULE.to_string());
        lines.push(std::backtrace::Backtrace::capture().to_string());
    } else {
        lines.push("  Run with RUST_BACKTRACE=1 for stack trace".to_string());
    }
    lines.push(RULE.to_string());
    lines.join("\n")
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

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("this is a long message", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("€€€€€€", 5), "€€...");
    }
}
