//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger, the global
//! logger slot and the pipeline_* macros.

use crate::log::{CapturingLogger, DefaultLogger, Log, LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::Pipeline".to_string(),
        message: format!("{:?} message", severity),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_file_line() {
    let entry = entry(LogSeverity::Error, Some("compiler.rs"), Some(42));
    assert_eq!(entry.source, "galaxy3d::Pipeline");
    assert_eq!(entry.file, Some("compiler.rs"));
    assert_eq!(entry.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let entry1 = entry(LogSeverity::Warn, None, None);
    let entry2 = entry1.clone();
    assert_eq!(entry1.severity, entry2.severity);
    assert_eq!(entry1.message, entry2.message);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Both branches (with and without file:line) must not panic
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("test.rs"), Some(7)));
    }
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<CapturingLogger>();
}

// ============================================================================
// GLOBAL SLOT + MACROS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_routes_macros() {
    let capture = CapturingLogger::install();

    crate::pipeline_debug!("galaxy3d::Test", "debug {}", 1);
    crate::pipeline_info!("galaxy3d::Test", "info {}", 2);
    crate::pipeline_warn!("galaxy3d::Test", "warn {}", 3);

    assert!(capture.messages(LogSeverity::Debug).contains(&"debug 1".to_string()));
    assert!(capture.messages(LogSeverity::Info).contains(&"info 2".to_string()));
    assert!(capture.messages(LogSeverity::Warn).contains(&"warn 3".to_string()));

    Log::reset_logger();
}

#[test]
#[serial]
fn test_error_macro_records_location() {
    let capture = CapturingLogger::install();

    crate::pipeline_error!("galaxy3d::Test", "boom");

    let entries = capture.entries.lock().unwrap();
    let boom = entries.iter().find(|e| e.message == "boom").unwrap();
    assert_eq!(boom.severity, LogSeverity::Error);
    assert_eq!(boom.source, "galaxy3d::Test");
    assert!(boom.file.is_some());
    assert!(boom.line.is_some());
    drop(entries);

    Log::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_capture() {
    let capture = CapturingLogger::install();
    Log::reset_logger();

    crate::pipeline_warn!("galaxy3d::Test", "goes to stdout");
    assert!(!capture.messages(LogSeverity::Warn).contains(&"goes to stdout".to_string()));
}
