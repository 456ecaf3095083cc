//! # Error Tests
//!
//! Checks that error messages name the offending values.

use vcsim_core::common::error::{ConfigError, TraceError};

#[test]
fn set_bits_error_names_parameters() {
    let err = ConfigError::SetBitsTooLarge { c: 10, b: 6, s: 5 };
    let msg = err.to_string();
    assert!(msg.contains("2^10"), "{msg}");
    assert!(msg.contains("C < B + S"), "{msg}");
}

#[test]
fn limit_errors_report_bounds() {
    let err = ConfigError::TotalBitsTooLarge { got: 41, max: 40 };
    assert_eq!(err.to_string(), "total size bits must be at most 40 (got C=41)");

    let err = ConfigError::VictimBitsTooLarge { got: 21, max: 20 };
    assert_eq!(err.to_string(), "victim bits must be at most 20 (got V=21)");
}

#[test]
fn trace_errors_report_line_numbers() {
    let err = TraceError::UnknownOperation {
        line: 12,
        op: "x".to_owned(),
    };
    assert_eq!(err.to_string(), "line 12: unknown operation 'x'");

    let err = TraceError::BadAddress {
        line: 3,
        text: "0xzz".to_owned(),
    };
    assert_eq!(err.to_string(), "line 3: bad address '0xzz'");
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = TraceError::from(io);
    assert!(matches!(err, TraceError::Io(_)));
}
