/*!
 * Run Tests
 * Top-level handler behaviour for allocation and output failures
 */

use jagged_arr::{run, AppError, ArgError, FaultPlan, Layer, MemoryManager};
use pretty_assertions::assert_eq;
use std::ffi::OsString;
use std::io::{self, Write};

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

/// Sink that accepts a fixed number of bytes, then rejects every write
struct FailingWriter {
    written: Vec<u8>,
    remaining: usize,
}

impl FailingWriter {
    fn new(limit: usize) -> Self {
        Self {
            written: Vec::new(),
            remaining: limit,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.remaining);
        self.written.extend_from_slice(&buf[..n]);
        self.remaining -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that takes every write but fails to flush
#[derive(Default)]
struct UnflushableWriter {
    written: Vec<u8>,
}

impl Write for UnflushableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "flush refused"))
    }
}

#[test]
fn test_two_cubed_output() {
    let manager = MemoryManager::new();
    let mut out = Vec::new();
    let summary = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap();

    assert_eq!(summary.allocations, 7);
    assert_eq!(summary.lines, 8);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "successfully allocated 7 times\n\
         arr[0][0][0] = 1\n\
         arr[0][0][1] = 5\n\
         arr[0][1][0] = 3\n\
         arr[0][1][1] = 15\n\
         arr[1][0][0] = 2\n\
         arr[1][0][1] = 10\n\
         arr[1][1][0] = 6\n\
         arr[1][1][1] = 30\n"
    );
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_parse_failure_allocates_nothing() {
    for (args, expected) in [
        (["arr3d", "-1", "2", "2"], ArgError::Negative { name: "x" }),
        (["arr3d", "1", "abc", "2"], ArgError::Invalid { name: "y" }),
        (
            ["arr3d", "1", "2", "123456789012345678901234567890"],
            ArgError::TooLarge { name: "z" },
        ),
    ] {
        let manager = MemoryManager::new();
        let mut out = Vec::new();
        let err = run(&os_args(&args), &manager, &mut out).unwrap_err();

        match err {
            AppError::Argument(arg) => assert_eq!(arg, expected),
            other => panic!("Expected argument error, got {other:?}"),
        }
        assert!(out.is_empty());
        assert_eq!(manager.stats().attempts, 0);
    }
}

#[test]
fn test_wrong_argument_count() {
    let manager = MemoryManager::new();
    let mut out = Vec::new();
    let err = run(&os_args(&["arr3d", "1", "2", "3", "4"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Usage { .. }));
    assert!(out.is_empty());
    assert_eq!(manager.stats().attempts, 0);
}

#[test]
fn test_allocation_failure_reports_count_first() {
    let manager = MemoryManager::with_fault(FaultPlan::OnLayer {
        layer: Layer::Inner,
        occurrence: 2,
    });
    let mut out = Vec::new();
    let err = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap_err();

    // outer, middle 0, inner (0,0), inner (0,1), middle 1
    assert_eq!(String::from_utf8(out).unwrap(), "successfully allocated 5 times\n");
    assert!(err.to_string().starts_with("array allocation: "));
    match err {
        AppError::Allocation(build) => {
            assert_eq!(build.allocations, 5);
            assert_eq!(build.layer(), Layer::Inner);
        }
        other => panic!("Expected allocation error, got {other:?}"),
    }
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_outer_failure_reports_zero() {
    let manager = MemoryManager::with_fault(FaultPlan::AtAttempt(0));
    let mut out = Vec::new();
    let err = run(&os_args(&["arr3d", "1", "1", "1"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Allocation(_)));
    assert_eq!(String::from_utf8(out).unwrap(), "successfully allocated 0 times\n");
}

#[test]
fn test_count_line_write_failure() {
    let manager = MemoryManager::new();
    let mut out = FailingWriter::new(0);
    let err = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Output(_)));
    assert_eq!(err.to_string(), "value output: sink closed");
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_element_write_failure_keeps_partial_output() {
    let header = "successfully allocated 7 times\n";
    let first = "arr[0][0][0] = 1\n";
    let manager = MemoryManager::new();
    let mut out = FailingWriter::new(header.len() + first.len());

    let err = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Output(_)));
    assert_eq!(
        String::from_utf8(out.written).unwrap(),
        format!("{header}{first}")
    );
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_flush_failure_is_output_failure() {
    let manager = MemoryManager::new();
    let mut out = UnflushableWriter::default();
    let err = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::Output(_)));
    assert_eq!(err.to_string(), "value output: flush refused");
    assert_eq!(String::from_utf8(out.written).unwrap().lines().count(), 1 + 8);
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_allocation_failure_with_closed_output_reports_both() {
    let manager = MemoryManager::with_fault(FaultPlan::OnLayer {
        layer: Layer::Inner,
        occurrence: 1,
    });
    let mut out = FailingWriter::new(0);
    let err = run(&os_args(&["arr3d", "2", "2", "2"]), &manager, &mut out).unwrap_err();

    assert_eq!(
        err.to_string(),
        "value output: sink closed\n\
         array allocation: Injected allocation failure at attempt 3 (inner layer)"
    );
    match err {
        AppError::AllocationUnreported { source, output } => {
            assert_eq!(source.allocations, 3);
            assert_eq!(output.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("Expected unreported allocation error, got {other:?}"),
    }
    assert!(out.written.is_empty());
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_allocation_failure_with_unflushable_output_reports_both() {
    let manager = MemoryManager::with_fault(FaultPlan::AtAttempt(0));
    let mut out = UnflushableWriter::default();
    let err = run(&os_args(&["arr3d", "1", "1", "1"]), &manager, &mut out).unwrap_err();

    assert!(matches!(err, AppError::AllocationUnreported { .. }));
    assert!(err.to_string().starts_with("value output: flush refused\narray allocation: "));
    assert!(manager.stats().is_balanced());
}
