use custom_error::custom_error;
use std::io;

custom_error! {pub FingerprintError
    MalformedHeader{detail: String}
        = "malformed WAV header: {detail}",
    IncompleteWindow{expected: usize, actual: usize}
        = "incomplete sample window: expected {expected} samples, got {actual}",
    FileOpen{path: String, cause: io::Error}
        = "cannot open {path}: {cause}",
    ReadFailed{cause: io::Error}
        = "read failed: {cause}",
    WriteFailed{cause: io::Error}
        = "fingerprint write failed: {cause}",
    BadConfig{detail: String}
        = "invalid fingerprint configuration: {detail}"
}
