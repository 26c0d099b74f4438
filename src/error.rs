use core::fmt;

/// Errors returned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The command frame could not be written to the serial port.
    WriteFailure,
    /// The serial port failed while reading a telemetry frame.
    ReadFailure,
    /// The radar rejected the command, or its acknowledgement was too short or malformed.
    CommandFailed,
    /// An argument was outside the range accepted by the radar. No I/O was performed.
    InvalidArg,
    /// The command value does not fit in a command frame.
    FrameTooLarge,
    /// A telemetry frame failed validation and should be discarded.
    Decode(DecodeError),
}

/// Reasons a telemetry frame is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    MissingHeader,
    MissingTail,
    WrongLength,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteFailure => f.write_str("failed to write to serial port"),
            Error::ReadFailure => f.write_str("failed to read from serial port"),
            Error::CommandFailed => f.write_str("command rejected by radar"),
            Error::InvalidArg => f.write_str("invalid argument"),
            Error::FrameTooLarge => f.write_str("command value too large for frame"),
            Error::Decode(e) => write!(f, "telemetry frame corrupted: {}", e),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingHeader => f.write_str("report header missing"),
            DecodeError::MissingTail => f.write_str("report tail missing"),
            DecodeError::WrongLength => f.write_str("not 30 bytes long"),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}
