use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Combinable fault and warning flags.
    ///
    /// Bit values match the classic MGRS status codes, so `bits()` can be
    /// handed to callers that expect the integer contract.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Status: u32 {
        const LATITUDE = 0x0001;
        const LONGITUDE = 0x0002;
        const STRING = 0x0004;
        const PRECISION = 0x0008;
        const SEMI_MAJOR_AXIS = 0x0010;
        const FLATTENING = 0x0020;
        const EASTING = 0x0040;
        const NORTHING = 0x0080;
        const ZONE = 0x0100;
        const HEMISPHERE = 0x0200;
        /// Non-fatal: the result is usable but lies outside the nominal band.
        const LATITUDE_WARNING = 0x0400;
    }
}

impl Status {
    /// Flags that may accompany a successful result.
    pub const WARNINGS: Status = Status::LATITUDE_WARNING;

    /// True if any flag other than a warning is set.
    pub fn is_fatal(self) -> bool {
        !self.difference(Self::WARNINGS).is_empty()
    }

    fn describe(flag: Status) -> &'static str {
        match flag {
            Status::LATITUDE => "latitude out of range",
            Status::LONGITUDE => "longitude out of range",
            Status::STRING => "malformed MGRS string",
            Status::PRECISION => "precision out of range",
            Status::SEMI_MAJOR_AXIS => "invalid ellipsoid semi-major axis",
            Status::FLATTENING => "invalid ellipsoid flattening",
            Status::EASTING => "easting out of range",
            Status::NORTHING => "northing out of range",
            Status::ZONE => "zone out of range",
            Status::HEMISPHERE => "invalid hemisphere",
            Status::LATITUDE_WARNING => "latitude outside nominal band",
            _ => "unknown fault",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no error");
        }
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(Self::describe(flag))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MgrsError {
    #[error("Invalid ellipsoid parameters: {0}")]
    Ellipsoid(Status),

    #[error("Conversion failed: {0}")]
    Conversion(Status),
}

impl MgrsError {
    pub fn status(&self) -> Status {
        match self {
            MgrsError::Ellipsoid(s) | MgrsError::Conversion(s) => *s,
        }
    }

    /// Raw bit-flag status code.
    pub fn code(&self) -> u32 {
        self.status().bits()
    }

    /// Fold extra flags (typically warnings from an earlier stage) into the error.
    pub fn with(self, extra: Status) -> Self {
        match self {
            MgrsError::Ellipsoid(s) => MgrsError::Ellipsoid(s | extra),
            MgrsError::Conversion(s) => MgrsError::Conversion(s | extra),
        }
    }
}

/// A successful conversion plus any non-fatal flags raised on the way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub status: Status,
}

impl<T> Converted<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            status: Status::empty(),
        }
    }

    pub fn with_status(value: T, status: Status) -> Self {
        Self { value, status }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            value: f(self.value),
            status: self.status,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status.is_empty()
    }

    /// Raw bit-flag status code (zero on a clean result).
    pub fn code(&self) -> u32 {
        self.status.bits()
    }
}

pub type ConvResult<T> = Result<Converted<T>, MgrsError>;

/// Turn accumulated validation flags into an error if any are set.
pub(crate) fn check(status: Status) -> Result<(), MgrsError> {
    if status.is_empty() {
        Ok(())
    } else {
        Err(MgrsError::Conversion(status))
    }
}
