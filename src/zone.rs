use crate::encoding::read_i16_le;
use crate::error::Error;

/// Number of 16-bit fields in a zone filter: the mode plus 3 zones of 4 coordinates.
pub const ZONE_FILTER_FIELDS: usize = 13;

/// Size of an encoded zone filter.
pub const ZONE_FILTER_LEN: usize = ZONE_FILTER_FIELDS * 2;

/// How the configured zones restrict detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZoneFilterMode {
    /// Zones are ignored.
    #[default]
    Disabled,
    /// Only targets inside a zone are reported.
    IncludeOnly,
    /// Targets inside a zone are not reported.
    Exclude,
}

impl ZoneFilterMode {
    pub fn as_raw(self) -> i16 {
        match self {
            ZoneFilterMode::Disabled => 0,
            ZoneFilterMode::IncludeOnly => 1,
            ZoneFilterMode::Exclude => 2,
        }
    }
}

impl TryFrom<i16> for ZoneFilterMode {
    type Error = Error;

    fn try_from(raw: i16) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ZoneFilterMode::Disabled),
            1 => Ok(ZoneFilterMode::IncludeOnly),
            2 => Ok(ZoneFilterMode::Exclude),
            _ => Err(Error::InvalidArg),
        }
    }
}

/// A rectangular zone given by two diagonal corners, in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zone {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

impl Zone {
    pub fn new(x1: i16, y1: i16, x2: i16, y2: i16) -> Zone {
        Zone { x1, y1, x2, y2 }
    }
}

/// Zone filtering configuration of the radar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    pub mode: ZoneFilterMode,
    pub zones: [Zone; 3],
}

impl ZoneFilter {
    pub fn new(mode: ZoneFilterMode, zones: [Zone; 3]) -> ZoneFilter {
        ZoneFilter { mode, zones }
    }

    /// The 13 fields in wire order: mode, then `x1, y1, x2, y2` of each zone.
    pub fn to_fields(&self) -> [i16; ZONE_FILTER_FIELDS] {
        let mut fields = [0i16; ZONE_FILTER_FIELDS];
        fields[0] = self.mode.as_raw();
        for (chunk, zone) in fields[1..].chunks_exact_mut(4).zip(self.zones.iter()) {
            chunk.copy_from_slice(&[zone.x1, zone.y1, zone.x2, zone.y2]);
        }
        fields
    }

    /// Builds a filter from the 13 wire fields. Fails on an unknown mode.
    pub fn from_fields(fields: &[i16; ZONE_FILTER_FIELDS]) -> Result<ZoneFilter, Error> {
        let mode = ZoneFilterMode::try_from(fields[0])?;
        let mut zones = [Zone::default(); 3];
        for (zone, c) in zones.iter_mut().zip(fields[1..].chunks_exact(4)) {
            *zone = Zone::new(c[0], c[1], c[2], c[3]);
        }
        Ok(ZoneFilter { mode, zones })
    }

    /// Packs the filter as 13 little-endian two's-complement 16-bit fields.
    pub fn encode(&self) -> [u8; ZONE_FILTER_LEN] {
        let mut out = [0u8; ZONE_FILTER_LEN];
        for (chunk, field) in out.chunks_exact_mut(2).zip(self.to_fields()) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        out
    }

    /// Reads a filter from the payload of a zone filtering query acknowledgement.
    pub fn decode(payload: &[u8]) -> Result<ZoneFilter, Error> {
        let mut fields = [0i16; ZONE_FILTER_FIELDS];
        for (i, field) in fields.iter_mut().enumerate() {
            *field = read_i16_le(payload, i * 2).ok_or(Error::CommandFailed)?;
        }
        ZoneFilter::from_fields(&fields).map_err(|_| Error::CommandFailed)
    }
}
