use crate::constants::SUPPORTED_BAUD_RATES;
use crate::error::Error;

/// Represents the target tracking mode of the LD2450 radar.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TrackingMode {
    /// Only the strongest target is tracked.
    Single,
    /// Up to three targets are tracked.
    Multi,
}

impl TrackingMode {
    /// The mode indicator used in tracking mode query replies.
    pub fn as_raw(self) -> i16 {
        match self {
            TrackingMode::Single => 1,
            TrackingMode::Multi => 2,
        }
    }

    pub fn from_raw(raw: i16) -> Option<TrackingMode> {
        match raw {
            1 => Some(TrackingMode::Single),
            2 => Some(TrackingMode::Multi),
            _ => None,
        }
    }
}

/// Represents whether the radar's bluetooth radio is enabled.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum BluetoothState {
    Enabled,
    Disabled,
}

/// Serial baud rates supported by the radar.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
    B230400,
    B256000,
    B460800,
}

impl BaudRate {
    const ALL: [BaudRate; 8] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
        BaudRate::B230400,
        BaudRate::B256000,
        BaudRate::B460800,
    ];

    /// Position of the rate in the supported set, as sent on the wire.
    pub fn index(self) -> u16 {
        self as u16
    }

    /// Bits per second.
    pub fn bps(self) -> u32 {
        SUPPORTED_BAUD_RATES[self as usize]
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        SUPPORTED_BAUD_RATES
            .iter()
            .position(|&rate| rate == bps)
            .map(|i| BaudRate::ALL[i])
            .ok_or(Error::InvalidArg)
    }
}

/// Configuration settings for the LD2450 radar.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// The target tracking mode.
    pub tracking: TrackingMode,
    /// The bluetooth radio state.
    pub bluetooth: BluetoothState,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `tracking` - The `TrackingMode` for the radar.
    /// * `bluetooth` - The `BluetoothState` for the radar.
    pub fn new(tracking: TrackingMode, bluetooth: BluetoothState) -> Config {
        Config {
            tracking,
            bluetooth,
        }
    }
    /// Sets the tracking mode for the configuration.
    pub fn tracking(mut self, tracking: TrackingMode) -> Self {
        self.tracking = tracking;
        self
    }
    /// Sets the bluetooth state for the configuration.
    pub fn bluetooth(mut self, bluetooth: BluetoothState) -> Self {
        self.bluetooth = bluetooth;
        self
    }
}

/// Provides default configuration values for the LD2450 radar.
impl Default for Config {
    /// Returns the factory configuration: multi-target tracking with bluetooth enabled.
    fn default() -> Config {
        Config {
            tracking: TrackingMode::Multi,
            bluetooth: BluetoothState::Enabled,
        }
    }
}
