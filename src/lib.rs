#![cfg_attr(not(test), no_std)]

use core::fmt;

use embedded_io_async::{Read, Write};
use heapless::Vec;
use log::{debug, error, warn};

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod encoding;
pub use encoding::{decode_sign_magnitude16, encode_sign_magnitude16, intra_frame_length};
use encoding::{read_i16_le, read_i32_le};

mod frame;
pub use frame::*;

mod report;
pub use report::*;

mod zone;
pub use zone::*;

/// Represents an HLK-LD2450 radar sensor.
///
/// Commands are correlated with their acknowledgement only by ordering, so
/// every command takes `&mut self`: at most one command is in flight on the
/// serial port at a time.
///
/// # Type Parameters
///
/// * `Serial`: The type of the serial interface used to communicate with the radar.
///   It must implement `embedded_io_async::Read` and `embedded_io_async::Write`.
///   Bounding blocking reads with a timeout is the responsibility of this type.
pub struct Ld2450<Serial> {
    serial: Serial,
    config: Config,
}

/// Firmware version reported by the radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub firmware_type: i16,
    pub major: i16,
    pub minor: i32,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}.{}.{}", self.firmware_type, self.major, self.minor)
    }
}

/// Bluetooth MAC address of the radar, as the 12 characters it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress([u8; 12]);

impl MacAddress {
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Validated as UTF-8 on construction.
        core::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = Error;

    fn try_from(raw: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 12] = raw.try_into().map_err(|_| Error::CommandFailed)?;
        core::str::from_utf8(&bytes).map_err(|_| Error::CommandFailed)?;
        Ok(MacAddress(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S> Ld2450<S>
where
    S: Read + Write,
{
    /// Creates a new `Ld2450` radar instance.
    ///
    /// # Arguments
    ///
    /// * `serial`: The serial interface for communication with the radar.
    /// * `config`: The configuration applied by [`Ld2450::init`].
    pub fn new(serial: S, config: Config) -> Self {
        Self { serial, config }
    }

    /// Releases the serial interface.
    pub fn release(self) -> S {
        self.serial
    }

    /// Applies the configuration to the radar.
    ///
    /// This involves:
    /// - Enabling configuration mode.
    /// - Setting the tracking mode.
    /// - Setting the bluetooth state (effective after a restart).
    /// - Ending configuration mode, even if one of the previous steps failed.
    pub async fn init(&mut self) -> Result<(), Error> {
        self.enable_configuration_mode().await.map_err(|e| {
            error!("Failed to enter configuration mode during init: {:?}", e);
            e
        })?;

        let applied = self.apply_config().await;
        let ended = self.end_configuration_mode().await;

        applied.map_err(|e| {
            error!("Failed to apply {:?} during init: {:?}", self.config, e);
            e
        })?;
        ended.map_err(|e| {
            error!("Failed to leave configuration mode during init: {:?}", e);
            e
        })?;

        debug!("LD2450 init sequence complete.");
        Ok(())
    }

    async fn apply_config(&mut self) -> Result<(), Error> {
        self.set_tracking_mode(self.config.tracking).await?;
        self.bluetooth_setup(self.config.bluetooth).await
    }

    /// Sends a raw command frame and reads the acknowledgement up to the command tail.
    ///
    /// `intra_frame_length` is written as given and must equal `2 + command_value.len()`
    /// little-endian (see [`intra_frame_length`]).
    ///
    /// Returns the raw acknowledgement and whether its status field reports success.
    /// Bytes queued ahead of the acknowledgement (telemetry streamed before
    /// configuration mode was entered) are skipped up to the last command header.
    /// A read that ends before the tail (end of stream, read error, timeout in the
    /// serial layer) yields the bytes accumulated so far; a response too short to
    /// carry a status is reported as unsuccessful.
    ///
    /// # Errors
    ///
    /// * `Error::FrameTooLarge` if the value does not fit in a command frame.
    /// * `Error::WriteFailure` if the frame could not be written.
    pub async fn send_command(
        &mut self,
        intra_frame_length: [u8; 2],
        command_word: [u8; 2],
        command_value: &[u8],
    ) -> Result<(Response, bool), Error> {
        let command = encode_command(intra_frame_length, command_word, command_value)?;
        self.write(&command).await?;

        let response: Response = self
            .read_until(Some(&COMMAND_HEADER[..]), &COMMAND_TAIL)
            .await;
        let success = command_succeeded(&response);
        if response.len() < PAYLOAD_OFFSET {
            warn!(
                "Short reply to command {:02X?} ({} bytes): {:02X?}",
                command_word,
                response.len(),
                &response[..]
            );
        }
        debug!(
            "Reply to command {:02X?} (success: {}): {:02X?}",
            command_word, success, &response[..]
        );
        Ok((response, success))
    }

    // Sends a command built from its word and value and returns the acknowledgement payload.
    async fn exec(&mut self, command_word: [u8; 2], command_value: &[u8]) -> Result<Response, Error> {
        let (response, success) = self
            .send_command(
                intra_frame_length(command_value.len())?,
                command_word,
                command_value,
            )
            .await?;
        if success {
            Ok(response)
        } else {
            error!(
                "Command {:02X?} rejected, reply: {:02X?}",
                command_word, &response[..]
            );
            Err(Error::CommandFailed)
        }
    }

    /// Enters configuration mode. Other commands are only accepted in this mode.
    pub async fn enable_configuration_mode(&mut self) -> Result<(), Error> {
        debug!("Enabling configuration mode (CMD 0x00FF)");
        self.exec(CMD_ENABLE_CONFIGURATION, &[0x01, 0x00]).await?;
        Ok(())
    }

    /// Leaves configuration mode and resumes telemetry reporting.
    pub async fn end_configuration_mode(&mut self) -> Result<(), Error> {
        debug!("Ending configuration mode (CMD 0x00FE)");
        self.exec(CMD_END_CONFIGURATION, &[]).await?;
        Ok(())
    }

    /// Sets the tracking mode.
    pub async fn set_tracking_mode(&mut self, mode: TrackingMode) -> Result<(), Error> {
        debug!("Setting tracking mode to: {:?}", mode);
        let word = match mode {
            TrackingMode::Single => CMD_SINGLE_TARGET_TRACKING,
            TrackingMode::Multi => CMD_MULTI_TARGET_TRACKING,
        };
        self.exec(word, &[]).await?;
        self.config.tracking = mode;
        Ok(())
    }

    /// Queries the tracking mode.
    ///
    /// # Returns
    ///
    /// * `Ok(TrackingMode)` containing the current mode.
    /// * `Err(Error::CommandFailed)` if the command was rejected or the reply was malformed.
    pub async fn query_tracking_mode(&mut self) -> Result<TrackingMode, Error> {
        debug!("Querying tracking mode (CMD 0x0091)");
        let response = self.exec(CMD_QUERY_TRACKING_MODE, &[]).await?;
        let raw = read_i16_le(response_payload(&response), 0).ok_or(Error::CommandFailed)?;
        let mode = TrackingMode::from_raw(raw).ok_or_else(|| {
            warn!("query_tracking_mode: Unknown mode indicator {}", raw);
            Error::CommandFailed
        })?;
        debug!("Queried tracking mode: {:?}", mode);
        Ok(mode)
    }

    /// Reads the firmware version. Its `Display` form is `V{type}.{major}.{minor}`.
    pub async fn read_firmware_version(&mut self) -> Result<FirmwareVersion, Error> {
        debug!("Reading firmware version (CMD 0x00A0)");
        let response = self.exec(CMD_READ_FIRMWARE_VERSION, &[]).await?;
        let payload = response_payload(&response);
        let version = FirmwareVersion {
            firmware_type: read_i16_le(payload, 0).ok_or(Error::CommandFailed)?,
            major: read_i16_le(payload, 2).ok_or(Error::CommandFailed)?,
            minor: read_i32_le(payload, 4).ok_or(Error::CommandFailed)?,
        };
        debug!("Firmware version: {}", version);
        Ok(version)
    }

    /// Sets the radar's serial baud rate, effective after a restart.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidArg` if `bps` is not one of [`SUPPORTED_BAUD_RATES`]. Nothing is sent.
    /// * `Error::CommandFailed` if the radar rejected the command.
    pub async fn set_baud_rate(&mut self, bps: u32) -> Result<(), Error> {
        let rate = BaudRate::try_from(bps).map_err(|e| {
            error!("Baud rate {} is not supported: {:?}", bps, SUPPORTED_BAUD_RATES);
            e
        })?;
        debug!("Setting baud rate to: {} (index {})", bps, rate.index());
        self.exec(CMD_SET_BAUD_RATE, &rate.index().to_le_bytes())
            .await?;
        Ok(())
    }

    /// Restores the factory settings, effective after a restart.
    pub async fn restore_factory_settings(&mut self) -> Result<(), Error> {
        debug!("Restoring factory settings (CMD 0x00A2)");
        self.exec(CMD_RESTORE_FACTORY_SETTINGS, &[]).await?;
        self.config = Config::default();
        Ok(())
    }

    /// Restarts the radar module.
    pub async fn restart_module(&mut self) -> Result<(), Error> {
        debug!("Restarting module (CMD 0x00A3)");
        self.exec(CMD_RESTART_MODULE, &[]).await?;
        Ok(())
    }

    /// Enables or disables bluetooth, effective after a restart.
    pub async fn bluetooth_setup(&mut self, state: BluetoothState) -> Result<(), Error> {
        debug!("Setting bluetooth to: {:?}", state);
        let value = match state {
            BluetoothState::Enabled => [0x01, 0x00],
            BluetoothState::Disabled => [0x00, 0x00],
        };
        self.exec(CMD_BLUETOOTH_SETUP, &value).await?;
        self.config.bluetooth = state;
        Ok(())
    }

    /// Reads the bluetooth MAC address.
    pub async fn get_mac_address(&mut self) -> Result<MacAddress, Error> {
        debug!("Getting MAC address (CMD 0x00A5)");
        let response = self.exec(CMD_GET_MAC_ADDRESS, &[0x01, 0x00]).await?;
        let raw = response_payload(&response)
            .get(..12)
            .ok_or(Error::CommandFailed)?;
        let mac = MacAddress::try_from(raw)?;
        debug!("MAC address: {}", mac);
        Ok(mac)
    }

    /// Queries the zone filtering configuration.
    pub async fn query_zone_filtering(&mut self) -> Result<ZoneFilter, Error> {
        debug!("Querying zone filtering (CMD 0x00C1)");
        let response = self.exec(CMD_QUERY_ZONE_FILTERING, &[]).await?;
        let filter = ZoneFilter::decode(response_payload(&response))?;
        debug!("Zone filtering: {:?}", filter);
        Ok(filter)
    }

    /// Sets the zone filtering configuration.
    pub async fn set_zone_filtering(&mut self, filter: &ZoneFilter) -> Result<(), Error> {
        debug!("Setting zone filtering to: {:?}", filter);
        self.exec(CMD_SET_ZONE_FILTERING, &filter.encode()).await?;
        Ok(())
    }

    /// Reads bytes up to and including the next report tail.
    ///
    /// The chunk is not validated; pass it to [`decode_report`] or use
    /// [`Ld2450::read_targets`].
    pub async fn read_report_frame(&mut self) -> Result<Vec<u8, REPORT_CAPACITY>, Error> {
        let frame: Vec<u8, REPORT_CAPACITY> = self.read_until(None, &REPORT_TAIL).await;
        if frame.is_empty() {
            return Err(Error::ReadFailure);
        }
        Ok(frame)
    }

    /// Reads and decodes the next telemetry frame.
    ///
    /// `Err(Error::Decode(_))` means the chunk was corrupted: discard it and
    /// call again to resynchronise on the next tail.
    pub async fn read_targets(&mut self) -> Result<[Target; TARGET_COUNT], Error> {
        let frame = self.read_report_frame().await?;
        decode_report(&frame).map_err(|e| {
            warn!("Discarding telemetry frame ({}): {:02X?}", e, &frame[..]);
            Error::Decode(e)
        })
    }

    async fn write(&mut self, command: &[u8]) -> Result<(), Error> {
        debug!("Executing command: {:02X?}", command);
        self.serial
            .write_all(command)
            .await
            .map_err(|_| Error::WriteFailure)?;
        self.serial.flush().await.map_err(|_| Error::WriteFailure)?; // Ensure data is sent
        Ok(())
    }

    // Reads one byte at a time until the buffer ends with `marker`, so nothing past the
    // marker is consumed. When `sync` is given the buffer restarts at each occurrence of it,
    // dropping whatever preceded it. A full buffer drops its oldest byte and keeps reading.
    // Stops early on end of stream or read error.
    async fn read_until<const N: usize>(
        &mut self,
        sync: Option<&[u8]>,
        marker: &[u8],
    ) -> Vec<u8, N> {
        let mut buffer: Vec<u8, N> = Vec::new();
        let mut byte = [0u8; 1];
        let mut dropped = 0usize;

        loop {
            match self.serial.read(&mut byte).await {
                Ok(0) => {
                    debug!("End of stream after {} bytes", buffer.len());
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "Serial read error after {} bytes: {:?}",
                        buffer.len(),
                        embedded_io_async::Error::kind(&e)
                    );
                    break;
                }
            }

            if buffer.is_full() {
                buffer.remove(0);
                dropped += 1;
            }
            // Capacity was just made available.
            let _ = buffer.push(byte[0]);

            if let Some(sync) = sync {
                if buffer.len() > sync.len() && buffer.ends_with(sync) {
                    dropped += buffer.len() - sync.len();
                    buffer.clear();
                    let _ = buffer.extend_from_slice(sync);
                }
            }
            if buffer.ends_with(marker) {
                break;
            }
        }

        if dropped > 0 {
            debug!("Skipped {} bytes before {:02X?}", dropped, &buffer[..]);
        }
        buffer
    }
}
