// COMMAND_HEADER marks the beginning of a command frame and of its acknowledgement.
pub const COMMAND_HEADER: [u8; 4] = [0xFD, 0xFC, 0xFB, 0xFA];

// COMMAND_TAIL marks the end of a command frame and of its acknowledgement.
pub const COMMAND_TAIL: [u8; 4] = [0x04, 0x03, 0x02, 0x01];

// REPORT_HEADER marks the beginning of a telemetry frame streamed by the radar.
pub const REPORT_HEADER: [u8; 4] = [0xAA, 0xFF, 0x03, 0x00];

// REPORT_TAIL marks the end of a telemetry frame.
pub const REPORT_TAIL: [u8; 2] = [0x55, 0xCC];

// A telemetry frame is header + 3 targets of 8 bytes + tail.
pub const REPORT_LEN: usize = 30;
pub const TARGET_LEN: usize = 8;
pub const TARGET_COUNT: usize = 3;

// Acknowledgement status lives at [8, 10), command specific payload starts right after.
pub const STATUS_OFFSET: usize = 8;
pub const PAYLOAD_OFFSET: usize = 10;

// Buffer capacities. The largest acknowledgement (zone filter query) is 40 bytes.
pub const COMMAND_CAPACITY: usize = 64;
pub const RESPONSE_CAPACITY: usize = 64;
pub const REPORT_CAPACITY: usize = 64;

// Command words, little-endian on the wire.
pub const CMD_ENABLE_CONFIGURATION: [u8; 2] = [0xFF, 0x00];
pub const CMD_END_CONFIGURATION: [u8; 2] = [0xFE, 0x00];
pub const CMD_SINGLE_TARGET_TRACKING: [u8; 2] = [0x80, 0x00];
pub const CMD_MULTI_TARGET_TRACKING: [u8; 2] = [0x90, 0x00];
pub const CMD_QUERY_TRACKING_MODE: [u8; 2] = [0x91, 0x00];
pub const CMD_READ_FIRMWARE_VERSION: [u8; 2] = [0xA0, 0x00];
pub const CMD_SET_BAUD_RATE: [u8; 2] = [0xA1, 0x00];
pub const CMD_RESTORE_FACTORY_SETTINGS: [u8; 2] = [0xA2, 0x00];
pub const CMD_RESTART_MODULE: [u8; 2] = [0xA3, 0x00];
pub const CMD_BLUETOOTH_SETUP: [u8; 2] = [0xA4, 0x00];
pub const CMD_GET_MAC_ADDRESS: [u8; 2] = [0xA5, 0x00];
pub const CMD_QUERY_ZONE_FILTERING: [u8; 2] = [0xC1, 0x00];
pub const CMD_SET_ZONE_FILTERING: [u8; 2] = [0xC2, 0x00];

// Baud rates accepted by the radar, ordered by the index sent on the wire.
pub const SUPPORTED_BAUD_RATES: [u32; 8] =
    [9600, 19200, 38400, 57600, 115200, 230400, 256000, 460800];
