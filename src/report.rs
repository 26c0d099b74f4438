use crate::constants::*;
use crate::encoding::{read_sign_magnitude16_le, read_u16_le};
use crate::error::DecodeError;

/// One tracked target as reported by the radar.
///
/// Slots without a target are reported as all-zero fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Target {
    /// Horizontal position in mm.
    pub x: i16,
    /// Distance from the radar in mm.
    pub y: i16,
    /// Speed in cm/s.
    pub speed: i16,
    /// Distance resolution in mm.
    pub distance_resolution: u16,
}

impl Target {
    /// Whether this slot carries a target.
    pub fn is_present(&self) -> bool {
        *self != Target::default()
    }

    // Decodes an 8-byte target block. The caller guarantees the length.
    fn from_block(block: &[u8]) -> Target {
        Target {
            x: read_sign_magnitude16_le(block, 0).unwrap_or_default(),
            y: read_sign_magnitude16_le(block, 2).unwrap_or_default(),
            speed: read_sign_magnitude16_le(block, 4).unwrap_or_default(),
            distance_resolution: read_u16_le(block, 6).unwrap_or_default(),
        }
    }
}

/// Decodes a telemetry frame into its three targets, in the order assigned
/// by the radar.
///
/// Header and tail are searched anywhere in the buffer, then the length is
/// checked, so a buffer with leading garbage is reported as `WrongLength`.
pub fn decode_report(buffer: &[u8]) -> Result<[Target; TARGET_COUNT], DecodeError> {
    if !contains(buffer, &REPORT_HEADER) {
        return Err(DecodeError::MissingHeader);
    }
    if !contains(buffer, &REPORT_TAIL) {
        return Err(DecodeError::MissingTail);
    }
    if buffer.len() != REPORT_LEN {
        return Err(DecodeError::WrongLength);
    }

    let body = &buffer[REPORT_HEADER.len()..REPORT_LEN - REPORT_TAIL.len()];
    let mut targets = [Target::default(); TARGET_COUNT];
    for (target, block) in targets.iter_mut().zip(body.chunks_exact(TARGET_LEN)) {
        *target = Target::from_block(block);
    }
    Ok(targets)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_sign_magnitude16;

    fn frame(targets: &[[u8; 8]; 3]) -> [u8; REPORT_LEN] {
        let mut frame = [0u8; REPORT_LEN];
        frame[..4].copy_from_slice(&REPORT_HEADER);
        for (i, target) in targets.iter().enumerate() {
            frame[4 + i * 8..12 + i * 8].copy_from_slice(target);
        }
        frame[28..].copy_from_slice(&REPORT_TAIL);
        frame
    }

    fn block(x: i16, y: i16, speed: i16, res: u16) -> [u8; 8] {
        let mut b = [0u8; 8];
        b[0..2].copy_from_slice(&encode_sign_magnitude16(x).to_le_bytes());
        b[2..4].copy_from_slice(&encode_sign_magnitude16(y).to_le_bytes());
        b[4..6].copy_from_slice(&encode_sign_magnitude16(speed).to_le_bytes());
        b[6..8].copy_from_slice(&res.to_le_bytes());
        b
    }

    #[test]
    fn empty_frame_decodes_to_absent_targets() {
        let targets = decode_report(&frame(&[[0; 8]; 3])).unwrap();
        assert_eq!(targets, [Target::default(); 3]);
        assert!(targets.iter().all(|t| !t.is_present()));
    }

    #[test]
    fn decodes_captured_frame() {
        // Target 1 at x=-782 mm, y=1713 mm, moving at -16 cm/s.
        let raw = [
            0xAA, 0xFF, 0x03, 0x00, 0x0E, 0x83, 0xB1, 0x06, 0x10, 0x80, 0x68, 0x01, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x55, 0xCC,
        ];
        let targets = decode_report(&raw).unwrap();
        assert_eq!(
            targets[0],
            Target {
                x: -782,
                y: 1713,
                speed: -16,
                distance_resolution: 360,
            }
        );
        assert!(targets[0].is_present());
        assert!(!targets[1].is_present());
    }

    #[test]
    fn keeps_positional_order() {
        let raw = frame(&[
            block(100, 3000, 0, 360),
            block(-2000, 500, 12, 320),
            block(0, 6000, -40, 360),
        ]);
        let targets = decode_report(&raw).unwrap();
        assert_eq!(targets[0].y, 3000);
        assert_eq!(targets[1].x, -2000);
        assert_eq!(targets[1].speed, 12);
        assert_eq!(targets[2].speed, -40);
        assert_eq!(targets[2].distance_resolution, 360);
    }

    #[test]
    fn distance_resolution_is_unsigned() {
        let mut b = [0u8; 8];
        b[6] = 0xFF;
        b[7] = 0xFF;
        let targets = decode_report(&frame(&[b, [0; 8], [0; 8]])).unwrap();
        assert_eq!(targets[0].distance_resolution, 0xFFFF);
    }

    #[test]
    fn rejects_missing_header() {
        let mut raw = frame(&[[0; 8]; 3]);
        raw[0] = 0x00;
        assert_eq!(decode_report(&raw), Err(DecodeError::MissingHeader));
    }

    #[test]
    fn rejects_missing_tail() {
        let mut raw = frame(&[[0; 8]; 3]);
        raw[29] = 0x00;
        assert_eq!(decode_report(&raw), Err(DecodeError::MissingTail));
    }

    #[test]
    fn header_is_checked_before_tail() {
        assert_eq!(decode_report(&[]), Err(DecodeError::MissingHeader));
        assert_eq!(decode_report(&REPORT_TAIL), Err(DecodeError::MissingHeader));
    }

    #[test]
    fn rejects_wrong_length_with_markers_present() {
        let raw = frame(&[[0; 8]; 3]);

        let mut longer = [0u8; REPORT_LEN + 1];
        longer[1..].copy_from_slice(&raw);
        assert_eq!(decode_report(&longer), Err(DecodeError::WrongLength));

        let mut shorter = [0u8; 10];
        shorter[..4].copy_from_slice(&REPORT_HEADER);
        shorter[8..].copy_from_slice(&REPORT_TAIL);
        assert_eq!(decode_report(&shorter), Err(DecodeError::WrongLength));
    }
}
