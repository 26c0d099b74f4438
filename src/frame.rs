use heapless::Vec;

use crate::constants::*;
use crate::encoding::read_i16_le;
use crate::error::Error;

/// An outbound command frame.
pub type CommandFrame = Vec<u8, COMMAND_CAPACITY>;

/// Raw acknowledgement bytes, up to and including the command tail when it arrived.
pub type Response = Vec<u8, RESPONSE_CAPACITY>;

/// Builds `header | length | word | value | tail`.
///
/// The length field is written as given. It must equal `2 + value.len()`
/// for the radar to accept the command; see [`crate::intra_frame_length`].
pub fn encode_command(
    intra_frame_length: [u8; 2],
    command_word: [u8; 2],
    command_value: &[u8],
) -> Result<CommandFrame, Error> {
    let mut frame = CommandFrame::new();
    for part in [
        &COMMAND_HEADER[..],
        &intra_frame_length[..],
        &command_word[..],
        command_value,
        &COMMAND_TAIL[..],
    ] {
        frame
            .extend_from_slice(part)
            .map_err(|_| Error::FrameTooLarge)?;
    }
    Ok(frame)
}

/// Returns `true` when the acknowledgement status at `[8, 10)` is zero.
/// Responses too short to hold the status are failures.
pub fn command_succeeded(response: &[u8]) -> bool {
    read_i16_le(response, STATUS_OFFSET) == Some(0)
}

/// Command specific payload of an acknowledgement: the bytes between the
/// status field and the command tail. Empty when the tail is missing or the
/// response is too short to carry a status.
pub fn response_payload(response: &[u8]) -> &[u8] {
    if !response.ends_with(&COMMAND_TAIL) {
        return &[];
    }
    let end = response.len() - COMMAND_TAIL.len();
    response.get(PAYLOAD_OFFSET..end).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{intra_frame_length, read_u16_le};

    #[test]
    fn encodes_enable_configuration_frame() {
        let frame = encode_command(
            intra_frame_length(2).unwrap(),
            CMD_ENABLE_CONFIGURATION,
            &[0x01, 0x00],
        )
        .unwrap();
        assert_eq!(
            &frame[..],
            &[0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x00, 0xFF, 0x00, 0x01, 0x00, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn length_field_matches_word_and_value() {
        for len in [0usize, 2, 26] {
            let value = [0xAB; 26];
            let frame =
                encode_command(intra_frame_length(len).unwrap(), CMD_SET_ZONE_FILTERING, &value[..len])
                    .unwrap();
            let field = read_u16_le(&frame, 4).unwrap() as usize;
            assert_eq!(field, 2 + len);
            assert_eq!(frame.len(), 4 + 2 + field + 4);
            assert!(frame.ends_with(&COMMAND_TAIL));
        }
    }

    #[test]
    fn oversized_value_is_rejected() {
        let value = [0u8; COMMAND_CAPACITY];
        assert_eq!(
            encode_command(intra_frame_length(value.len()).unwrap(), CMD_SET_ZONE_FILTERING, &value),
            Err(Error::FrameTooLarge)
        );
    }

    #[test]
    fn status_zero_is_success() {
        let ack = [
            0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x00, 0xFF, 0x01, 0x00, 0x00, 0x04, 0x03, 0x02, 0x01,
        ];
        assert!(command_succeeded(&ack));
    }

    #[test]
    fn non_zero_status_is_failure() {
        let mut ack = [
            0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x00, 0xFF, 0x01, 0x01, 0x00, 0x04, 0x03, 0x02, 0x01,
        ];
        assert!(!command_succeeded(&ack));
        ack[8] = 0xFF;
        ack[9] = 0xFF;
        assert!(!command_succeeded(&ack));
    }

    #[test]
    fn short_response_is_failure() {
        assert!(!command_succeeded(&[]));
        assert!(!command_succeeded(&[0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x00, 0xFF, 0x01, 0x00]));
        assert_eq!(response_payload(&[0x00; 9]), &[] as &[u8]);
    }

    #[test]
    fn payload_excludes_command_tail() {
        let ack = [
            0xFD, 0xFC, 0xFB, 0xFA, 0x06, 0x00, 0x91, 0x01, 0x00, 0x00, 0x02, 0x00, 0x04, 0x03,
            0x02, 0x01,
        ];
        assert_eq!(response_payload(&ack), &[0x02, 0x00]);
        assert_eq!(response_payload(&ack[..12]), &[] as &[u8]);
        assert_eq!(response_payload(&ack[..10]), &[] as &[u8]);

        let no_payload = [
            0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x00, 0xFE, 0x01, 0x00, 0x00, 0x04, 0x03, 0x02, 0x01,
        ];
        assert_eq!(response_payload(&no_payload), &[] as &[u8]);
    }

    #[test]
    fn truncated_ack_ending_in_tail_has_no_payload() {
        // Tail arrives before the status field is complete.
        let ack = [0xFD, 0xFC, 0xFB, 0xFA, 0x04, 0x03, 0x02, 0x01];
        assert_eq!(response_payload(&ack), &[] as &[u8]);
    }
}
