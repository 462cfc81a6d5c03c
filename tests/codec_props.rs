use battleship_client::{CodecError, FrameCodec};
use proptest::prelude::*;

fn feed_in_chunks(input: &[u8], cuts: &[usize]) -> Result<Vec<String>, CodecError> {
    let mut codec = FrameCodec::new();
    let mut frames = Vec::new();
    let mut start = 0;
    for &cut in cuts.iter().chain(std::iter::once(&input.len())) {
        let end = cut.clamp(start, input.len());
        if end > start {
            frames.extend(codec.feed(&input[start..end])?);
        }
        start = end;
    }
    Ok(frames)
}

#[test]
fn test_partial_frame_is_retained() {
    let mut codec = FrameCodec::new();
    assert_eq!(codec.feed(b"YOUR_TU").unwrap(), Vec::<String>::new());
    assert_eq!(codec.pending(), b"YOUR_TU");
    assert_eq!(
        codec.feed(b"RN|go\nRESULT|HIT\nENEMY").unwrap(),
        vec!["YOUR_TURN|go".to_string(), "RESULT|HIT".to_string()]
    );
    assert_eq!(codec.pending(), b"ENEMY");
}

#[test]
fn test_carriage_return_and_blank_lines() {
    let mut codec = FrameCodec::new();
    assert_eq!(
        codec.feed(b"LOGIN|OK\r\n\n\r\nWAIT_TURN|\n").unwrap(),
        vec!["LOGIN|OK".to_string(), "WAIT_TURN|".to_string()]
    );
}

#[test]
fn test_zero_length_read_is_peer_closed() {
    let mut codec = FrameCodec::new();
    assert_eq!(codec.feed(b""), Err(CodecError::PeerClosed));
}

#[test]
fn test_frame_too_long() {
    let mut codec = FrameCodec::with_max_frame_len(8);
    assert!(codec.feed(b"RESULT|H").is_ok());
    assert_eq!(codec.feed(b"IT"), Err(CodecError::FrameTooLong { max: 8 }));

    // A long line that does end in time is fine.
    let mut codec = FrameCodec::with_max_frame_len(8);
    assert_eq!(codec.feed(b"GAME_OVER|YOU WIN\n").unwrap().len(), 1);
}

#[test]
fn test_one_byte_at_a_time() {
    let input = b"LOGIN|OK\nPLACE_SHIP|Cruiser|3\nYOUR_TURN|\n";
    let mut codec = FrameCodec::new();
    let mut frames = Vec::new();
    for b in input.iter() {
        frames.extend(codec.feed(std::slice::from_ref(b)).unwrap());
    }
    assert_eq!(frames, vec!["LOGIN|OK", "PLACE_SHIP|Cruiser|3", "YOUR_TURN|"]);
    assert!(codec.pending().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn framing_ignores_chunk_boundaries(
        lines in proptest::collection::vec("[A-Z_]{1,10}\\|[a-z0-9, ]{0,20}", 1..8),
        cuts in proptest::collection::vec(0usize..200, 0..12),
    ) {
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let mut cuts = cuts;
        cuts.sort_unstable();
        let whole = feed_in_chunks(input.as_bytes(), &[]).unwrap();
        let split = feed_in_chunks(input.as_bytes(), &cuts).unwrap();
        prop_assert_eq!(&whole, &lines);
        prop_assert_eq!(split, whole);
    }
}
