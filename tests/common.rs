use gbdecode::{decode_event, ByteStream, Event};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Decodes a single instruction and checks that it used up every byte it was given.
pub fn decode_one(bytes: &[u8]) -> Event {
    init_logger();
    let mut stream = ByteStream::from(bytes);
    let event = decode_event(&mut stream).unwrap();
    assert!(
        stream.is_empty(),
        "{:02X?} decoded to {:?} but left {} bytes behind",
        bytes,
        event,
        stream.len()
    );
    event
}

/// Returns how many bytes decoding a single instruction from `bytes` consumed.
pub fn consumed_by(bytes: &[u8]) -> usize {
    let mut stream = ByteStream::from(bytes);
    decode_event(&mut stream).unwrap();
    bytes.len() - stream.len()
}
