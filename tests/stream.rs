use gbdecode::{ByteStream, Error};

#[test]
fn single_insertions_and_empty() {
    const MAGIC_BYTE: u8 = 0x13;
    let mut stream = ByteStream::new();
    assert!(stream.is_empty());

    stream.add(MAGIC_BYTE);
    assert!(!stream.is_empty());
    assert_eq!(stream.len(), 1);

    assert_eq!(stream.peek(), Ok(MAGIC_BYTE));
    assert_eq!(stream.len(), 1);

    assert_eq!(stream.get(), Ok(MAGIC_BYTE));
    assert!(stream.is_empty());
}

#[test]
fn multiple_insertions_and_empty() {
    let input = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let mut stream = ByteStream::new();

    stream.add_bytes(&input);
    assert!(!stream.is_empty());
    assert_eq!(stream.get_bytes::<10>(), Ok(input));
    assert!(stream.is_empty());

    stream.add_bytes(&input);
    assert_eq!(stream.get_bytes::<5>(), Ok([1, 2, 3, 4, 5]));
    assert_eq!(stream.len(), 5);
    assert_eq!(stream.peek(), Ok(6));
}

#[test]
fn bytes_come_out_in_insertion_order() {
    let mut stream = ByteStream::new();
    stream.add(0xAA);
    stream.add_bytes(&[0xBB, 0xCC]);
    stream.extend(vec![0xDD]);

    let mut out = vec![];
    while let Ok(b) = stream.get() {
        out.push(b);
    }
    assert_eq!(out, vec![0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn reading_an_empty_stream_underflows() {
    let mut stream = ByteStream::new();
    let underflow = Err(Error::StreamUnderflow {
        requested: 1,
        available: 0,
    });
    assert_eq!(stream.peek(), underflow);
    assert_eq!(stream.get(), underflow);
}

#[test]
fn bulk_read_past_the_end_underflows() {
    let mut stream: ByteStream = (0..3).collect();
    assert_eq!(
        stream.get_bytes::<4>(),
        Err(Error::StreamUnderflow {
            requested: 4,
            available: 3
        })
    );
    assert_eq!(stream.len(), 3);
}

#[test]
fn u16_reads_are_little_endian() {
    let mut stream = ByteStream::from(vec![0x34, 0x12, 0xFF]);
    assert_eq!(stream.get_u16(), Ok(0x1234));
    assert_eq!(
        stream.get_u16(),
        Err(Error::StreamUnderflow {
            requested: 2,
            available: 1
        })
    );
    assert_eq!(stream.get(), Ok(0xFF));
}

#[test]
fn underflow_message() {
    let err = Error::StreamUnderflow {
        requested: 2,
        available: 1,
    };
    assert_eq!(
        err.to_string(),
        "attempted read of 2 bytes when only 1 bytes are available"
    );
}
