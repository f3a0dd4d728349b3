//! Property tests for the binary primitives.

use neo_io::{
    decode_rev_hex, encode_varint, read_varint, var_size, NeoRead, NeoWrite, SliceReader, ToRevHex,
    MAX_SAFE_INTEGER,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_varint_roundtrip(value in 0u64..=MAX_SAFE_INTEGER) {
        let encoded = encode_varint(value).unwrap();
        prop_assert_eq!(encoded.len(), var_size(value));

        let mut reader = SliceReader::new(&encoded);
        prop_assert_eq!(read_varint(&mut reader).unwrap(), value);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn prop_rev_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let display = bytes.to_rev_hex_lower();
        prop_assert_eq!(decode_rev_hex(&display).unwrap(), bytes);
    }

    #[test]
    fn prop_truncated_var_bytes_fail(data in prop::collection::vec(any::<u8>(), 1..300), cut in 1usize..300) {
        let mut buf = Vec::new();
        buf.write_var_bytes(&data);
        let cut = cut.min(buf.len() - 1);

        let mut reader = SliceReader::new(&buf[..buf.len() - cut]);
        prop_assert!(reader.read_var_bytes(1024).is_err());
    }
}
