//! Property tests for the text loaders

use ls8_loader::{parse_hex, parse_ls8};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_binary_lines_load_in_order(bytes in proptest::collection::vec(any::<u8>(), 0..=256)) {
        let text: String = bytes.iter().map(|b| format!("{:08b} # comment\n", b)).collect();
        let program = parse_ls8(&text).unwrap();
        prop_assert_eq!(program.as_bytes(), &bytes[..]);
    }

    #[test]
    fn test_hex_matches_binary(bytes in proptest::collection::vec(any::<u8>(), 0..=256)) {
        let hex: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
        let bin: String = bytes.iter().map(|b| format!("{:08b}\n", b)).collect();
        prop_assert_eq!(parse_hex(&hex.join(", ")).unwrap(), parse_ls8(&bin).unwrap());
    }

    #[test]
    fn test_comment_lines_take_no_space(comments in proptest::collection::vec("[a-z ]{0,20}", 0..10)) {
        let mut text: String = comments.iter().map(|c| format!("# {}\n", c)).collect();
        text.push_str("00000001\n");
        let program = parse_ls8(&text).unwrap();
        prop_assert_eq!(program.as_bytes(), &[0x01][..]);
    }

    #[test]
    fn test_arbitrary_text_never_panics(text in "\\PC{0,200}") {
        let _ = parse_ls8(&text);
        let _ = parse_hex(&text);
    }
}
