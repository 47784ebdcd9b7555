use super::*;

use proptest::prelude::*;

#[test]
fn test_sum_wraps_on_overflow() {
    assert_eq!(sum_digest("ffffffff", "00000001", 8), "00000000");
    assert_eq!(sum_digest("ffffffff", "00000002", 8), "00000001");
}

#[test]
fn test_sum_pads_to_width() {
    assert_eq!(sum_digest("1", "2", 8), "00000003");
    assert_eq!(sum_digest("0", "0", 32).len(), 32);
}

#[test]
fn test_sum_example_from_two_roms() {
    assert_eq!(sum_digest("01020304", "0a0b0c0d", 8), "0b0d0f11");
    assert_eq!(sum_digest("aabbccdd", "11223344", 8), "bbde0021");
}

#[test]
fn test_sum_accepts_uppercase() {
    assert_eq!(sum_digest("AABBCCDD", "00000001", 8), "aabbccde");
}

#[test]
fn test_sum_sha1_width() {
    let a = "f".repeat(40);
    let b = format!("{:0>40}", "1");
    assert_eq!(sum_digest(&a, &b, 40), "0".repeat(40));
}

#[test]
fn test_malformed_digest_counts_as_zero() {
    assert_eq!(sum_digest("zzzz", "0000abcd", 8), "0000abcd");
    assert_eq!(sum_digest("", "0000abcd", 8), "0000abcd");
}

#[test]
fn test_longer_operand_keeps_low_digits() {
    assert_eq!(sum_digest("1ffffffff", "0", 8), "ffffffff");
}

#[test]
fn test_fold_empty_is_zero() {
    assert_eq!(fold_digests(Vec::<&str>::new(), 8), "00000000");
    assert_eq!(fold_digests(Vec::<&str>::new(), HashKind::Md5.width()), HashKind::Md5.zero());
}

#[test]
fn test_fold_matches_pairwise_sum() {
    let digests = ["12345678", "9abcdef0", "0fedcba9"];
    let pairwise = sum_digest(&sum_digest(digests[0], digests[1], 8), digests[2], 8);
    assert_eq!(fold_digests(digests, 8), pairwise);
}

#[test]
fn test_normalize_digest() {
    assert_eq!(normalize_digest("ABCD", HashKind::Crc32), "0000abcd");
    assert_eq!(normalize_digest(" DEADBEEF ", HashKind::Crc32), "deadbeef");
    assert_eq!(normalize_digest("123456789", HashKind::Crc32), "23456789");
    assert_eq!(normalize_digest("N/A", HashKind::Crc32), "n/a");
    assert_eq!(normalize_digest("", HashKind::Sha1), "");
}

#[test]
fn test_hash_kind_parse() {
    assert_eq!("crc32".parse::<HashKind>(), Ok(HashKind::Crc32));
    assert_eq!("MD5".parse::<HashKind>(), Ok(HashKind::Md5));
    assert_eq!("sha1".parse::<HashKind>(), Ok(HashKind::Sha1));
    assert!("sha256".parse::<HashKind>().is_err());
}

fn hex_digest(width: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(0u32..16, width)
        .prop_map(|ds| ds.into_iter().filter_map(|d| char::from_digit(d, 16)).collect())
}

proptest! {
    #[test]
    fn prop_sum_is_commutative(a in hex_digest(8), b in hex_digest(8)) {
        prop_assert_eq!(sum_digest(&a, &b, 8), sum_digest(&b, &a, 8));
    }

    #[test]
    fn prop_sum_is_associative(a in hex_digest(32), b in hex_digest(32), c in hex_digest(32)) {
        let left = sum_digest(&sum_digest(&a, &b, 32), &c, 32);
        let right = sum_digest(&a, &sum_digest(&b, &c, 32), 32);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_fold_has_fixed_width(digests in proptest::collection::vec(hex_digest(40), 0..12)) {
        let sum = fold_digests(digests.iter().map(String::as_str), 40);
        prop_assert_eq!(sum.len(), 40);
        prop_assert!(sum.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn prop_fold_matches_u32_wrapping_add(values in proptest::collection::vec(any::<u32>(), 0..16)) {
        let hex: Vec<String> = values.iter().map(|v| format!("{v:08x}")).collect();
        let expected = values.iter().fold(0u32, |acc, v| acc.wrapping_add(*v));
        prop_assert_eq!(fold_digests(hex.iter().map(String::as_str), 8), format!("{expected:08x}"));
    }
}
