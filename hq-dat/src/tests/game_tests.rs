use super::*;

fn smw() -> RomSet {
    RomSet::new("smw", "Super Mario World")
        .with_rom(Rom::new(
            "game.sfc",
            1048576,
            "aabbccdd",
            "0123456789abcdef0123456789abcdef",
            "0123456789abcdef0123456789abcdef01234567",
        ))
        .with_rom(Rom::new(
            "game.cue",
            120,
            "11223344",
            "00000000000000000000000000000001",
            "0000000000000000000000000000000000000001",
        ))
}

#[test]
fn test_dirty_crc32_sums_every_file() {
    assert_eq!(smw().dirty_crc32(), "bbde0021");
}

#[test]
fn test_clean_crc32_skips_cue() {
    assert_eq!(smw().clean_crc32(), "aabbccdd");
}

#[test]
fn test_clean_and_dirty_sizes() {
    let game = smw();
    assert_eq!(game.size(false), 1048696);
    assert_eq!(game.size(true), 1048576);
}

#[test]
fn test_md5_and_sha1_composites() {
    let game = smw();
    assert_eq!(game.clean_md5(), "0123456789abcdef0123456789abcdef");
    assert_eq!(game.dirty_md5(), "0123456789abcdef0123456789abcdf0");
    assert_eq!(game.dirty_sha1(), "0123456789abcdef0123456789abcdef01234568");
    assert_eq!(game.clean_sha1().len(), 40);
}

#[test]
fn test_order_independence() {
    let game = smw();
    let mut reversed = game.clone();
    reversed.roms.reverse();
    for kind in HashKind::ALL {
        for clean in [true, false] {
            assert_eq!(game.hash(kind, clean), reversed.hash(kind, clean));
        }
    }
}

#[test]
fn test_no_roms_gives_zero_digests() {
    let game = RomSet::new("empty", "Empty");
    assert_eq!(game.dirty_crc32(), "00000000");
    assert_eq!(game.clean_md5(), "0".repeat(32));
    assert_eq!(game.dirty_sha1(), "0".repeat(40));
    assert_eq!(game.size(true), 0);
}

#[test]
fn test_malformed_digest_contributes_zero() {
    let game = RomSet::new("bad", "Bad")
        .with_rom(Rom::new("a.bin", 1, "0000000f", "", ""))
        .with_rom(Rom::new("b.bin", 1, "not-hex", "", ""));
    assert_eq!(game.dirty_crc32(), "0000000f");
    assert_eq!(game.dirty_md5(), "0".repeat(32));
}

#[test]
fn test_ignored_extension_is_case_insensitive() {
    let rom = Rom::new("Track.CUE", 10, "00000001", "", "");
    assert!(rom.is_ignored());
    assert!(!Rom::new("Track.bin", 10, "00000001", "", "").is_ignored());
    assert!(!Rom::new("README", 10, "00000001", "", "").is_ignored());
}

#[test]
fn test_clean_equals_dirty_without_ignored_files() {
    let game = RomSet::new("x", "X")
        .with_rom(Rom::new("x.bin", 100, "00000010", "", ""))
        .with_rom(Rom::new("x2.bin", 50, "00000020", "", ""));
    assert_eq!(game.size(true), game.size(false));
    assert_eq!(game.clean_crc32(), game.dirty_crc32());
}

#[test]
fn test_extensionless_files_count_as_clean() {
    let game = RomSet::new("pacman", "Pac-Man")
        .with_rom(Rom::new("pacman", 4096, "c1e6ab10", "", ""))
        .with_rom(Rom::new("pacman.cue", 10, "00000001", "", ""));
    let clean: Vec<&str> = game.relevant_roms(true).map(|r| r.name.as_str()).collect();
    assert_eq!(clean, vec!["pacman"]);
    assert_eq!(game.size(true), 4096);
    assert_eq!(game.clean_crc32(), "c1e6ab10");
}

#[test]
fn test_rom_digests_are_normalized() {
    let rom = Rom::new("a.bin", 1, "ABCD", "FF", "1");
    assert_eq!(rom.crc32, "0000abcd");
    assert_eq!(rom.md5, format!("{:0>32}", "ff"));
    assert_eq!(rom.sha1, format!("{:0>40}", "1"));
}

#[test]
fn test_summary_carries_computed_fields() {
    let summary = smw().summary();
    assert_eq!(summary.dirty_crc32, "bbde0021");
    assert_eq!(summary.clean_size, 1048576);
    assert_eq!(summary.roms.len(), 2);
}
