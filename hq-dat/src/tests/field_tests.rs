use super::*;
use crate::game::Rom;

fn game() -> RomSet {
    let mut game = RomSet::new("sonic", "Sonic The Hedgehog (USA, Europe)")
        .with_rom(Rom::new("Sonic.md", 524288, "F9394E97", "", ""));
    game.year = 1991;
    game.author = "Sega".into();
    game.set_id("f9394e97".into());
    game
}

#[test]
fn test_parse_every_token_round_trips() {
    for field in Field::ALL {
        assert_eq!(field.token().parse::<Field>().unwrap(), field);
    }
}

#[test]
fn test_parse_aliases() {
    assert_eq!("desc".parse::<Field>().unwrap(), Field::Description);
    assert_eq!("manufacturer".parse::<Field>().unwrap(), Field::Author);
    assert_eq!("DCRC32".parse::<Field>().unwrap().token(), "dcrc32");
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = "_private".parse::<Field>().unwrap_err();
    assert!(matches!(err, DatError::UnknownField { .. }));
    assert!(err.to_string().contains("_private"));
}

#[test]
fn test_searchable_allow_list() {
    let tokens = Field::searchable_tokens();
    assert_eq!(tokens.len(), 10);
    assert!(!tokens.contains(&"id"));
    assert!(!tokens.contains(&"csize"));
    assert!(tokens.contains(&"year"));
    assert!(tokens.contains(&"dsha1"));
}

#[test]
fn test_hash_match_is_case_insensitive() {
    let field: Field = "ccrc32".parse().unwrap();
    assert!(field.matches(&game(), "F9394E97"));
    assert!(field.matches(&game(), "f9394e97"));
}

#[test]
fn test_text_match_is_case_sensitive() {
    assert!(Field::Description.matches(&game(), "Sonic The Hedgehog (USA, Europe)"));
    assert!(!Field::Description.matches(&game(), "sonic the hedgehog (usa, europe)"));
    assert!(Field::Name.matches(&game(), "sonic"));
    assert!(!Field::Name.matches(&game(), "SONIC"));
}

#[test]
fn test_numeric_match() {
    assert!(Field::Year.matches(&game(), "1991"));
    assert!(!Field::Year.matches(&game(), "19??"));
    assert!(Field::Size { clean: true }.matches(&game(), "524288"));
}

#[test]
fn test_values_render() {
    let g = game();
    assert_eq!(Field::Year.value(&g), "1991");
    assert_eq!(Field::Id.value(&g), "f9394e97");
    assert_eq!(Field::Size { clean: false }.value(&g), "524288");
    assert_eq!("dcrc32".parse::<Field>().unwrap().value(&g), "f9394e97");
}

#[test]
fn test_column_field_parse() {
    let cf: ColumnField = "2:author".parse().unwrap();
    assert_eq!(cf, ColumnField::new(2, Field::Author));
    assert!("x:author".parse::<ColumnField>().is_err());
    assert!("author".parse::<ColumnField>().is_err());
    assert!("1:bogus".parse::<ColumnField>().is_err());
}

#[test]
fn test_filter_membership() {
    let filter = Filter::parse("year", ["1990", "1991"]).unwrap();
    assert!(filter.matches(&game()));
    let filter = Filter::new(Field::Author, ["Nintendo"]);
    assert!(!filter.matches(&game()));
}
