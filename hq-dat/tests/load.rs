use std::path::{Path, PathBuf};

use hq_dat::*;
use proptest::prelude::*;

const NO_INTRO_DAT: &str = r#"clrmamepro (
	name "Nintendo - Super Nintendo Entertainment System"
	description "Nintendo - Super Nintendo Entertainment System"
	version 20150418-000000
	comment "no-intro | www.no-intro.org"
)

game (
	name "Super Mario World (USA)"
	description "Super Mario World (USA)"
	rom ( name "Super Mario World (USA).sfc" size 1048576 crc aabbccdd )
	rom ( name "Super Mario World (USA).cue" size 120 crc 11223344 )
)

game (
	name "F-Zero (USA)"
	description "F-Zero (USA)"
	year 1990
	rom ( name "F-Zero (USA).sfc" size 524288 crc AA0E31DE )
)

game (
	name "ActRaiser (USA)"
	description "ActRaiser (USA)"
	rom ( name "ActRaiser (USA).sfc" size 1048576 crc 9b4638b6 )
)
"#;

fn write_dat(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "snes.dat", NO_INTRO_DAT);

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.header.dat_type, "ClrMamePro");
    assert_eq!(catalog.provenance(), Some(Provenance::NoIntro));

    let smw = catalog
        .get_by_description("Super Mario World (USA)")
        .unwrap()
        .unwrap();
    assert_eq!(smw.dirty_crc32(), "bbde0021");
    assert_eq!(smw.clean_crc32(), "aabbccdd");
    assert_eq!(smw.size(false), 1048696);
    assert_eq!(smw.size(true), 1048576);
    assert_eq!(smw.id(), "bbde0021");
}

#[test]
fn loading_twice_gives_the_same_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "snes.dat", NO_INTRO_DAT);

    let first: Vec<String> = load_catalog(&path)
        .unwrap()
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    let second: Vec<String> = load_catalog(&path)
        .unwrap()
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn colliding_ids_abort_the_load() {
    let dir = tempfile::tempdir().unwrap();
    // Same payload under two titles.
    let content = NO_INTRO_DAT.replace("9b4638b6", "aa0e31de");
    let path = write_dat(dir.path(), "dupes.dat", &content);

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, DatError::DuplicateIds(_)));
    assert!(err.to_string().contains("aa0e31de"));
}

#[test]
fn missing_and_unknown_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.dat");
    assert!(matches!(
        load_catalog(&missing),
        Err(DatError::NotFound(_))
    ));

    let text = write_dat(dir.path(), "notes.txt", "shopping list\n");
    assert!(matches!(
        load_catalog(&text),
        Err(DatError::UnknownFormat(_))
    ));
}

#[test]
fn export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "snes.dat", NO_INTRO_DAT);
    let mut catalog = load_catalog(&path).unwrap();

    let format = TableFormat::default();
    let mut table = catalog.csv_export(&[Field::Id, Field::Year, Field::Author], &[]);
    for row in &mut table.rows {
        row[1] = "1991".to_string();
        row[2] = "Nintendo".to_string();
    }
    let table_path = dir.path().join("meta.tsv");
    table.save(&table_path, &format).unwrap();

    let loaded = Table::load(&table_path, &format).unwrap();
    assert_eq!(loaded.rows, table.rows);
    assert_eq!(loaded.comments, table.comments);

    let report = catalog
        .csv_import(
            &loaded,
            ColumnField::new(0, Field::Id),
            &[
                ColumnField::new(1, Field::Year),
                ColumnField::new(2, Field::Author),
            ],
            false,
        )
        .unwrap();
    assert_eq!(report, ImportReport { matched: 3, skipped: 0 });

    let fzero = catalog.get_by_description("F-Zero (USA)").unwrap().unwrap();
    assert_eq!(fzero.year, 1990);
    assert_eq!(fzero.author, "Nintendo");
    let actraiser = catalog.get_by_description("ActRaiser (USA)").unwrap().unwrap();
    assert_eq!(actraiser.year, 1991);
}

#[test]
fn empty_cells_survive_export_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "snes.dat", NO_INTRO_DAT);
    let catalog = load_catalog(&path).unwrap();

    let format = TableFormat::default();
    let table = catalog.csv_export(&[Field::Author], &[]);
    assert_eq!(table.rows, vec![vec![""], vec![""], vec![""]]);
    let table_path = dir.path().join("authors.tsv");
    table.save(&table_path, &format).unwrap();

    let loaded = Table::load(&table_path, &format).unwrap();
    assert_eq!(loaded.headings, vec!["author"]);
    assert_eq!(loaded.rows, table.rows);
}

#[test]
fn mini_export_reloads_with_padded_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "snes.dat", NO_INTRO_DAT);
    let options = LoadOptions {
        id_mode: Some(IdMode::Position),
        check_duplicates: true,
    };
    let mut catalog = Catalog::load_with(&path, &options).unwrap();

    let format = TableFormat::default();
    let mut table = catalog.mini_export();
    assert!(table.rows.iter().all(|row| row[0].len() == 8));
    for row in &mut table.rows {
        row[1] = format!("{} [b]", row[1]);
    }
    let table_path = dir.path().join("mini.tsv");
    table.save(&table_path, &format).unwrap();

    let loaded = Table::load(&table_path, &format).unwrap();
    assert_eq!(loaded.rows, table.rows);

    let report = catalog
        .csv_import(
            &loaded,
            ColumnField::new(0, Field::Id),
            &[ColumnField::new(1, Field::Description)],
            true,
        )
        .unwrap();
    assert_eq!(report, ImportReport { matched: 3, skipped: 0 });
    assert!(catalog.iter().all(|game| game.description.ends_with(" [b]")));
}

#[test]
fn identify_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let rom_path = dir.path().join("game.bin");
    std::fs::write(&rom_path, b"hello world").unwrap();

    let rom = Rom::from_path(&rom_path).unwrap();
    assert_eq!(rom.name, "game.bin");
    assert_eq!(rom.size, 11);
    assert_eq!(rom.crc32, "0d4a1185");

    let content = NO_INTRO_DAT.replace("9b4638b6", "0d4a1185");
    let dat = write_dat(dir.path(), "snes.dat", &content);
    let catalog = load_catalog(&dat).unwrap();
    let game = RomSet::new("", "").with_rom(rom);
    let found = catalog
        .get_game_by_identity_field(
            Field::Hash {
                kind: hq_core::HashKind::Crc32,
                clean: true,
            },
            &game.clean_crc32(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(found.description, "ActRaiser (USA)");
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::btree_set(any::<u32>(), 0..40).prop_map(|crcs| {
        let header = DatHeader {
            name: "Test".into(),
            comment: "no-intro".into(),
            ..DatHeader::default()
        };
        let games = crcs
            .into_iter()
            .enumerate()
            .map(|(i, crc)| {
                RomSet::new(format!("g{i}"), format!("Game {i:03}")).with_rom(Rom::new(
                    format!("g{i}.bin"),
                    1024,
                    &format!("{crc:08x}"),
                    "",
                    "",
                ))
            })
            .collect();
        Catalog::from_dat(DatFile { header, games }, &LoadOptions::default()).unwrap()
    })
}

proptest! {
    #[test]
    fn filter_partitions_every_game(
        catalog in catalog_strategy(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let ids: Vec<String> = if catalog.is_empty() {
            Vec::new()
        } else {
            picks
                .iter()
                .map(|p| catalog.games()[p.index(catalog.len())].id().to_string())
                .collect()
        };
        let (matched, unmatched) = catalog.filter(&Filter::new(Field::Id, ids.clone()));

        prop_assert_eq!(matched.len() + unmatched.len(), catalog.len());
        for game in &catalog {
            let in_matched = matched.id_exists(game.id());
            let in_unmatched = unmatched.id_exists(game.id());
            prop_assert!(in_matched != in_unmatched);
            prop_assert_eq!(in_matched, ids.iter().any(|id| id == game.id()));
        }
    }
}
