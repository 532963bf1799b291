use cpc_vault_catalog::{CatalogEntryInput, GameStatus, RecordStore};
use cpc_vault_db::*;

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_memory().unwrap();
    let rows = [
        ("amsthrees", "Amsthrees", "Puzzle", 2015, GameStatus::Finished, Some(1)),
        ("dr-roland", "DrRoland", "Puzzle", 2021, GameStatus::Finished, Some(2)),
        ("forms", "Forms", "Puzzle", 2023, GameStatus::WorkInProgress, None),
        ("gryzor", "Gryzor (Contra)", "Run and gun", 1987, GameStatus::Finished, None),
        ("sorcery", "Sorcery+", "Action-adventure", 1985, GameStatus::Finished, None),
    ];
    for (key, title, genre, year, status, order) in rows {
        store
            .insert_unique(&CatalogEntryInput {
                key: key.to_string(),
                title: title.to_string(),
                description: format!("{title}."),
                cover_image_url: "https://placehold.co/400x300.png".to_string(),
                screenshot_urls: vec!["https://placehold.co/400x300.png".to_string()],
                legacy_player_id: "00000".to_string(),
                media_url: format!("/gamez/{key}.dsk"),
                play_command: format!("run\"{key}\\n"),
                genre: genre.to_string(),
                release_year: year,
                developer: "dev".to_string(),
                publisher: "pub".to_string(),
                status,
                sort_order: order,
            })
            .unwrap();
    }
    store
}

#[test]
fn stats_count_everything() {
    let store = seeded();
    let stats = catalog_stats(store.connection()).unwrap();
    assert_eq!(stats.games, 5);
    assert_eq!(stats.finished, 4);
    assert_eq!(stats.work_in_progress, 1);
    assert_eq!(stats.unordered, 3);
    assert_eq!(stats.earliest_year, Some(1985));
    assert_eq!(stats.latest_year, Some(2023));
    assert_eq!(stats.genres[0], ("Puzzle".to_string(), 3));
    assert_eq!(stats.genres.len(), 3);
}

#[test]
fn stats_on_empty_catalog() {
    let store = SqliteStore::open_memory().unwrap();
    let stats = catalog_stats(store.connection()).unwrap();
    assert_eq!(stats.games, 0);
    assert_eq!(stats.earliest_year, None);
    assert!(stats.genres.is_empty());
}

#[test]
fn search_is_case_insensitive_substring() {
    let store = seeded();
    let hits: Vec<_> = search_games(store.connection(), "or")
        .unwrap()
        .into_iter()
        .map(|g| g.key)
        .collect();
    // Display order: ordered entries first, then by title.
    assert_eq!(hits, vec!["forms", "gryzor", "sorcery"]);

    let hits = search_games(store.connection(), "DRROLAND").unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn filter_by_status() {
    let store = seeded();
    let wip = games_by_status(store.connection(), GameStatus::WorkInProgress).unwrap();
    assert_eq!(wip.len(), 1);
    assert_eq!(wip[0].key, "forms");

    let finished = games_by_status(store.connection(), GameStatus::Finished).unwrap();
    assert_eq!(finished.first().map(|g| g.key.as_str()), Some("amsthrees"));
}

#[test]
fn search_treats_wildcards_literally() {
    let store = seeded();
    assert!(search_games(store.connection(), "%").unwrap().is_empty());
    assert!(search_games(store.connection(), "_").unwrap().is_empty());
    assert!(search_games(store.connection(), "\\").unwrap().is_empty());

    let mut odd = store.select_by_key("forms").unwrap().unwrap().to_input();
    odd.key = "percent".to_string();
    odd.title = "100% Forms_v2".to_string();
    store.insert_unique(&odd).unwrap();

    let hits: Vec<_> = search_games(store.connection(), "0% f")
        .unwrap()
        .into_iter()
        .map(|g| g.key)
        .collect();
    assert_eq!(hits, vec!["percent"]);
    assert_eq!(search_games(store.connection(), "s_v").unwrap().len(), 1);
}

#[test]
fn search_returns_every_match() {
    let store = SqliteStore::open_memory().unwrap();
    let template = seeded().select_by_key("gryzor").unwrap().unwrap().to_input();
    for i in 0..150 {
        store
            .insert_unique(&CatalogEntryInput {
                key: format!("game-{i:03}"),
                title: format!("Game {i:03}"),
                ..template.clone()
            })
            .unwrap();
    }
    assert_eq!(search_games(store.connection(), "game").unwrap().len(), 150);
}
