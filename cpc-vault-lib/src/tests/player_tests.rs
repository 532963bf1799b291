use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use cpc_vault_catalog::GameStatus;

type Events = Rc<RefCell<Vec<String>>>;

struct FakeContainer {
    children: usize,
    focused: bool,
    events: Events,
}

impl PlayerContainer for FakeContainer {
    fn child_count(&self) -> usize {
        self.children
    }

    fn has_focus_within(&self) -> bool {
        self.focused
    }

    fn blur_focused(&mut self) {
        self.focused = false;
        self.events.borrow_mut().push("blur".into());
    }

    fn remove_children(&mut self) {
        assert!(!self.focused, "children detached while focus was inside");
        self.children = 0;
        self.events.borrow_mut().push("clear".into());
    }
}

struct FakeWidget {
    fail: bool,
    events: Events,
}

impl PlayerWidget<FakeContainer> for FakeWidget {
    type Error = String;

    fn render(&mut self, container: &mut FakeContainer, launch: &PlayerLaunch) -> Result<(), String> {
        if self.fail {
            return Err("disk image unreachable".to_string());
        }
        container.children += 1;
        container.focused = true;
        self.events
            .borrow_mut()
            .push(format!("render {}", launch.media_url));
        Ok(())
    }
}

fn session(fail: bool) -> (PlayerSession<FakeContainer, FakeWidget>, Events) {
    let events: Events = Rc::default();
    let container = FakeContainer {
        children: 0,
        focused: false,
        events: events.clone(),
    };
    let widget = FakeWidget {
        fail,
        events: events.clone(),
    };
    (PlayerSession::new(container, widget), events)
}

fn entry(command: &str) -> CatalogEntry {
    CatalogEntry {
        key: "dr-roland".into(),
        title: "DrRoland".into(),
        description: "A puzzle game.".into(),
        cover_image_url: "https://placehold.co/400x300.png".into(),
        screenshot_urls: vec!["https://placehold.co/400x300.png".into()],
        legacy_player_id: "00000".into(),
        media_url: "/gamez/drroland.dsk".into(),
        play_command: command.into(),
        genre: "Puzzle".into(),
        release_year: 2021,
        developer: "John Lobo".into(),
        publisher: "Glasnost Corp.".into(),
        status: GameStatus::Finished,
        sort_order: Some(2),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn launch_unescapes_newlines_only() {
    let launch = PlayerLaunch::for_entry(&entry(r#"run"drroland\n"#));
    assert_eq!(launch.command, "run\"drroland\n");
    assert_eq!(launch.media_url, "/gamez/drroland.dsk");
    assert_eq!(launch.disk_type, "dsk");
    assert_eq!(launch.warp_frames, 1000);
    assert!(launch.wait_audio);
}

#[test]
fn unescape_handles_multiple_tokens() {
    assert_eq!(unescape_command(r#"|cpm\nrun"x\n"#), "|cpm\nrun\"x\n");
    assert_eq!(unescape_command("cat"), "cat");
    assert_eq!(unescape_command(""), "");
}

#[test]
fn launch_serializes_camel_case() {
    let launch = PlayerLaunch::for_entry(&entry(r#"run"disc\n"#));
    let json = serde_json::to_value(&launch).unwrap();
    assert_eq!(json["mediaUrl"], "/gamez/drroland.dsk");
    assert_eq!(json["warpFrames"], 1000);
    assert_eq!(json["waitAudio"], true);
    assert_eq!(json["command"], "run\"disc\n");
}

#[test]
fn load_reaches_ready() {
    let (mut player, _) = session(false);
    assert_eq!(player.status(), &PlayerStatus::Idle);

    player
        .load(&PlayerLaunch::for_entry(&entry(r#"run"disc\n"#)))
        .unwrap();
    assert_eq!(player.status(), &PlayerStatus::Ready);
    assert_eq!(player.container().child_count(), 1);
}

#[test]
fn reload_never_accumulates_players() {
    let (mut player, events) = session(false);
    let launch = PlayerLaunch::for_entry(&entry(r#"run"disc\n"#));

    player.load(&launch).unwrap();
    player.load(&launch).unwrap();
    player.load(&launch).unwrap();

    assert_eq!(player.container().child_count(), 1);
    let renders = events
        .borrow()
        .iter()
        .filter(|e| e.starts_with("render"))
        .count();
    assert_eq!(renders, 3);
}

#[test]
fn teardown_blurs_before_clearing() {
    let (mut player, events) = session(false);
    player
        .load(&PlayerLaunch::for_entry(&entry(r#"run"disc\n"#)))
        .unwrap();
    events.borrow_mut().clear();

    player.teardown();

    assert_eq!(*events.borrow(), vec!["blur", "clear"]);
    assert_eq!(player.container().child_count(), 0);
    assert_eq!(player.status(), &PlayerStatus::Idle);
}

#[test]
fn drop_tears_down() {
    let (mut player, events) = session(false);
    player
        .load(&PlayerLaunch::for_entry(&entry(r#"run"disc\n"#)))
        .unwrap();
    events.borrow_mut().clear();

    drop(player);

    assert_eq!(*events.borrow(), vec!["blur", "clear"]);
}

#[test]
fn widget_failure_is_reported_as_status() {
    let (mut player, _) = session(true);
    let err = player
        .load(&PlayerLaunch::for_entry(&entry(r#"run"disc\n"#)))
        .unwrap_err();

    assert!(matches!(err, PlayerError::Widget(_)));
    assert_eq!(
        player.status(),
        &PlayerStatus::Failed("disk image unreachable".to_string())
    );
}

#[test]
fn missing_media_fails_without_rendering() {
    let (mut player, events) = session(false);
    let mut e = entry(r#"run"disc\n"#);
    e.media_url = " ".into();

    let err = player.load(&PlayerLaunch::for_entry(&e)).unwrap_err();
    assert!(matches!(err, PlayerError::MissingMedia));
    assert!(events.borrow().is_empty());
}
