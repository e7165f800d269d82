use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use console_core::browser::DirBrowser;
use console_core::events::{Command, NetEvent};
use console_core::protocol::{Conflict, Side};
use console_core::sync::SyncController;

/// One directory pane: the browsing controller plus the list cursor.
pub struct Pane {
    pub browser: DirBrowser,
    pub selected: usize,
}

impl Pane {
    fn new(side: Side) -> Self {
        Self {
            browser: DirBrowser::new(side),
            selected: 0,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.browser.entries().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        self.selected = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.browser.entries().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Whole-screen state. Key presses and network events reduce to lists of
/// [`Command`]s for the dispatcher; no IO happens here.
pub struct App {
    source: Pane,
    dest: Pane,
    pub sync: SyncController,
    pub focus: Side,
    pub logs: String,
    pub logs_error: Option<String>,
    /// None until the first load answers; Some([]) renders the placeholder.
    pub conflicts: Option<Vec<Conflict>>,
    pub conflicts_error: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            source: Pane::new(Side::Source),
            dest: Pane::new(Side::Dest),
            sync: SyncController::new(),
            focus: Side::Source,
            logs: String::new(),
            logs_error: None,
            conflicts: None,
            conflicts_error: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn pane(&self, side: Side) -> &Pane {
        match side {
            Side::Source => &self.source,
            Side::Dest => &self.dest,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane {
        match side {
            Side::Source => &mut self.source,
            Side::Dest => &mut self.dest,
        }
    }

    /// Commands issued once at startup: root listings for both sides plus
    /// the first logs and conflicts load.
    pub fn startup(&mut self) -> Vec<Command> {
        let mut cmds = self.source.browser.open();
        cmds.extend(self.dest.browser.open());
        cmds.push(Command::FetchLogs);
        cmds.push(Command::FetchConflicts);
        cmds
    }

    /// Periodic tick: poll the daemon status only while a sync is running.
    pub fn on_tick(&self) -> Vec<Command> {
        if self.sync.wants_status_poll() {
            vec![Command::PollStatus]
        } else {
            Vec::new()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Tab => {
                self.focus = self.focus.other();
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.pane_mut(self.focus).move_selection(-1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.pane_mut(self.focus).move_selection(1);
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Right => self.enter_selected(),
            KeyCode::Backspace | KeyCode::Left => {
                let pane = self.pane_mut(self.focus);
                let cmds = pane.browser.select_parent();
                if !cmds.is_empty() {
                    pane.selected = 0;
                }
                cmds
            }
            KeyCode::Char('s') => self.sync.start(),
            KeyCode::Char('r') => self.pane_mut(self.focus).browser.refresh(),
            KeyCode::Char('l') => vec![Command::FetchLogs],
            KeyCode::Char('c') => vec![Command::FetchConflicts],
            _ => Vec::new(),
        }
    }

    fn enter_selected(&mut self) -> Vec<Command> {
        let pane = self.pane_mut(self.focus);
        let Some(entry) = pane.browser.entries().get(pane.selected).cloned() else {
            return Vec::new();
        };
        let cmds = pane.browser.select_entry(&entry);
        if !cmds.is_empty() {
            pane.selected = 0;
        }
        cmds
    }

    /// Fold a network result into the state. May emit follow-up commands
    /// (the post-sync logs+conflicts refresh).
    pub fn apply_net(&mut self, event: NetEvent) -> Vec<Command> {
        match event {
            NetEvent::Listing {
                side, seq, result, ..
            } => {
                let pane = self.pane_mut(side);
                pane.browser.apply_listing(seq, result);
                pane.clamp_selection();
                Vec::new()
            }
            NetEvent::DirPersisted { side, result, .. } => {
                if let Err(e) = result {
                    self.pane_mut(side).browser.note_persist_error(&e);
                }
                Vec::new()
            }
            NetEvent::SyncFinished(result) => self.sync.on_sync_response(result),
            NetEvent::Logs(result) => {
                match result {
                    Ok(text) => {
                        self.logs = text;
                        self.logs_error = None;
                    }
                    Err(e) => self.logs_error = Some(e.to_string()),
                }
                Vec::new()
            }
            NetEvent::Conflicts(result) => {
                match result {
                    Ok(list) => {
                        self.conflicts = Some(list);
                        self.conflicts_error = None;
                    }
                    Err(e) => self.conflicts_error = Some(e.to_string()),
                }
                Vec::new()
            }
            NetEvent::Status(result) => self.sync.on_status_poll(result),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::error::ClientError;
    use console_core::protocol::{DirEntry, SyncResponse};
    use console_core::sync::{SyncPhase, MSG_SYNC_DONE};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn entries() -> Vec<DirEntry> {
        vec![
            DirEntry {
                name: "docs".to_string(),
                is_dir: true,
            },
            DirEntry {
                name: "a.txt".to_string(),
                is_dir: false,
            },
        ]
    }

    /// Feed a listing for whatever fetch the given commands carry.
    fn answer_listing(app: &mut App, cmds: &[Command], entries: Vec<DirEntry>) {
        for cmd in cmds {
            if let Command::FetchListing { side, seq, path } = cmd {
                app.apply_net(NetEvent::Listing {
                    side: *side,
                    seq: *seq,
                    path: path.clone(),
                    result: Ok(entries.clone()),
                });
            }
        }
    }

    #[test]
    fn test_startup_lists_both_roots_and_loads_logs_conflicts() {
        let mut app = App::new();
        let cmds = app.startup();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(
            &cmds[0],
            Command::FetchListing { side: Side::Source, path, .. } if path == "/"
        ));
        assert!(matches!(
            &cmds[1],
            Command::FetchListing { side: Side::Dest, path, .. } if path == "/"
        ));
        assert_eq!(cmds[2], Command::FetchLogs);
        assert_eq!(cmds[3], Command::FetchConflicts);
    }

    #[test]
    fn test_enter_on_directory_navigates() {
        let mut app = App::new();
        let cmds = app.startup();
        answer_listing(&mut app, &cmds, entries());

        let cmds = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(
            &cmds[0],
            Command::PersistDir { side: Side::Source, path } if path == "/docs"
        ));
        assert!(matches!(
            &cmds[1],
            Command::FetchListing { side: Side::Source, path, .. } if path == "/docs"
        ));
        assert_eq!(app.pane(Side::Source).browser.cursor(), "/docs");
    }

    #[test]
    fn test_enter_on_file_does_nothing() {
        let mut app = App::new();
        let cmds = app.startup();
        answer_listing(&mut app, &cmds, entries());

        app.handle_key(key(KeyCode::Down)); // move onto a.txt
        let cmds = app.handle_key(key(KeyCode::Enter));
        assert!(cmds.is_empty());
        assert_eq!(app.pane(Side::Source).browser.cursor(), "/");
    }

    #[test]
    fn test_source_navigation_leaves_dest_untouched() {
        let mut app = App::new();
        let cmds = app.startup();
        answer_listing(&mut app, &cmds, entries());

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.pane(Side::Dest).browser.cursor(), "/");
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut app = App::new();
        assert_eq!(app.focus, Side::Source);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Side::Dest);
    }

    #[test]
    fn test_sync_key_starts_once() {
        let mut app = App::new();
        assert_eq!(app.handle_key(key(KeyCode::Char('s'))), vec![Command::StartSync]);
        // Second press while syncing is swallowed.
        assert!(app.handle_key(key(KeyCode::Char('s'))).is_empty());
    }

    #[test]
    fn test_sync_response_triggers_refresh() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('s')));
        let cmds = app.apply_net(NetEvent::SyncFinished(Ok(SyncResponse { status: None })));
        assert_eq!(cmds, vec![Command::FetchLogs, Command::FetchConflicts]);
        assert_eq!(app.sync.phase(), SyncPhase::Completed);
        assert_eq!(app.sync.message(), MSG_SYNC_DONE);
    }

    #[test]
    fn test_sync_failure_still_refreshes() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('s')));
        let cmds = app.apply_net(NetEvent::SyncFinished(Err(ClientError::Status(500))));
        assert_eq!(cmds, vec![Command::FetchLogs, Command::FetchConflicts]);
        assert_eq!(app.sync.phase(), SyncPhase::Failed);
    }

    #[test]
    fn test_tick_polls_only_while_syncing() {
        let mut app = App::new();
        assert!(app.on_tick().is_empty());
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.on_tick(), vec![Command::PollStatus]);
    }

    #[test]
    fn test_selection_clamped_after_shorter_listing() {
        let mut app = App::new();
        let cmds = app.startup();
        answer_listing(&mut app, &cmds, entries());
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.pane(Side::Source).selected, 1);

        let cmds = app.handle_key(key(KeyCode::Char('r')));
        answer_listing(
            &mut app,
            &cmds,
            vec![DirEntry {
                name: "only".to_string(),
                is_dir: true,
            }],
        );
        assert_eq!(app.pane(Side::Source).selected, 0);
    }

    #[test]
    fn test_logs_and_conflicts_results_applied() {
        let mut app = App::new();
        app.apply_net(NetEvent::Logs(Ok("line1\nline2".to_string())));
        assert_eq!(app.logs, "line1\nline2");

        app.apply_net(NetEvent::Conflicts(Ok(vec![Conflict {
            path: "/a".to_string(),
        }])));
        assert_eq!(app.conflicts.as_ref().unwrap().len(), 1);

        // A later failure keeps the old data and records the error.
        app.apply_net(NetEvent::Logs(Err(ClientError::Status(500))));
        assert_eq!(app.logs, "line1\nline2");
        assert!(app.logs_error.is_some());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());

        // Plain 'c' refreshes conflicts instead.
        let mut app = App::new();
        assert_eq!(
            app.handle_key(key(KeyCode::Char('c'))),
            vec![Command::FetchConflicts]
        );
        assert!(!app.should_quit());
    }
}
