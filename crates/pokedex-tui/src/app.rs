//! Application state and event loop.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};

use pokedex_api::PokeApiClient;
use pokedex_core::{filter_records, DisplayRecord, FullRecord, SearchDebouncer};

use crate::theme::{load_preferences, save_preferences, Preferences, Theme};
use crate::ui;
use crate::worker::{
    spawn_catalog_worker, spawn_detail_worker, CatalogCommand, CatalogSnapshot, DetailRequest,
    DetailResponse,
};

/// Single-line text input with a byte-offset cursor.
#[derive(Default, Clone)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Handle a key event, returns true if the text may have changed or the
    /// cursor moved.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = modifiers.contains(KeyModifiers::ALT);

        match code {
            KeyCode::Char('u') if has_ctrl => self.clear(),
            KeyCode::Char('a') if has_ctrl => self.move_start(),
            KeyCode::Char('e') if has_ctrl => self.move_end(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Char(c) if !has_ctrl && !has_alt => self.insert_char(c),
            _ => return false,
        }
        true
    }
}

/// Transient status line message.
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: false,
        }
    }

    pub fn error(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: true,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Load command currently in flight on the catalog worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingLoad {
    None,
    Page,
    All,
}

/// Whether the load-more affordance is offered.
///
/// Only while the universe is incomplete, no query is active, and there is
/// something on screen to scroll past.
pub fn load_more_visible(universe_complete: bool, query: &str, visible_len: usize) -> bool {
    !universe_complete && query.is_empty() && visible_len > 0
}

/// Application state.
pub struct App {
    pub search_input: TextInput,
    /// Last emitted (normalized) query; the view filters against this, not
    /// against raw keystrokes.
    pub query: String,
    pub items: Vec<DisplayRecord>,
    pub universe_complete: bool,
    pub list_state: ListState,
    pub theme: Theme,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    pub selected_detail: Option<FullRecord>,
    debouncer: SearchDebouncer,
    pending_load: PendingLoad,
    cmd_tx: Sender<CatalogCommand>,
    snapshot_rx: Receiver<CatalogSnapshot>,
    detail_tx: Sender<DetailRequest>,
    detail_rx: Receiver<DetailResponse>,
    pending_detail_for: Option<u32>,
    detail_request_started: Option<Instant>,
}

impl App {
    pub fn new(client: PokeApiClient) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<CatalogCommand>();
        let (snapshot_tx, snapshot_rx) = mpsc::channel::<CatalogSnapshot>();
        let (detail_tx, detail_req_rx) = mpsc::channel::<DetailRequest>();
        let (detail_resp_tx, detail_rx) = mpsc::channel::<DetailResponse>();

        spawn_catalog_worker(client.clone(), cmd_rx, snapshot_tx);
        spawn_detail_worker(client, detail_req_rx, detail_resp_tx);

        let Preferences { theme } = load_preferences();

        let mut app = Self {
            search_input: TextInput::default(),
            query: String::new(),
            items: Vec::new(),
            universe_complete: false,
            list_state: ListState::default(),
            theme,
            toast: None,
            should_quit: false,
            selected_detail: None,
            debouncer: SearchDebouncer::new(),
            pending_load: PendingLoad::None,
            cmd_tx,
            snapshot_rx,
            detail_tx,
            detail_rx,
            pending_detail_for: None,
            detail_request_started: None,
        };
        app.send_load(CatalogCommand::LoadMore);
        app
    }

    /// Records currently visible under the active query, in catalog order.
    pub fn filtered(&self) -> Vec<&DisplayRecord> {
        filter_records(&self.items, &self.query)
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load != PendingLoad::None
    }

    pub fn load_more_offered(&self) -> bool {
        load_more_visible(self.universe_complete, &self.query, self.filtered().len())
    }

    fn send_load(&mut self, cmd: CatalogCommand) {
        self.pending_load = match cmd {
            CatalogCommand::LoadMore => PendingLoad::Page,
            CatalogCommand::LoadAll => PendingLoad::All,
        };
        let _ = self.cmd_tx.send(cmd);
    }

    fn selected_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Enqueue a detail request for the current selection. The worker
    /// coalesces rapid selection changes; the old detail keeps rendering
    /// until the new one arrives.
    fn enqueue_detail_request(&mut self) {
        let idx = self.selected_index();
        let selected_id = self.filtered().get(idx).map(|r| r.id);
        let Some(id) = selected_id else {
            self.pending_detail_for = None;
            self.detail_request_started = None;
            self.selected_detail = None;
            return;
        };
        if self.pending_detail_for == Some(id) {
            return;
        }
        if self.selected_detail.as_ref().is_some_and(|d| d.id == id) {
            // Already showing this entry; drop interest in any stale fetch.
            self.pending_detail_for = None;
            self.detail_request_started = None;
            return;
        }

        self.pending_detail_for = Some(id);
        self.detail_request_started = Some(Instant::now());
        let _ = self.detail_tx.send(DetailRequest { id });
    }

    /// True once a detail fetch has been pending long enough to show a
    /// loading indicator without flickering on fast responses.
    pub fn is_loading_details(&self) -> bool {
        const LOADING_DELAY_MS: u64 = 100;
        self.detail_request_started
            .map(|t| t.elapsed() > Duration::from_millis(LOADING_DELAY_MS))
            .unwrap_or(false)
    }

    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.try_recv() {
            self.items = snapshot.items;
            self.universe_complete = snapshot.universe_complete;

            if let Some(error) = snapshot.error {
                self.toast = Some(Toast::error(error, Duration::from_secs(5)));
                self.pending_load = PendingLoad::None;
            } else if self.universe_complete || self.pending_load == PendingLoad::Page {
                self.pending_load = PendingLoad::None;
            }

            self.clamp_selection();
        }
    }

    fn poll_detail_responses(&mut self) {
        while let Ok(resp) = self.detail_rx.try_recv() {
            if self.pending_detail_for != Some(resp.id) {
                continue;
            }
            if let Some(error) = resp.error {
                self.toast = Some(Toast::error(error, Duration::from_secs(5)));
            }
            self.selected_detail = resp.record;
            self.pending_detail_for = None;
            self.detail_request_started = None;
        }
    }

    /// Keep the selection inside the filtered view, selecting the first
    /// entry once one exists.
    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        match self.list_state.selected() {
            None if len > 0 => self.list_state.select(Some(0)),
            Some(_) if len == 0 => self.list_state.select(None),
            Some(sel) if sel >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
        self.enqueue_detail_request();
    }

    fn scroll_up(&mut self, n: usize) {
        if self.filtered().is_empty() {
            return;
        }
        let new_index = self.selected_index().saturating_sub(n);
        self.list_state.select(Some(new_index));
        self.enqueue_detail_request();
    }

    fn scroll_down(&mut self, n: usize) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        let new_index = self.selected_index().saturating_add(n).min(len - 1);
        self.list_state.select(Some(new_index));
        self.enqueue_detail_request();
    }

    /// Apply a debounced query emission.
    ///
    /// A non-empty query over an incomplete universe triggers a full load,
    /// so search covers every entry rather than just the pages fetched so
    /// far.
    fn apply_query(&mut self, query: String) {
        self.query = query;
        if !self.query.is_empty()
            && !self.universe_complete
            && self.pending_load != PendingLoad::All
        {
            self.send_load(CatalogCommand::LoadAll);
        }
        self.list_state.select(None);
        self.clamp_selection();
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = save_preferences(&Preferences { theme: self.theme }) {
            self.toast = Some(Toast::error(
                format!("Failed to save preferences: {e}"),
                Duration::from_secs(5),
            ));
        } else {
            self.toast = Some(Toast::new(
                format!("Theme: {}", self.theme.label()),
                Duration::from_secs(2),
            ));
        }
    }

    fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => self.toggle_theme(),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                if self.load_more_offered() && !self.is_loading() {
                    self.send_load(CatalogCommand::LoadMore);
                }
            }
            (KeyCode::Up, _) => self.scroll_up(1),
            (KeyCode::Down, _) => self.scroll_down(1),
            (KeyCode::PageUp, _) => self.scroll_up(10),
            (KeyCode::PageDown, _) => self.scroll_down(10),
            _ => {
                if self.search_input.handle_key(key.code, key.modifiers) {
                    self.debouncer.keystroke(&self.search_input.text, Instant::now());
                }
            }
        }
    }
}

/// Run the interactive browser.
pub fn run() -> Result<()> {
    let client = PokeApiClient::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const FRAME_TIME: Duration = Duration::from_millis(33);

    loop {
        let frame_start = Instant::now();

        let mut events_processed = 0usize;
        while event::poll(Duration::from_millis(0))? && events_processed < 100 {
            app.handle_event(event::read()?);
            events_processed += 1;
            if app.should_quit {
                break;
            }
        }

        if app.should_quit {
            break;
        }

        if let Some(query) = app.debouncer.poll(Instant::now()) {
            app.apply_query(query);
        }

        app.update_toast();
        app.poll_snapshots();
        app.poll_detail_responses();

        terminal.draw(|f| ui::render(f, app))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "pika".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text, "pika");
        assert_eq!(input.cursor, 4);

        input.delete_char_before();
        assert_eq!(input.text, "pik");

        input.move_start();
        input.insert_char('!');
        assert_eq!(input.text, "!pik");

        input.move_end();
        input.move_left();
        input.delete_char_before();
        assert_eq!(input.text, "!pk");

        input.clear();
        assert_eq!(input.text, "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_text_input_multibyte_cursor_moves() {
        let mut input = TextInput::default();
        input.insert_char('é');
        input.insert_char('x');
        assert_eq!(input.cursor, 3);

        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);

        input.move_right();
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_handle_key_routes_control_chords() {
        let mut input = TextInput::default();
        assert!(input.handle_key(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(input.handle_key(KeyCode::Char('b'), KeyModifiers::NONE));
        assert_eq!(input.text, "ab");

        assert!(input.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.text, "");

        // Unhandled chords are not consumed.
        assert!(!input.handle_key(KeyCode::Char('t'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_load_more_gate() {
        assert!(load_more_visible(false, "", 30));
        // Complete universe: nothing left to fetch.
        assert!(!load_more_visible(true, "", 151));
        // Active query switches to full-catalog search instead.
        assert!(!load_more_visible(false, "pika", 5));
        // Nothing visible yet.
        assert!(!load_more_visible(false, "", 0));
    }

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::new("done".to_string(), Duration::from_secs(60));
        assert!(!toast.is_expired());
        let expired = Toast::error("boom".to_string(), Duration::ZERO);
        assert!(expired.is_expired());
        assert!(expired.is_error);
    }
}
