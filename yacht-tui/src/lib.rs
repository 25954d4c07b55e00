//! Terminal UI for the yacht dice game.
//!
//! One screen: dice row on top, score table below, status line at the
//! bottom. The 100ms tick also fires the deferred round reset after a
//! commit, so the committed score stays visible briefly before the board
//! clears.

mod render;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use yacht_core::{Category, Config, GameSession, OpOutcome, Rejection, NUM_CATEGORIES};
use yacht_log::{now_ms, EventLog, GameEvent};
use yacht_store::{load_or_fresh, JsonFileStore, SnapshotV1, Storage};

const DEFAULT_HELP: &str =
    "r roll | 1-5 hold | c clear holds | ↑/↓ select | Enter record | n new game | q quit";

pub(crate) struct App {
    pub(crate) session: GameSession,
    storage: JsonFileStore,
    slot: String,
    events: Option<EventLog>,
    pub(crate) selected: usize,
    pub(crate) status: String,
}

impl App {
    fn new(cfg: &Config, restore: bool) -> Self {
        let storage = JsonFileStore::new(&cfg.storage.dir);
        let mut session = if restore {
            load_or_fresh(&storage, &cfg.storage.slot, cfg.game.seed)
        } else {
            match cfg.game.seed {
                Some(seed) => GameSession::with_seed(seed),
                None => GameSession::new(),
            }
        };
        session.set_reset_delay(Duration::from_millis(cfg.game.reset_delay_ms));

        let events = cfg
            .logging
            .events_path
            .as_ref()
            .and_then(|p| EventLog::open_append(p).ok());

        Self {
            session,
            storage,
            slot: cfg.storage.slot.clone(),
            events,
            selected: 0,
            status: DEFAULT_HELP.to_string(),
        }
    }

    fn log(&mut self, event: GameEvent) {
        // Best-effort: a dropped log line never disturbs the game.
        if let Some(log) = &mut self.events {
            let _ = log.append(&event);
        }
    }

    fn persist(&mut self) {
        let snapshot = SnapshotV1::capture(&self.session);
        if let Err(e) = self.storage.save(&self.slot, &snapshot) {
            self.status = format!("save failed: {e}");
        }
    }

    fn handle_roll(&mut self) {
        match self.session.roll() {
            OpOutcome::Applied => {
                let faces = self.session.dice().map(|d| d.value);
                self.log(GameEvent::Roll {
                    ts_ms: now_ms(),
                    rolls_used: self.session.rolls_used(),
                    faces,
                });
                self.persist();
                self.status = DEFAULT_HELP.to_string();
            }
            OpOutcome::Rejected(r) => self.status = rejection_hint(r).to_string(),
        }
    }

    fn handle_toggle(&mut self, index: usize) {
        if self.session.toggle_hold(index).applied() {
            let held = self.session.dice()[index].held;
            self.log(GameEvent::HoldToggled {
                ts_ms: now_ms(),
                die: index,
                held,
            });
            self.persist();
        }
    }

    fn handle_clear_holds(&mut self) {
        self.session.clear_holds();
        self.log(GameEvent::HoldsCleared { ts_ms: now_ms() });
        self.persist();
    }

    fn handle_commit(&mut self) {
        let cat = Category::ALL[self.selected];
        match self.session.commit(cat, Instant::now()) {
            OpOutcome::Applied => {
                let value = self.session.sheet().get(cat).unwrap_or(0);
                let total = self.session.total_score();
                self.log(GameEvent::Commit {
                    ts_ms: now_ms(),
                    category: cat.name().to_string(),
                    value,
                    total,
                });
                if self.session.is_game_over() {
                    self.log(GameEvent::GameOver {
                        ts_ms: now_ms(),
                        total,
                    });
                    self.status = format!("Game over! Final score {total}. Press n for a new game");
                } else {
                    self.status = format!("Recorded {value} for {}", cat.label());
                }
                self.persist();
            }
            OpOutcome::Rejected(r) => self.status = rejection_hint(r).to_string(),
        }
    }

    fn handle_reset(&mut self) {
        self.session.reset();
        self.log(GameEvent::Reset { ts_ms: now_ms() });
        self.persist();
        self.selected = 0;
        self.status = DEFAULT_HELP.to_string();
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < NUM_CATEGORIES {
            self.selected += 1;
        }
    }

    fn on_tick(&mut self) {
        if self.session.tick(Instant::now()) {
            self.log(GameEvent::RoundStart { ts_ms: now_ms() });
            self.persist();
        }
    }

    fn shutdown(&mut self) {
        self.persist();
        if let Some(log) = &mut self.events {
            let _ = log.flush();
        }
    }
}

fn rejection_hint(r: Rejection) -> &'static str {
    match r {
        Rejection::NoRollsLeft => "No rolls left this round - record a category",
        Rejection::GameOver => "Game over - press n for a new game",
        Rejection::NotRolledYet => "Roll the dice first",
        Rejection::CategoryFilled => "That category is already recorded",
        Rejection::NoSuchDie => "No such die",
    }
}

/// Run the TUI until the player quits. `restore` controls whether the last
/// saved game is resumed.
pub fn run(cfg: &Config, restore: bool) -> io::Result<()> {
    // Terminal init.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(cfg, restore);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render::draw(f, &app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match k.code {
                    KeyCode::Char('q') => {
                        app.shutdown();
                        break;
                    }
                    KeyCode::Char('r') => app.handle_roll(),
                    KeyCode::Char('c') => app.handle_clear_holds(),
                    KeyCode::Char('n') => app.handle_reset(),
                    KeyCode::Char(ch @ '1'..='5') => {
                        app.handle_toggle(ch as usize - '1' as usize)
                    }
                    KeyCode::Up => app.select_prev(),
                    KeyCode::Down => app.select_next(),
                    KeyCode::Enter => app.handle_commit(),
                    _ => {}
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    // Terminal restore.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
