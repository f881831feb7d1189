use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use duck_hunt::assets::Assets;
use duck_hunt::audio::{self, Audio};
use duck_hunt::compute::{init_state, shoot, stop, tick};
use duck_hunt::config::GameConfig;
use duck_hunt::display::{self, Viewport};
use duck_hunt::entities::{GameState, GameStatus};
use duck_hunt::input::{translate, InputEvent, Pointer};

const TITLE: &str = "Duck Hunt";
const LOG_FILE: &str = "duck_hunt.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stderr would scribble over the alternate screen.
fn init_logging() {
    if let Ok(file) = File::create(LOG_FILE) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Everything the loop needs that outlives a single tick.
struct Session {
    config: GameConfig,
    assets: Assets,
    audio: Option<Audio>,
    rng: StdRng,
    viewport: Viewport,
    pointer: Pointer,
    clock: Instant,
}

impl Session {
    fn now(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    /// Apply one input event.  Returns the (possibly) new state.
    fn handle(&mut self, state: GameState, input: InputEvent) -> GameState {
        match input {
            InputEvent::Quit => stop(&state),
            InputEvent::PointerMoved { column, row } => {
                self.pointer.track(column, row);
                state
            }
            InputEvent::PointerPressed { column, row } => {
                self.pointer.track(column, row);
                audio::play(self.audio.as_ref(), self.assets.shot.as_ref());

                let (x, y) = self.viewport.to_logical(self.pointer.column, self.pointer.row);
                let (next, hits) = shoot(&state, &self.config, x, y, &mut self.rng);
                if hits > 0 {
                    audio::play(self.audio.as_ref(), self.assets.hit.as_ref());
                    info!("Hit! Score: {}", next.score);
                }
                next
            }
            InputEvent::Resized { columns, rows } => {
                self.viewport = Viewport::new(columns, rows, &self.config);
                state
            }
        }
    }
}

/// Run until the player closes the game.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame = session.config.frame_duration();
    let mut state = init_state(
        &session.config,
        session.assets.frame_count(),
        session.now(),
        &mut session.rng,
    );

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Some(input) = translate(&ev) {
                state = session.handle(state, input);
            }
            if state.status == GameStatus::Stopped {
                break;
            }
        }
        if state.status == GameStatus::Stopped {
            info!("Closed at score {} level {}", state.score, state.level);
            return Ok(());
        }

        let level = state.level;
        let now = session.now();
        state = tick(&state, &session.config, now, &mut session.rng);
        if state.level > level {
            info!("Level up! Level: {}", state.level);
        }

        display::render(
            out,
            &state,
            &session.assets,
            session.viewport,
            session.pointer,
            &session.config,
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config = GameConfig::default();
    let assets = Assets::load(&config);
    let audio = Audio::new()
        .map_err(|e| warn!("No audio output ({}), playing silently", e))
        .ok();

    let seed: u64 = rand::random();
    info!("Game initialized with seed: {}", seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size().and_then(|(columns, rows)| {
        let mut session = Session {
            viewport: Viewport::new(columns, rows, &config),
            config,
            assets,
            audio,
            rng: StdRng::seed_from_u64(seed),
            pointer: Pointer::default(),
            clock: Instant::now(),
        };
        game_loop(&mut out, &mut session, &rx)
    });

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
