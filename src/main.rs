use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use laser_arcade::display;
use laser_arcade::input::InputAdapter;
use laser_arcade::screens::Context;
use laser_arcade::surface::Surface;
use laser_arcade::{GameError, Settings, State};

/// stdout is the game display, so logs go to a file. `RUST_LOG` picks the
/// level.
fn init_logging(path: &Path) -> Result<(), GameError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    reports_release: bool,
) -> Result<(), GameError> {
    let (width, height) = settings.resolve_size(terminal::size()?);
    let ctx = Context::new(width, height)
        .with_seed(settings.seed)
        .with_music_volume(settings.music_volume);
    let mut state = State::new(ctx, settings.start_screen);
    let mut input = InputAdapter::new(reports_release);
    let mut frame = Surface::new(width, height);
    let frame_time = settings.frame_duration();

    while state.is_running() {
        let frame_start = Instant::now();

        // Drain all pending terminal events (non-blocking)
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.extend(input.translate(ev));
        }
        events.extend(input.end_frame());

        state.frame(events, &mut frame);

        let pointer = input.pointer().map(|p| (p, state.active().cursor()));
        display::present(out, &frame, pointer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let (settings, origin) = Settings::load()?;
    init_logging(&settings.log_file)?;
    log::info!("{}", origin);
    log::info!("laser_arcade starting with {:?}", settings);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ghostty / kitty-protocol terminals report key releases; others fall
    // back to the hold-window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits
    // on I/O.
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

    let result = run(&mut out, &rx, &settings, keyboard_enhanced);
    if let Err(e) = &result {
        log::error!("frame loop aborted: {}", e);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("laser_arcade exiting");
    result
}
