// SPDX-License-Identifier: MIT
//
// n-timer — a terminal countdown timer and stopwatch with big digits.
//
// This is the main binary that wires together the two crates:
//
//   n-clock → digit-pair arithmetic, parsing, clock state, durations
//   n-tty   → raw terminal, ANSI output, input decoding, event loop
//
// The TimerApp struct implements n-tty's App trait, connecting the
// once-per-second event loop to the clock state. Each second flows
// through:
//
//   tick → ClockState::tick (decrement or increment) → paint
//   keypress → on_key → reset / pause / recolor / quit
//
// The clock frame is centered on the terminal: six 6×5 block glyphs
// with colon dots between the fields, an optional border (-x), and an
// eight-character label band under the frame showing the start time
// (-d) or "Stopped " while paused.
//
// The `-t` flag never reaches any of this: it parses the reference,
// prints the folded difference to stdout, and exits.

use std::env;
use std::io;
use std::process;

use n_clock::span::time_until;
use n_clock::wall;
use n_clock::{ClockState, Mode, ParsedDigits};

use n_tty::color::Color;
use n_tty::event_loop::{Action, App, EventLoop};
use n_tty::glyph;
use n_tty::input::Key;
use n_tty::screen::Screen;
use n_tty::terminal::Size;

// ─── Frame geometry ─────────────────────────────────────────────────────────
//
// Six glyphs and two colons on a fixed 54×7 frame, one row and one
// column of margin around the 5-row digit band.

/// Clock frame width in columns.
const FRAME_W: u16 = 54;
/// Clock frame height in rows.
const FRAME_H: u16 = 7;
/// Top row of the digit band, relative to the frame.
const DIGIT_ROW: u16 = 1;
/// Column of each digit glyph (hh mm ss), relative to the frame.
const DIGIT_COLS: [u16; 6] = [1, 8, 20, 27, 39, 46];
/// Column of each colon, relative to the frame.
const COLON_COLS: [u16; 2] = [16, 35];
/// The label band overlaps the frame's bottom edge and extends below.
const LABEL_H: u16 = 3;
/// Labels are always exactly eight characters (`hh:mm:ss`).
const LABEL_W: u16 = 8;

// ─── CLI ────────────────────────────────────────────────────────────────────

/// Resolved command line: what the process should do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// `-h` — print usage, exit 0.
    Usage,
    /// `-v` — print the version, exit 0.
    Version,
    /// `-t hh:mm:ss` — print the time until the reference, exit.
    Difference { reference: String },
    /// Enter the interactive clock loop.
    Run(Options),
}

/// Options for the interactive clock.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    /// The positional time argument; absent means stopwatch mode.
    time: Option<String>,
    /// Clock color (`-C`), default green.
    color: Color,
    /// Draw borders (`-x`).
    boxed: bool,
    /// Show the start time under the clock (`-d`).
    show_start: bool,
}

/// Why the command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CliError {
    UnknownFlag(String),
    MissingColorValue,
    InvalidColor(String),
    /// `-t` needs exactly one positional argument.
    DifferenceArity,
    ExtraArgument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown option: {flag}"),
            Self::MissingColorValue => f.write_str("-C requires a color name"),
            Self::InvalidColor(name) => write!(f, "invalid color specified: {name}"),
            Self::DifferenceArity => f.write_str("-t requires exactly one time argument"),
            Self::ExtraArgument(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// The usage page (`-h`, and the trailer on usage errors).
fn usage_text() -> String {
    format!(
        "usage : n-timer [-xdvh] [-C color] [-t] hh:mm:ss\n\
         \x20   no parameter      Stopwatch mode (count up)\n\
         \x20       -t            Print the time until the given time of day\n\
         \x20       -x            Show box\n\
         \x20       -d            Show starting time\n\
         \x20       -C color      Set the clock color\n\
         \x20          color  ==  {}\n\
         \x20       -v            Show n-timer version\n\
         \x20       -h            Show this page\n",
        Color::names().join(" | ")
    )
}

/// Parse the argument vector (without the program name).
fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut difference = false;
    let mut boxed = false;
    let mut show_start = false;
    let mut color = Color::Green;
    let mut time: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" => return Ok(Command::Usage),
            "-v" => return Ok(Command::Version),
            "-t" => difference = true,
            "-x" => boxed = true,
            "-d" => show_start = true,
            "-C" => {
                let name = iter.next().ok_or(CliError::MissingColorValue)?;
                color = Color::from_name(name)
                    .ok_or_else(|| CliError::InvalidColor(name.clone()))?;
            }
            flag if flag.len() > 1 && flag.starts_with('-') => {
                return Err(CliError::UnknownFlag(flag.to_string()));
            }
            positional => {
                if time.is_some() {
                    return Err(CliError::ExtraArgument(positional.to_string()));
                }
                time = Some(positional.to_string());
            }
        }
    }

    if difference {
        return time.map_or(Err(CliError::DifferenceArity), |reference| {
            Ok(Command::Difference { reference })
        });
    }

    Ok(Command::Run(Options {
        time,
        color,
        boxed,
        show_start,
    }))
}

// ─── TimerApp ───────────────────────────────────────────────────────────────

/// The clock application: one [`ClockState`] plus display options.
struct TimerApp {
    state: ClockState,
    color: Color,
    boxed: bool,
    show_start: bool,
    /// The formatted start value, shown under the clock with `-d`.
    start_label: String,
    /// Blink phase once a countdown has finished: `true` paints the
    /// digits invisible for this second.
    blink_hidden: bool,
}

impl TimerApp {
    fn new(state: ClockState, opts: &Options) -> Self {
        Self {
            start_label: state.start_label(),
            state,
            color: opts.color,
            boxed: opts.boxed,
            show_start: opts.show_start,
            blink_hidden: false,
        }
    }

    /// The label band's content — always exactly eight characters.
    fn label(&self) -> &str {
        if self.state.stopped {
            "Stopped "
        } else if self.state.mode == Mode::Timer && self.show_start {
            &self.start_label
        } else {
            "        "
        }
    }
}

impl App for TimerApp {
    fn on_key(&mut self, key: &Key) -> Action {
        match key {
            Key::Char('q' | 'Q') | Key::Ctrl('c') | Key::Escape => return Action::Quit,
            Key::Char('r' | 'R') => self.state.reset(),
            Key::Char(' ') => self.state.toggle_stopped(),
            Key::Char(ch @ '0'..='7') => {
                #[allow(clippy::cast_possible_truncation)] // '0'..='7' is ASCII.
                if let Some(color) = Color::from_digit(*ch as u8 - b'0') {
                    self.color = color;
                }
            }
            _ => {}
        }
        Action::Continue
    }

    fn on_tick(&mut self) -> bool {
        let changed = self.state.tick();

        // A finished countdown blinks until quit, paused or not.
        if self.state.mode == Mode::Timer && self.state.time.is_zero() {
            self.blink_hidden = !self.blink_hidden;
            return true;
        }
        self.blink_hidden = false;

        changed
    }

    fn paint(&mut self, screen: &mut Screen, size: Size) -> io::Result<()> {
        let origin_x = size.cols.saturating_sub(FRAME_W) / 2;
        let origin_y = size.rows.saturating_sub(FRAME_H + LABEL_H - 1) / 2;

        let digit_color = if self.blink_hidden {
            None
        } else {
            Some(self.color)
        };

        if self.boxed {
            screen.draw_box(origin_x, origin_y, FRAME_W, FRAME_H)?;
        }

        let time = self.state.time;
        let digits = [
            time.hours.tens,
            time.hours.ones,
            time.minutes.tens,
            time.minutes.ones,
            time.seconds.tens,
            time.seconds.ones,
        ];
        for (col, digit) in DIGIT_COLS.iter().zip(digits) {
            glyph::draw_digit(
                screen,
                origin_x + col,
                origin_y + DIGIT_ROW,
                digit,
                digit_color,
            )?;
        }
        for col in COLON_COLS {
            glyph::draw_colon(screen, origin_x + col, origin_y + DIGIT_ROW, Some(self.color))?;
        }

        // Label band, centered, overlapping the frame's bottom edge.
        let label_x = origin_x + FRAME_W / 2 - LABEL_W / 2 - 1;
        let label_y = origin_y + FRAME_H - 1;
        if self.boxed {
            screen.draw_box(label_x - 1, label_y, LABEL_W + 2, LABEL_H)?;
        }
        screen.put_str(label_x, label_y + 1, self.label(), Some(self.color), None)?;

        Ok(())
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

/// Parse a time argument or die with its one-line diagnostic.
fn parse_time_or_exit(input: &str) -> ParsedDigits {
    ParsedDigits::parse(input).unwrap_or_else(|e| {
        eprintln!("n-timer: {e}");
        process::exit(1);
    })
}

fn run_clock(opts: &Options) {
    let (mode, initial) = match opts.time.as_deref() {
        Some(time) => (Mode::Timer, parse_time_or_exit(time)),
        None => (Mode::Stopwatch, ParsedDigits::default()),
    };

    let state = ClockState::new(mode, initial);

    // A countdown from zero has nothing to count.
    if mode == Mode::Timer && state.time.is_zero() {
        eprintln!("n-timer: time argument is zero");
        process::exit(1);
    }

    let mut app = TimerApp::new(state, opts);

    let mut event_loop = EventLoop::new().unwrap_or_else(|e| {
        eprintln!("n-timer: failed to initialize terminal: {e}");
        process::exit(1);
    });

    if let Err(e) = event_loop.run(&mut app) {
        eprintln!("n-timer: {e}");
        process::exit(1);
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let command = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("n-timer: {e}");
        if matches!(
            e,
            CliError::UnknownFlag(_) | CliError::DifferenceArity | CliError::ExtraArgument(_)
        ) {
            eprint!("{}", usage_text());
        }
        process::exit(1);
    });

    match command {
        Command::Usage => print!("{}", usage_text()),
        Command::Version => println!("n-timer v{}", env!("CARGO_PKG_VERSION")),
        Command::Difference { reference } => {
            let reference = parse_time_or_exit(&reference);
            println!("{}", time_until(&reference, wall::now_digits()));
        }
        Command::Run(opts) => run_clock(&opts),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn press(ch: char) -> Key {
        Key::Char(ch)
    }

    fn stopwatch_app() -> TimerApp {
        let opts = Options {
            time: None,
            color: Color::Green,
            boxed: false,
            show_start: false,
        };
        TimerApp::new(
            ClockState::new(Mode::Stopwatch, ParsedDigits::default()),
            &opts,
        )
    }

    fn timer_app(time: &str, show_start: bool) -> TimerApp {
        let opts = Options {
            time: Some(time.to_string()),
            color: Color::Green,
            boxed: false,
            show_start,
        };
        TimerApp::new(
            ClockState::new(Mode::Timer, ParsedDigits::parse(time).unwrap()),
            &opts,
        )
    }

    // ── Argument parsing ──────────────────────────────────────────────

    #[test]
    fn no_arguments_is_a_default_stopwatch() {
        let cmd = parse_args(&[]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                time: None,
                color: Color::Green,
                boxed: false,
                show_start: false,
            })
        );
    }

    #[test]
    fn positional_time_is_a_timer() {
        let Command::Run(opts) = parse_args(&args(&["10:30:00"])).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(opts.time.as_deref(), Some("10:30:00"));
    }

    #[test]
    fn display_flags() {
        let Command::Run(opts) = parse_args(&args(&["-x", "-d", "5:00"])).unwrap() else {
            panic!("expected Run");
        };
        assert!(opts.boxed);
        assert!(opts.show_start);
    }

    #[test]
    fn color_flag_resolves_names() {
        let Command::Run(opts) = parse_args(&args(&["-C", "Cyan"])).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(opts.color, Color::Cyan);
    }

    #[test]
    fn color_flag_rejects_unknown_names() {
        assert_eq!(
            parse_args(&args(&["-C", "purple"])),
            Err(CliError::InvalidColor("purple".to_string()))
        );
    }

    #[test]
    fn color_flag_requires_a_value() {
        assert_eq!(parse_args(&args(&["-C"])), Err(CliError::MissingColorValue));
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Usage);
        assert_eq!(parse_args(&args(&["-v"])).unwrap(), Command::Version);
    }

    #[test]
    fn difference_needs_its_argument() {
        assert_eq!(parse_args(&args(&["-t"])), Err(CliError::DifferenceArity));

        let cmd = parse_args(&args(&["-t", "12:00:00"])).unwrap();
        assert_eq!(
            cmd,
            Command::Difference {
                reference: "12:00:00".to_string()
            }
        );
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert_eq!(
            parse_args(&args(&["-z"])),
            Err(CliError::UnknownFlag("-z".to_string()))
        );
    }

    #[test]
    fn second_positional_is_rejected() {
        assert_eq!(
            parse_args(&args(&["1:00", "2:00"])),
            Err(CliError::ExtraArgument("2:00".to_string()))
        );
    }

    #[test]
    fn usage_lists_every_color() {
        let text = usage_text();
        for name in Color::names() {
            assert!(text.contains(name), "usage must list {name}");
        }
    }

    // ── Key handling ──────────────────────────────────────────────────

    #[test]
    fn quit_keys() {
        let mut app = stopwatch_app();
        assert_eq!(app.on_key(&press('q')), Action::Quit);
        assert_eq!(app.on_key(&press('Q')), Action::Quit);
        assert_eq!(app.on_key(&Key::Ctrl('c')), Action::Quit);
        assert_eq!(app.on_key(&Key::Escape), Action::Quit);
    }

    #[test]
    fn reset_key_restores_initial_value() {
        let mut app = timer_app("00:00:30", false);
        app.on_tick();
        app.on_tick();
        assert_eq!(app.state.time.to_string(), "00:00:28");

        assert_eq!(app.on_key(&press('r')), Action::Continue);
        assert_eq!(app.state.time.to_string(), "00:00:30");
    }

    #[test]
    fn space_toggles_pause() {
        let mut app = stopwatch_app();
        app.on_key(&press(' '));
        assert!(app.state.stopped);
        assert!(!app.on_tick(), "paused clock must not step");

        app.on_key(&press(' '));
        assert!(!app.state.stopped);
        assert!(app.on_tick());
    }

    #[test]
    fn digit_keys_change_the_color() {
        let mut app = stopwatch_app();
        app.on_key(&press('4'));
        assert_eq!(app.color, Color::Blue);
        app.on_key(&press('0'));
        assert_eq!(app.color, Color::Black);

        // '8' and '9' are not palette entries.
        app.on_key(&press('8'));
        assert_eq!(app.color, Color::Black);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut app = stopwatch_app();
        assert_eq!(app.on_key(&press('z')), Action::Continue);
        assert_eq!(app.state.time.to_string(), "00:00:00");
    }

    // ── Labels ────────────────────────────────────────────────────────

    #[test]
    fn label_is_blank_by_default() {
        let app = stopwatch_app();
        assert_eq!(app.label(), "        ");
    }

    #[test]
    fn label_shows_start_time_with_flag() {
        let app = timer_app("1:30:", true);
        assert_eq!(app.label(), "01:30:00");
    }

    #[test]
    fn label_shows_stopped_while_paused() {
        let mut app = timer_app("1:30:", true);
        app.on_key(&press(' '));
        assert_eq!(app.label(), "Stopped ");
        app.on_key(&press(' '));
        assert_eq!(app.label(), "01:30:00");
    }

    #[test]
    fn stopwatch_hides_start_time_even_with_flag() {
        let opts = Options {
            time: None,
            color: Color::Green,
            boxed: false,
            show_start: true,
        };
        let app = TimerApp::new(
            ClockState::new(Mode::Stopwatch, ParsedDigits::default()),
            &opts,
        );
        assert_eq!(app.label(), "        ");
    }

    #[test]
    fn labels_are_exactly_eight_chars() {
        let mut app = timer_app("10:00:00", true);
        assert_eq!(app.label().len(), 8);
        app.on_key(&press(' '));
        assert_eq!(app.label().len(), 8);
    }

    // ── Blink ─────────────────────────────────────────────────────────

    #[test]
    fn finished_countdown_blinks() {
        let mut app = timer_app("00:00:01", false);
        assert!(app.on_tick());
        assert!(app.state.time.is_zero());

        // Zero reached: each further tick flips the blink phase and
        // still requests a repaint.
        let first = app.blink_hidden;
        assert!(app.on_tick());
        assert_ne!(app.blink_hidden, first);
        assert!(app.on_tick());
        assert_eq!(app.blink_hidden, first);
    }

    #[test]
    fn running_clock_does_not_blink() {
        let mut app = timer_app("00:01:00", false);
        app.on_tick();
        assert!(!app.blink_hidden);

        let mut watch = stopwatch_app();
        watch.on_tick();
        assert!(!watch.blink_hidden);
    }

    // ── Painting ──────────────────────────────────────────────────────

    fn painted(app: &mut TimerApp) -> String {
        let mut screen = Screen::new();
        app.paint(&mut screen, Size { cols: 80, rows: 24 }).unwrap();
        String::from_utf8(screen.buffer().to_vec()).unwrap()
    }

    #[test]
    fn paint_produces_colored_cells() {
        let out = painted(&mut stopwatch_app());
        assert!(out.contains("\x1b[42m"), "green digit cells");
    }

    #[test]
    fn paint_honors_runtime_color() {
        let mut app = stopwatch_app();
        app.on_key(&press('1'));
        let out = painted(&mut app);
        assert!(out.contains("\x1b[41m"), "red digit cells");
        assert!(!out.contains("\x1b[42m"), "no green left");
    }

    #[test]
    fn paint_box_only_when_asked() {
        let mut plain = stopwatch_app();
        assert!(!painted(&mut plain).contains('┌'));

        let mut boxed = stopwatch_app();
        boxed.boxed = true;
        assert!(painted(&mut boxed).contains('┌'));
    }

    #[test]
    fn blinked_out_frame_keeps_dots_and_label_only() {
        let mut app = timer_app("00:00:01", false);
        app.on_tick(); // Reaches zero.
        app.blink_hidden = true;

        let out = painted(&mut app);
        // Four colon dots stay lit as background runs; the label text
        // keeps its foreground color; every digit cell paints default.
        assert_eq!(out.matches("\x1b[42m").count(), 4);
        assert_eq!(out.matches("\x1b[32m").count(), 1);
    }
}
