//! App: terminal init, frame loop, event polling and held-input tracking.

use crate::GameConfig;
use crate::game::{GameState, InputFrame};
use crate::input::{Action, Gesture, key_to_action, mouse_to_gesture};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Target frame time; also the event-poll timeout that paces the loop.
const FRAME: Duration = Duration::from_millis(16);
/// Taps closer together than this are ignored (double-tap suppression).
const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(250);

/// Keys currently held down, tracked from press/release events.
#[derive(Debug, Default, Clone, Copy)]
struct Held {
    left: bool,
    right: bool,
    down: bool,
    rotate: bool,
}

pub struct App {
    state: GameState,
    held: Held,
    /// Mouse button held in the soft-drop region.
    drop_held: bool,
    last_tap: Option<Instant>,
    last_frame: Instant,
}

impl App {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: GameState::new(config),
            held: Held::default(),
            drop_held: false,
            last_tap: None,
            last_frame: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{
                DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
                PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
            },
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        // Release events are needed to track held keys; not every terminal
        // supports the enhancement, so a failure here is fine.
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now.duration_since(self.last_frame).as_secs_f32();
            self.last_frame = now;

            let mut input = InputFrame::default();
            if !self.poll_input(&mut input)? {
                return Ok(());
            }
            input.left_held = self.held.left;
            input.right_held = self.held.right;
            input.soft_drop_held = self.held.down || self.drop_held;

            self.state.update(dt, &input);
            terminal.draw(|frame| crate::ui::draw(frame, &self.state))?;
        }
    }

    /// Blocks briefly for pacing, then drains every pending event into
    /// `input`. Returns false once quit was requested.
    fn poll_input(&mut self, input: &mut InputFrame) -> Result<bool> {
        if event::poll(FRAME)? {
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) => {
                        if !self.handle_key(key, input) {
                            return Ok(false);
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, input),
                    _ => {}
                }
            }
        }
        Ok(true)
    }

    fn handle_key(&mut self, key: KeyEvent, input: &mut InputFrame) -> bool {
        let action = key_to_action(key);
        match key.kind {
            KeyEventKind::Press => match action {
                Action::Quit => return false,
                Action::MoveLeft => {
                    // A press while already held is an OS repeat, not a new tap.
                    if !self.held.left {
                        input.left = true;
                    }
                    self.held.left = true;
                }
                Action::MoveRight => {
                    if !self.held.right {
                        input.right = true;
                    }
                    self.held.right = true;
                }
                Action::Rotate => {
                    if !self.held.rotate {
                        input.rotate = true;
                    }
                    self.held.rotate = true;
                }
                Action::SoftDrop => self.held.down = true,
                Action::None => {}
            },
            KeyEventKind::Release => match action {
                Action::MoveLeft => self.held.left = false,
                Action::MoveRight => self.held.right = false,
                Action::Rotate => self.held.rotate = false,
                Action::SoftDrop => self.held.down = false,
                _ => {}
            },
            KeyEventKind::Repeat => {}
        }
        true
    }

    fn handle_mouse(&mut self, event: MouseEvent, input: &mut InputFrame) {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        match mouse_to_gesture(event, cols, rows) {
            Gesture::Rotate => input.rotate = true,
            gesture @ (Gesture::TapLeft | Gesture::TapRight) => {
                let now = Instant::now();
                let double_tap = self
                    .last_tap
                    .is_some_and(|tap| now.duration_since(tap) < DOUBLE_TAP_WINDOW);
                self.last_tap = Some(now);
                if !double_tap {
                    if gesture == Gesture::TapLeft {
                        input.left = true;
                    } else {
                        input.right = true;
                    }
                }
            }
            Gesture::DropStart => self.drop_held = true,
            Gesture::DropEnd => self.drop_held = false,
            Gesture::None => {}
        }
    }
}
