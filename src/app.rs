use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::anilist::{AniListClient, MediaItem, RecommendationSource};
use crate::config::Config;
use crate::error::Result;
use crate::genre::{GenreQuery, NormalizeOptions};
use crate::recommend::{IndexSource, RandomIndex};
use crate::state::RequestState;
use crate::ui::{Theme, render_recommend_view, widgets};

pub enum AppMessage {
    Fetched(Result<Vec<MediaItem>>),
}

pub struct App {
    pub config: Config,
    pub running: bool,
    pub theme: Theme,

    pub input: String,
    pub state: RequestState,
    /// Advances once per loop iteration, drives the loading spinner
    pub tick: usize,

    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    pub msg_rx: mpsc::UnboundedReceiver<AppMessage>,

    pub source: Arc<dyn RecommendationSource + Send + Sync>,
    pub picker: Box<dyn IndexSource + Send>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let source = Arc::new(AniListClient::new(&config.anilist));
        Self::with_source(config, source, Box::new(RandomIndex))
    }

    pub fn with_source(
        config: Config,
        source: Arc<dyn RecommendationSource + Send + Sync>,
        picker: Box<dyn IndexSource + Send>,
    ) -> Self {
        let theme = Theme::from_config(&config.ui.theme);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        Self {
            config,
            running: true,
            theme,

            input: String::new(),
            state: RequestState::default(),
            tick: 0,

            msg_tx,
            msg_rx,

            source,
            picker,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
            self.process_messages();
            self.tick = self.tick.wrapping_add(1);
        }

        info!("Exiting");
        Ok(())
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg);
        }
    }

    pub fn apply(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Fetched(outcome) => {
                self.state.resolve(outcome, self.picker.as_mut());
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        render_recommend_view(
            frame,
            chunks[0],
            &self.input,
            &self.state,
            self.tick,
            &self.theme,
        );

        let help = widgets::help_bar(
            &[("Enter", "recommend"), ("Ctrl-U", "clear"), ("Esc", "quit")],
            &self.theme,
        );
        frame.render_widget(help, chunks[1]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Start a fetch for the current input. Ignored while one is in flight.
    pub fn submit(&mut self) -> bool {
        if !self.state.begin() {
            debug!("Submit ignored, request already in flight");
            return false;
        }

        let options = NormalizeOptions {
            drop_empty: self.config.general.drop_empty_genres,
        };
        let query = GenreQuery::parse_with(&self.input, options);
        info!(genres = ?query.genres(), "Requesting recommendation");

        let source = Arc::clone(&self.source);
        let tx = self.msg_tx.clone();

        tokio::spawn(async move {
            let outcome = source.fetch(&query).await;
            let _ = tx.send(AppMessage::Fetched(outcome));
        });

        true
    }
}

pub fn init_terminal() -> io::Result<DefaultTerminal> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    Ok(ratatui::init())
}

pub fn restore_terminal() -> io::Result<()> {
    ratatui::restore();
    Ok(())
}
