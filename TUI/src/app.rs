use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::action::{Action, AppEvent};
use crate::catalog::{TopicCatalog, TopicRecord};
use crate::config::Config;
use crate::error::LoadError;
use crate::gacha::{GachaEngine, Phase};
use crate::layout::{classify_presentation, PresentationParams};
use crate::loader::CsvThemeLoader;
use crate::ticker::IntervalTicker;
use crate::ui_state::UIState;

/// Session state as the view sees it.
pub enum LoadState {
    Loading,
    Failed(LoadError),
    Ready(GachaEngine<IntervalTicker>),
}

pub struct App {
    pub config: Config,
    pub load: LoadState,
    pub ui: UIState,
    pub running: bool,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(config: Config, events: UnboundedSender<AppEvent>, viewport: (u16, u16)) -> Self {
        Self {
            config,
            load: LoadState::Loading,
            ui: UIState::new(viewport),
            running: true,
            events,
        }
    }

    /// Kicks off the one catalog load of this session on a background task.
    /// The result comes back as [`AppEvent::CatalogLoaded`].
    pub fn spawn_load(&self) {
        let loader = CsvThemeLoader::new(self.config.source(), self.config.columns());
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = loader.load().await;
            // Receiver gone means the session already ended.
            let _ = events.send(AppEvent::CatalogLoaded(result));
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(result) => self.on_catalog_loaded(result),
            AppEvent::Tick(spin) => {
                if let LoadState::Ready(engine) = &mut self.load {
                    engine.on_tick(spin);
                }
            }
        }
    }

    fn on_catalog_loaded(&mut self, result: Result<TopicCatalog, LoadError>) {
        if !matches!(self.load, LoadState::Loading) {
            warn!("ignoring duplicate catalog load");
            return;
        }
        self.load = match result {
            Ok(catalog) => {
                if catalog.is_empty() {
                    warn!("topic catalog is empty; start will have no effect");
                }
                let ticker = IntervalTicker::new(self.events.clone());
                LoadState::Ready(GachaEngine::new(catalog, ticker, self.config.spin_interval()))
            }
            Err(e) => LoadState::Failed(e),
        };
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Toggle => self.toggle(),
            Action::Resize(width, height) => {
                debug!(width, height, "viewport resized");
                self.ui.viewport = (width, height);
            }
            Action::Quit => self.running = false,
        }
    }

    fn toggle(&mut self) {
        let LoadState::Ready(engine) = &mut self.load else {
            return;
        };
        if engine.toggle() {
            if let Some(topic) = engine.selected_topic() {
                info!(genre = %topic.genre, topic = %topic.topic, "topic selected");
            }
        } else if engine.catalog().is_empty() {
            self.ui
                .set_status("No topics available", self.config.status_timeout_ticks);
        }
    }

    /// Frame tick: animation and status expiry only.
    pub fn tick(&mut self) {
        self.ui.tick();
    }

    pub fn engine(&self) -> Option<&GachaEngine<IntervalTicker>> {
        match &self.load {
            LoadState::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.engine().map(|e| e.phase()).unwrap_or_default()
    }

    pub fn displayed_topic(&self) -> Option<&TopicRecord> {
        self.engine().and_then(|e| e.displayed_topic())
    }

    /// Logical viewport width: terminal columns times the assumed cell width.
    pub fn viewport_width(&self) -> u32 {
        self.ui.viewport.0 as u32 * self.config.cell_width_px as u32
    }

    pub fn presentation(&self) -> PresentationParams {
        classify_presentation(
            self.viewport_width(),
            self.displayed_topic().map(|t| t.topic.as_str()),
        )
    }

    /// Session teardown: no tick may fire after this.
    pub fn shutdown(&mut self) {
        if let LoadState::Ready(engine) = &mut self.load {
            engine.shutdown();
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Breakpoint, TopicSize};
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(Config::default(), tx, (80, 24)), rx)
    }

    fn two_topics() -> TopicCatalog {
        TopicCatalog::from_records(vec![
            TopicRecord::new("A", "X"),
            TopicRecord::new("B", "Y"),
        ])
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let (mut app, _rx) = app();
        assert!(matches!(app.load, LoadState::Loading));
        // Toggling before the catalog arrives does nothing.
        app.handle_action(Action::Toggle);
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_load_failure_blocks_session() {
        let (mut app, _rx) = app();
        app.handle_event(AppEvent::CatalogLoaded(Err(LoadError::Parse("bad".into()))));

        assert!(matches!(app.load, LoadState::Failed(LoadError::Parse(_))));
        app.handle_action(Action::Toggle);
        assert!(app.engine().is_none());
    }

    #[tokio::test]
    async fn test_toggle_spins_and_stops() {
        let (mut app, _rx) = app();
        app.handle_event(AppEvent::CatalogLoaded(Ok(two_topics())));

        app.handle_action(Action::Toggle);
        assert_eq!(app.phase(), Phase::Spinning);
        let spin = app.engine().unwrap().current_spin();
        app.handle_event(AppEvent::Tick(spin));

        app.handle_action(Action::Toggle);
        let engine = app.engine().unwrap();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert_eq!(engine.selected_topic(), engine.displayed_topic());

        app.shutdown();
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_status() {
        let (mut app, _rx) = app();
        app.handle_event(AppEvent::CatalogLoaded(Ok(TopicCatalog::default())));

        app.handle_action(Action::Toggle);

        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.ui.status_message.as_deref(), Some("No topics available"));
    }

    #[tokio::test]
    async fn test_spawned_load_reports_back() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = Config {
            themes: std::env::temp_dir()
                .join("chat-gacha-app-missing.csv")
                .to_string_lossy()
                .into_owned(),
            ..Config::default()
        };
        let mut app = App::new(config, tx, (80, 24));

        app.spawn_load();
        let event = rx.recv().await.unwrap();
        app.handle_event(event);

        assert!(matches!(app.load, LoadState::Failed(LoadError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_resize_changes_breakpoint() {
        let (mut app, _rx) = app();
        assert_eq!(app.presentation().breakpoint, Breakpoint::Compact);

        app.handle_action(Action::Resize(96, 30));
        assert_eq!(app.viewport_width(), 768);
        assert_eq!(app.presentation().breakpoint, Breakpoint::Desktop);
        assert_eq!(app.presentation().topic_size, TopicSize::Placeholder);
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut app, _rx) = app();
        app.handle_action(Action::Quit);
        assert!(!app.running);
    }
}
