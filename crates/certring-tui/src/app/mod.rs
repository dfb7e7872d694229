//! Main application state and logic.

mod constants;
mod loading;
mod render;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use certring_core::{
    AutoplayDriver, AutoplayState, AutoplayTick, BuiltinSource, Carousel, CarouselConfig,
    Certificate, ConfigError, ContentSource, FileSource,
};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;

use self::loading::start_load;
use self::render::{AutoplayStatus, RenderContext, render_app};
use self::state::{AppMode, LoadResult, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Where certificates come from.
    source: Arc<dyn ContentSource>,
    /// Short description of the source for the footer.
    source_label: String,
    /// Carousel configuration.
    config: CarouselConfig,
    /// Current mode.
    mode: AppMode,
    /// Color theme.
    theme: Theme,
    /// Certificates and focus.
    carousel: Carousel,
    /// Autoplay timer, owned for the lifetime of the view.
    autoplay: AutoplayDriver,
    /// Ticks from the autoplay timer.
    ticks: mpsc::Receiver<AutoplayTick>,
    /// Channel for the in-flight content load.
    load_rx: Option<mpsc::Receiver<LoadResult>>,
    /// Certificate shown in the detail overlay.
    detail: Option<Certificate>,
    /// Show descriptions on the front card.
    show_details: bool,
    /// Error message to display.
    error: Option<String>,
    /// User settings (persistent configuration).
    user_settings: UserSettings,
    /// Whether settings changes are written to disk.
    persist_settings: bool,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
}

impl App {
    /// Create a new application from CLI-level config and the saved settings.
    pub fn with_config(config: TuiConfig) -> AppResult<Self> {
        let user_settings = UserSettings::load();

        let carousel_config = CarouselConfig::builder()
            .autoplay_period_ms(
                config
                    .autoplay_period_ms
                    .unwrap_or(user_settings.autoplay_period_ms),
            )
            .autoplay(config.autoplay.unwrap_or(user_settings.autoplay))
            .build()
            .map_err(ConfigError::from)?;

        let source: Arc<dyn ContentSource> = match config.content {
            Some(path) => Arc::new(FileSource::new(path)?),
            None => Arc::new(BuiltinSource),
        };

        let mut app = Self::from_parts(source, carousel_config, user_settings);
        if config.light {
            app.theme = Theme::light();
        }
        app.persist_settings = true;
        Ok(app)
    }

    /// Create an application from already resolved parts.
    ///
    /// Settings changes made by an app built this way are kept in memory only.
    pub fn from_parts(
        source: Arc<dyn ContentSource>,
        config: CarouselConfig,
        user_settings: UserSettings,
    ) -> Self {
        let (mut autoplay, ticks) = AutoplayDriver::new(config.autoplay_period());
        autoplay.set_paused(!config.autoplay);

        Self {
            source_label: source.describe(),
            source,
            config,
            mode: AppMode::default(),
            theme: Theme::from_variant(user_settings.theme),
            carousel: Carousel::loading(),
            autoplay,
            ticks,
            load_rx: None,
            detail: None,
            show_details: user_settings.show_details,
            error: None,
            user_settings,
            persist_settings: false,
            needs_redraw: true,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Certificates and focus.
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        self.start_load();
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_event(event);

                    // Drain any additional pending events
                    while self.mode != AppMode::Quit && crossterm::event::poll(Duration::ZERO)? {
                        self.handle_event(crossterm::event::read()?);
                    }
                    self.needs_redraw = true;
                }

                Some(result) = recv_pending(&mut self.load_rx) => {
                    self.load_rx = None;
                    self.handle_load_result(result);
                    self.needs_redraw = true;
                }

                Some(tick) = self.ticks.recv() => {
                    if self.handle_tick(tick) {
                        self.needs_redraw = true;
                    }
                }
            }
        }

        self.autoplay.stop();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Resize(..) => self.needs_redraw = true,
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Press {
            self.handle_action(KeyAction::from_key_event(key_event));
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        // Overlays swallow everything except closing keys
        match self.mode {
            AppMode::Help => {
                match action {
                    KeyAction::Cancel | KeyAction::ToggleHelp | KeyAction::Quit => {
                        self.mode = AppMode::Normal;
                    }
                    KeyAction::ForceQuit => self.mode = AppMode::Quit,
                    _ => {}
                }
                return;
            }
            AppMode::Detail => {
                match action {
                    KeyAction::Cancel | KeyAction::Activate | KeyAction::Quit => {
                        self.detail = None;
                        self.mode = AppMode::Normal;
                    }
                    KeyAction::ForceQuit => self.mode = AppMode::Quit,
                    _ => {}
                }
                return;
            }
            AppMode::Normal | AppMode::Quit => {}
        }

        match action {
            KeyAction::Next => self.carousel.next(),
            KeyAction::Previous => self.carousel.previous(),
            KeyAction::First => self.carousel.jump_to(0),
            KeyAction::Last => {
                if let Some(last) = self.carousel.len().checked_sub(1) {
                    self.carousel.jump_to(last as i64);
                }
            }
            KeyAction::JumpTo(n) => {
                if n >= 1 && usize::from(n) <= self.carousel.len() {
                    self.carousel.jump_to(i64::from(n) - 1);
                }
            }
            KeyAction::Activate => {
                let mut selected = None;
                if self.carousel.activate_front(|cert| selected = Some(cert.clone())) {
                    tracing::info!(
                        id = %selected.as_ref().map(|c| c.id.to_string()).unwrap_or_default(),
                        "certificate selected"
                    );
                    self.detail = selected;
                    self.mode = AppMode::Detail;
                }
            }
            KeyAction::TogglePause => {
                let paused = !self.autoplay.is_paused();
                self.autoplay.set_paused(paused);
                self.user_settings.autoplay = !paused;
                self.save_settings();
            }
            KeyAction::ToggleDetails => {
                self.show_details = !self.show_details;
                self.user_settings.show_details = self.show_details;
                self.save_settings();
            }
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.user_settings.theme = self.theme.variant;
                self.save_settings();
            }
            KeyAction::Reload => self.reload(),
            KeyAction::Cancel => self.error = None,
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    /// Advance focus on a tick from the live timer. Returns whether focus moved.
    fn handle_tick(&mut self, tick: AutoplayTick) -> bool {
        if !self.autoplay.accept(tick) {
            return false;
        }
        self.carousel.advance(1);
        true
    }

    fn handle_load_result(&mut self, result: LoadResult) {
        match result {
            LoadResult::Loaded(certificates) => {
                tracing::debug!(count = certificates.len(), "carousel items replaced");
                self.error = None;
                self.carousel.replace_items(certificates);
                self.autoplay.sync(self.carousel.len());
            }
            LoadResult::Failed(err) => {
                tracing::error!(error = %err, "failed to load certificates");
                self.error = Some(err.to_string());
                self.carousel.cancel_loading();
            }
        }
    }

    fn start_load(&mut self) {
        self.load_rx = Some(start_load(Arc::clone(&self.source), self.config.clone()));
    }

    fn reload(&mut self) {
        if self.load_rx.is_some() {
            return;
        }
        self.error = None;
        self.carousel.set_loading();
        self.start_load();
    }

    fn save_settings(&self) {
        if !self.persist_settings {
            return;
        }
        if let Err(e) = self.user_settings.save() {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    fn autoplay_status(&self) -> AutoplayStatus {
        if self.autoplay.is_paused() {
            AutoplayStatus::Paused
        } else if self.autoplay.state() == AutoplayState::Running {
            AutoplayStatus::Running(self.autoplay.period())
        } else {
            AutoplayStatus::Idle
        }
    }

    fn render(&self, frame: &mut Frame) {
        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            carousel: &self.carousel,
            autoplay: self.autoplay_status(),
            show_details: self.show_details,
            detail: self.detail.as_ref(),
            error: self.error.as_deref(),
            source: &self.source_label,
        };
        render_app(&ctx, frame.area(), frame.buffer_mut());
    }
}

/// Receive from an optional channel, pending forever when there is none.
async fn recv_pending<T>(rx: &mut Option<mpsc::Receiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use certring_core::{ContentError, builtin_certificates};

    use super::*;

    fn app() -> App {
        App::from_parts(
            Arc::new(BuiltinSource),
            CarouselConfig::default(),
            UserSettings::default(),
        )
    }

    fn loaded_app() -> App {
        let mut app = app();
        app.handle_load_result(LoadResult::Loaded(builtin_certificates()));
        app
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let app = app();
        assert!(app.carousel().is_loading());
        assert_eq!(app.autoplay_status(), AutoplayStatus::Idle);
    }

    #[tokio::test]
    async fn test_background_load_fills_carousel() {
        let mut app = app();
        app.start_load();
        let result = recv_pending(&mut app.load_rx).await.unwrap();
        app.handle_load_result(result);

        assert!(!app.carousel().is_loading());
        assert_eq!(app.carousel().len(), 3);
        assert_eq!(app.carousel().focus_index(), Some(0));
        assert_eq!(
            app.autoplay_status(),
            AutoplayStatus::Running(Duration::from_millis(5000))
        );
    }

    #[tokio::test]
    async fn test_navigation_keys() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::Next);
        assert_eq!(app.carousel().focus_index(), Some(1));
        app.handle_action(KeyAction::Previous);
        app.handle_action(KeyAction::Previous);
        assert_eq!(app.carousel().focus_index(), Some(2));
        app.handle_action(KeyAction::First);
        assert_eq!(app.carousel().focus_index(), Some(0));
        app.handle_action(KeyAction::Last);
        assert_eq!(app.carousel().focus_index(), Some(2));
        app.handle_action(KeyAction::JumpTo(2));
        assert_eq!(app.carousel().focus_index(), Some(1));
        app.handle_action(KeyAction::JumpTo(9));
        assert_eq!(app.carousel().focus_index(), Some(1));
    }

    #[tokio::test]
    async fn test_activate_opens_detail_for_front() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::Next);
        app.handle_action(KeyAction::Activate);
        assert_eq!(app.mode(), AppMode::Detail);
        assert_eq!(app.detail.as_ref().map(|c| c.id.as_str()), Some("2"));

        // Navigation is ignored while the overlay is open
        app.handle_action(KeyAction::Next);
        assert_eq!(app.carousel().focus_index(), Some(1));

        app.handle_action(KeyAction::Cancel);
        assert_eq!(app.mode(), AppMode::Normal);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_activate_while_loading_does_nothing() {
        let mut app = app();
        app.handle_action(KeyAction::Activate);
        assert_eq!(app.mode(), AppMode::Normal);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_help_overlay_closes() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::ToggleHelp);
        assert_eq!(app.mode(), AppMode::Help);
        app.handle_action(KeyAction::Quit);
        assert_eq!(app.mode(), AppMode::Normal);
        app.handle_action(KeyAction::Quit);
        assert_eq!(app.mode(), AppMode::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_advances_focus() {
        let mut app = loaded_app();
        let tick = app.ticks.recv().await.unwrap();
        assert!(app.handle_tick(tick));
        assert_eq!(app.carousel().focus_index(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_discards_pending_tick() {
        let mut app = loaded_app();
        let tick = app.ticks.recv().await.unwrap();

        app.handle_action(KeyAction::TogglePause);
        assert_eq!(app.autoplay_status(), AutoplayStatus::Paused);
        assert!(!app.handle_tick(tick));
        assert_eq!(app.carousel().focus_index(), Some(0));

        app.handle_action(KeyAction::TogglePause);
        assert!(matches!(app.autoplay_status(), AutoplayStatus::Running(_)));
    }

    #[tokio::test]
    async fn test_disabled_autoplay_starts_paused() {
        let config = CarouselConfig::builder().autoplay(false).build().unwrap();
        let mut app = App::from_parts(Arc::new(BuiltinSource), config, UserSettings::default());
        app.handle_load_result(LoadResult::Loaded(builtin_certificates()));
        assert_eq!(app.autoplay_status(), AutoplayStatus::Paused);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_items() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::Next);
        app.carousel.set_loading();
        app.handle_load_result(LoadResult::Failed(ContentError::NotFound {
            path: "missing.json".into(),
        }));

        assert!(!app.carousel().is_loading());
        assert_eq!(app.carousel().focus_index(), Some(1));
        assert!(app.error.as_deref().unwrap().contains("missing.json"));

        app.handle_action(KeyAction::Cancel);
        assert!(app.error.is_none());
    }

    #[tokio::test]
    async fn test_reload_marks_loading() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::Reload);
        assert!(app.carousel().is_loading());
        assert!(app.load_rx.is_some());

        let result = recv_pending(&mut app.load_rx).await.unwrap();
        app.load_rx = None;
        app.handle_load_result(result);
        assert_eq!(app.carousel().len(), 3);
    }

    #[tokio::test]
    async fn test_toggles_update_settings() {
        let mut app = loaded_app();
        app.handle_action(KeyAction::ToggleTheme);
        assert_eq!(app.user_settings.theme, crate::theme::ThemeVariant::Light);
        app.handle_action(KeyAction::ToggleDetails);
        assert!(!app.show_details);
        assert!(!app.user_settings.show_details);
    }
}
