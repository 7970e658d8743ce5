use iced::widget::{column, container};
use iced::{keyboard, window};
use iced::{Element, Length, Subscription, Task, Theme};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

mod config;
mod error;
mod feed;
mod refresh;
mod state;
mod ui;

#[cfg(test)]
mod test_utils;

use config::DashboardConfig;
use error::{FetchError, SnapshotError};
use feed::snapshot::{Snapshot, SnapshotLoader};
use state::data::{CameraRecord, ImageRequest, SortKey};
use state::catalog::FetchOutcome;
use state::reveal::Reveal;
use state::session::Session;

/// Frame period of the card entrance animation
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Main application state
struct Dashboard {
    /// Catalog, view state, viewer and card load states
    session: Session,
    config: DashboardConfig,
    /// Shared HTTP client (connection pool)
    client: reqwest::Client,
    /// Fully built catalog query
    query_url: Url,
    snapshots: SnapshotLoader,
    /// Staggered entrance of the cards
    reveal: Reveal,
    /// Time of the last animation frame
    now: Instant,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Catalog fetch finished (tagged with its generation)
    CamerasLoaded(u64, Result<Vec<CameraRecord>, FetchError>),
    /// User asked to fetch the catalog again
    Retry,
    SearchChanged(String),
    SortSelected(SortKey),
    /// Live refresh timer fired
    RefreshTick,
    /// A snapshot download finished
    SnapshotLoaded {
        id: i64,
        url: String,
        result: Result<Snapshot, SnapshotError>,
    },
    OpenViewer(i64),
    CloseViewer,
    NextCamera,
    PrevCamera,
    /// Animation frame for the card entrance
    Animate(Instant),
    /// The window is being closed
    CloseRequested(window::Id),
}

impl Dashboard {
    /// Create the dashboard and start the catalog fetch
    fn new(config: DashboardConfig, client: reqwest::Client, query_url: Url) -> (Self, Task<Message>) {
        let now = Instant::now();
        let snapshots = SnapshotLoader::new(client.clone(), config.max_concurrent_snapshots);
        let reveal = Reveal::new(now, config.stagger_step, config.fade_duration);

        let mut dashboard = Dashboard {
            session: Session::new(),
            config,
            client,
            query_url,
            snapshots,
            reveal,
            now,
        };
        let task = dashboard.fetch_catalog();
        (dashboard, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CamerasLoaded(generation, result) => {
                let (outcome, requests) = self.session.finish_fetch(generation, result);
                if let FetchOutcome::Loaded(_) = outcome {
                    self.restart_reveal();
                }
                self.download(requests)
            }
            Message::Retry => self.fetch_catalog(),
            Message::SearchChanged(term) => {
                let requests = self.session.set_search_term(term);
                self.download(requests)
            }
            Message::SortSelected(key) => {
                let requests = self.session.set_sort_key(key);
                self.restart_reveal();
                self.download(requests)
            }
            Message::RefreshTick => {
                let requests = self.session.refresh_tick();
                self.download(requests)
            }
            Message::SnapshotLoaded { id, url, result } => {
                if let Err(err) = &result {
                    tracing::warn!("Snapshot for camera {} failed: {}", id, err);
                }
                let requests = self.session.snapshot_loaded(id, &url, result);
                self.download(requests)
            }
            Message::OpenViewer(id) => {
                let requests = self.session.open_viewer(id);
                self.download(requests)
            }
            Message::CloseViewer => {
                self.session.close_viewer();
                Task::none()
            }
            Message::NextCamera => {
                let requests = self.session.next();
                self.download(requests)
            }
            Message::PrevCamera => {
                let requests = self.session.prev();
                self.download(requests)
            }
            Message::Animate(now) => {
                self.now = now;
                Task::none()
            }
            Message::CloseRequested(_) => {
                self.session.shutdown();
                tracing::info!("Session ended; live refresh stopped");
                iced::exit()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = column![
            ui::header::view(&self.session),
            ui::controls::view(self.session.search_term(), self.session.sort_key()),
            ui::grid::view(&self.session, &self.reveal, self.now),
        ]
        .spacing(20)
        .padding(32);

        let base: Element<Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();

        match self.session.selected() {
            Some(record) => ui::viewer::overlay(base, record, self.session.card_view(record)),
            None => base,
        }
    }

    /// Timers and key bindings, each alive only while it is needed
    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![window::close_requests().map(Message::CloseRequested)];

        if self.session.is_live() {
            subscriptions.push(
                iced::time::every(self.config.refresh_interval).map(|_| Message::RefreshTick),
            );
        }
        if self.session.viewer().wants_keyboard() {
            subscriptions.push(keyboard::on_key_press(ui::viewer::key_binding));
        }
        if self.reveal.is_running(self.session.visible().len(), self.now) {
            subscriptions.push(iced::time::every(ANIMATION_FRAME).map(Message::Animate));
        }

        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Issue a fresh catalog fetch; any older one still running is ignored
    fn fetch_catalog(&mut self) -> Task<Message> {
        let generation = self.session.begin_fetch();
        tracing::info!("Fetching camera catalog (#{})", generation);

        Task::perform(
            feed::client::fetch_cameras(self.client.clone(), self.query_url.clone()),
            move |result| Message::CamerasLoaded(generation, result),
        )
    }

    /// Start one download per request
    fn download(&self, requests: Vec<ImageRequest>) -> Task<Message> {
        if requests.is_empty() {
            return Task::none();
        }

        Task::batch(requests.into_iter().map(|ImageRequest { id, url }| {
            let loader = self.snapshots.clone();
            Task::perform(loader.load(url.clone()), snapshot_loaded(id, url))
        }))
    }

    fn restart_reveal(&mut self) {
        self.now = Instant::now();
        self.reveal.restart(self.now);
    }
}

/// Completion callback for one snapshot download
fn snapshot_loaded(
    id: i64,
    url: String,
) -> impl Fn(Result<Snapshot, SnapshotError>) -> Message + Send + 'static {
    move |result| Message::SnapshotLoaded {
        id,
        url: url.clone(),
        result,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traffic_cams=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env();
    let query_url = config.query_url()?;
    let client = feed::client::build_client(&config)?;

    tracing::info!("🚦 Traffic camera dashboard starting");

    iced::application("Toronto Traffic", Dashboard::update, Dashboard::view)
        .subscription(Dashboard::subscription)
        .theme(Dashboard::theme)
        .exit_on_close_request(false)
        .centered()
        .run_with(move || Dashboard::new(config, client, query_url))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::viewer::Viewer;
    use iced::widget::image::Handle;

    fn camera(id: i64, main: &str, cross: &str, x: f64, y: f64) -> CameraRecord {
        CameraRecord {
            id,
            image_url: format!("https://cams.example.com/{}.jpg", id),
            main_road: main.to_string(),
            cross_road: Some(cross.to_string()),
            direction: None,
            x: Some(x),
            y: Some(y),
        }
    }

    fn dashboard() -> Dashboard {
        let config = DashboardConfig::default();
        let client = feed::client::build_client(&config).unwrap();
        let query_url = config.query_url().unwrap();
        let (mut dashboard, _) = Dashboard::new(config, client, query_url);

        let _ = dashboard.update(Message::CamerasLoaded(
            1,
            Ok(vec![
                camera(1, "Yonge St", "Bloor St", 10.0, 20.0),
                camera(2, "Bay St", "Queen St", 5.0, 30.0),
            ]),
        ));
        dashboard
    }

    #[test]
    fn test_catalog_load_starts_live_updates() {
        let dashboard = dashboard();
        assert!(dashboard.session.is_live());
        assert_eq!(dashboard.session.visible().len(), 2);
    }

    #[test]
    fn test_viewer_messages() {
        let mut dashboard = dashboard();

        let _ = dashboard.update(Message::OpenViewer(1));
        assert_eq!(dashboard.session.viewer(), Viewer::Open(1));

        // Name order is Bay St (2), Yonge St (1)
        let _ = dashboard.update(Message::NextCamera);
        assert_eq!(dashboard.session.viewer(), Viewer::Open(2));
        let _ = dashboard.update(Message::PrevCamera);
        assert_eq!(dashboard.session.viewer(), Viewer::Open(1));

        let _ = dashboard.update(Message::SortSelected(SortKey::NorthSouth));
        let _ = dashboard.update(Message::PrevCamera);
        assert_eq!(dashboard.session.viewer(), Viewer::Open(2));

        let _ = dashboard.update(Message::CloseViewer);
        assert_eq!(dashboard.session.viewer(), Viewer::Closed);
    }

    #[test]
    fn test_search_message_filters() {
        let mut dashboard = dashboard();
        let _ = dashboard.update(Message::SearchChanged("yonge".to_string()));
        let ids: Vec<i64> = dashboard.session.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_snapshot_message_updates_card() {
        let mut dashboard = dashboard();
        let record = dashboard.session.catalog().get(2).cloned().unwrap();
        let url = dashboard.session.snapshot_url(&record);

        let _ = dashboard.update(Message::SnapshotLoaded {
            id: 2,
            url,
            result: Ok(Snapshot {
                handle: Handle::from_rgba(1, 1, vec![0_u8; 4]),
            }),
        });
        assert!(matches!(
            dashboard.session.card_view(&record),
            state::cards::CardView::Image { refreshing: false, .. }
        ));
    }

    #[test]
    fn test_stale_catalog_result_is_ignored() {
        let mut dashboard = dashboard();
        // The retry supersedes fetch #1
        let _ = dashboard.update(Message::Retry);
        let _ = dashboard.update(Message::CamerasLoaded(1, Err(FetchError::Status(500))));
        assert!(dashboard.session.catalog().is_loading());
        assert!(dashboard.session.catalog().error().is_none());
    }

    #[test]
    fn test_close_request_ends_session() {
        let mut dashboard = dashboard();
        let _ = dashboard.update(Message::OpenViewer(2));
        let _ = dashboard.update(Message::CloseRequested(window::Id::unique()));
        assert!(!dashboard.session.is_live());
        assert_eq!(dashboard.session.viewer(), Viewer::Closed);
    }

    #[test]
    fn test_snapshot_callback_keeps_url_on_every_call() {
        let url = "https://cams.example.com/2.jpg?t=5".to_string();
        let callback = snapshot_loaded(2, url.clone());

        for _ in 0..2 {
            match callback(Err(SnapshotError::Status(503))) {
                Message::SnapshotLoaded { id, url: got, result } => {
                    assert_eq!(id, 2);
                    assert_eq!(got, url);
                    assert_eq!(result.unwrap_err(), SnapshotError::Status(503));
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }

    #[test]
    fn test_download_builds_task_for_requests() {
        let dashboard = dashboard();
        let record = dashboard.session.catalog().get(1).cloned().unwrap();
        let _task = dashboard.download(vec![ImageRequest {
            id: 1,
            url: dashboard.session.snapshot_url(&record),
        }]);
        let _none = dashboard.download(Vec::new());
    }
}
