//! The weather page: owns the snapshot sequence and the one-shot loader
//! task that fills it.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    config::LoaderConfig,
    model::{CityId, CityWeatherSnapshot},
    navigation::Navigator,
    provider::WeatherProvider,
    view::{self, Action, Control, PageView},
};

pub struct WeatherPage {
    snapshots: watch::Receiver<Vec<CityWeatherSnapshot>>,
    navigator: Arc<dyn Navigator>,
    cancel: CancellationToken,
    loader: Option<JoinHandle<()>>,
}

impl WeatherPage {
    /// Mount the page and start its loader. Must be called inside a tokio runtime.
    pub fn mount(
        provider: Arc<dyn WeatherProvider>,
        config: LoaderConfig,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let cancel = CancellationToken::new();

        tracing::debug!(cities = config.city_ids.len(), "mounting weather page");
        let loader = tokio::spawn(load(provider, config.city_ids, tx, cancel.clone()));

        Self {
            snapshots: rx,
            navigator,
            cancel,
            loader: Some(loader),
        }
    }

    /// Copy of the current snapshot sequence.
    pub fn snapshots(&self) -> Vec<CityWeatherSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Independent handle on the snapshot sequence.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CityWeatherSnapshot>> {
        self.snapshots.clone()
    }

    pub fn render(&self) -> PageView {
        view::render(&self.snapshots.borrow())
    }

    pub fn is_loading(&self) -> bool {
        self.loader.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait until the loader stores a new sequence.
    ///
    /// Returns `false` once the loader has finished without storing anything
    /// further, so callers never wait forever on a failed fetch.
    pub async fn changed(&mut self) -> bool {
        self.snapshots.changed().await.is_ok()
    }

    /// Wait for the loader task to finish, whatever its outcome.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.loader.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "weather loader task did not complete");
            }
        }
    }

    pub fn activate(&self, control: &Control) {
        match control.action {
            Some(Action::Navigate(route)) => {
                tracing::debug!(%route, label = control.label, "control activated");
                self.navigator.navigate(route);
            }
            None => tracing::debug!(label = control.label, "control has no action"),
        }
    }

    pub fn press_search(&self) {
        self.activate(&self.render().search_button);
    }

    pub fn press_globe(&self) {
        self.activate(&self.render().header.globe);
    }

    /// Tear the page down, abandoning an in-flight request.
    pub fn unmount(self) {}
}

impl Drop for WeatherPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn load(
    provider: Arc<dyn WeatherProvider>,
    ids: Vec<CityId>,
    tx: watch::Sender<Vec<CityWeatherSnapshot>>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!("weather page unmounted before data arrived");
            return;
        }
        result = provider.fetch_group(&ids) => result,
    };

    match result {
        Ok(snapshots) => {
            if cancel.is_cancelled() {
                return;
            }
            tracing::info!(count = snapshots.len(), "weather data loaded");
            tx.send_replace(snapshots);
        }
        Err(e) => tracing::error!(error = %e, "failed to fetch weather data"),
    }
}
