use std::fmt;
use tokio::sync::mpsc;

/// Screens reachable from the weather page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Weather,
    Search,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Weather => "Weather",
            Route::Search => "Search",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs screen transitions on behalf of a page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards every transition into a channel owned by the front end.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            tracing::warn!(%route, "navigation requested after the front end went away");
        }
    }
}
