//! Pure mapping from the snapshot sequence to the page's view tree.

use crate::{model::CityWeatherSnapshot, navigation::Route};

pub const GREETING: [&str; 2] = ["Olá User,", "Descubra o clima"];
pub const GLOBE_LABEL: &str = "🌐";
pub const SEARCH_LABEL: &str = "Pesquise por uma cidade";
pub const SECTION_TITLE: &str = "Ao redor do mundo";
pub const LOADING_TEXT: &str = "Carregando dados do tempo...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Route),
}

/// Something the user can activate. `action` is `None` for inert controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub greeting: [&'static str; 2],
    pub globe: Control,
}

/// The four values a weather card displays, keyed by city id.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: u64,
    pub country: String,
    pub city: String,
    pub weather: String,
    pub temperature: f64,
}

impl From<&CityWeatherSnapshot> for CardView {
    fn from(s: &CityWeatherSnapshot) -> Self {
        Self {
            key: s.id,
            country: s.country_code.clone(),
            city: s.city_name.clone(),
            weather: s.primary_condition.clone(),
            temperature: s.temperature_c,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardList {
    Loading(&'static str),
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    AwaitingData,
    DataAvailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub header: Header,
    pub search_button: Control,
    pub section_title: &'static str,
    pub body: CardList,
}

impl PageView {
    pub fn state(&self) -> ViewState {
        match self.body {
            CardList::Loading(_) => ViewState::AwaitingData,
            CardList::Cards(_) => ViewState::DataAvailable,
        }
    }

    pub fn cards(&self) -> &[CardView] {
        match &self.body {
            CardList::Cards(cards) => cards,
            CardList::Loading(_) => &[],
        }
    }
}

pub fn render(snapshots: &[CityWeatherSnapshot]) -> PageView {
    let body = if snapshots.is_empty() {
        CardList::Loading(LOADING_TEXT)
    } else {
        CardList::Cards(snapshots.iter().map(CardView::from).collect())
    };

    PageView {
        header: Header {
            greeting: GREETING,
            globe: Control {
                label: GLOBE_LABEL,
                action: None,
            },
        },
        search_button: Control {
            label: SEARCH_LABEL,
            action: Some(Action::Navigate(Route::Search)),
        },
        section_title: SECTION_TITLE,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: u64, city: &str, country: &str, weather: &str, temp: f64) -> CityWeatherSnapshot {
        CityWeatherSnapshot {
            id,
            city_name: city.into(),
            country_code: country.into(),
            primary_condition: weather.into(),
            temperature_c: temp,
        }
    }

    #[test]
    fn empty_sequence_renders_loading_text() {
        let view = render(&[]);

        assert_eq!(view.state(), ViewState::AwaitingData);
        assert_eq!(view.body, CardList::Loading(LOADING_TEXT));
        assert!(view.cards().is_empty());
    }

    #[test]
    fn one_card_per_snapshot_in_order() {
        let snapshots = vec![
            snapshot(1, "Lisbon", "PT", "Clear", 21.5),
            snapshot(1850147, "Tokyo", "JP", "Clouds", 14.2),
        ];

        let view = render(&snapshots);

        assert_eq!(view.state(), ViewState::DataAvailable);
        assert_eq!(
            view.cards(),
            &[
                CardView {
                    key: 1,
                    country: "PT".into(),
                    city: "Lisbon".into(),
                    weather: "Clear".into(),
                    temperature: 21.5,
                },
                CardView {
                    key: 1850147,
                    country: "JP".into(),
                    city: "Tokyo".into(),
                    weather: "Clouds".into(),
                    temperature: 14.2,
                },
            ]
        );
    }

    #[test]
    fn static_chrome_does_not_depend_on_data() {
        let empty = render(&[]);
        let full = render(&[snapshot(1, "Lisbon", "PT", "Clear", 21.5)]);

        assert_eq!(empty.header, full.header);
        assert_eq!(empty.search_button, full.search_button);
        assert_eq!(full.section_title, SECTION_TITLE);
        assert_eq!(full.header.globe.action, None);
        assert_eq!(
            full.search_button.action,
            Some(Action::Navigate(Route::Search))
        );
    }
}
