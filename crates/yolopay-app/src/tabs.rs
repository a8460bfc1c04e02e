//! Bottom-tab shell hosting the card screen and its two placeholder tabs.

use std::str::FromStr;

use serde::Serialize;
use yolopay_core::error::ScreenError;
use yolopay_core::CardScreen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Home,
    #[default]
    YoloPay,
    Ginie,
}

/// Static content of a tab that has no screen logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::YoloPay => "yolo pay",
            Self::Ginie => "ginie",
        }
    }

    /// Material icon name shown in the tab bar.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::YoloPay => "payment",
            Self::Ginie => "sports-esports",
        }
    }

    pub fn placeholder(self) -> Option<Placeholder> {
        match self {
            Self::Home => Some(Placeholder {
                title: "Home",
                subtitle: "Welcome to YOLO Payment App",
                icon: "home",
            }),
            Self::YoloPay => None,
            Self::Ginie => Some(Placeholder {
                title: "Ginie",
                subtitle: "Gaming section coming soon!",
                icon: "sports-esports",
            }),
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "pay" | "yolopay" | "yolo_pay" | "yolo-pay" => Ok(Self::YoloPay),
            "ginie" | "game" => Ok(Self::Ginie),
            other => Err(format!("unknown tab `{other}`")),
        }
    }
}

pub type ScreenFactory = Box<dyn FnMut() -> Result<CardScreen, ScreenError>>;

/// Owns the active tab. The card screen exists only while its tab is
/// focused; leaving unmounts it and returning mounts a fresh one.
pub struct TabShell {
    active: Tab,
    screen: Option<CardScreen>,
    factory: ScreenFactory,
    mounts: u32,
}

impl TabShell {
    /// Open the shell on the initial tab.
    pub fn new(mut factory: ScreenFactory) -> Result<Self, ScreenError> {
        let screen = factory()?;
        Ok(Self {
            active: Tab::default(),
            screen: Some(screen),
            factory,
            mounts: 1,
        })
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Number of card screens mounted so far.
    pub fn mounts(&self) -> u32 {
        self.mounts
    }

    pub fn screen(&self) -> Option<&CardScreen> {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> Option<&mut CardScreen> {
        self.screen.as_mut()
    }

    /// Focus `tab`. Returns false if it was already focused.
    pub fn select(&mut self, tab: Tab) -> Result<bool, ScreenError> {
        if tab == self.active {
            return Ok(false);
        }
        if let Some(screen) = self.screen.take() {
            screen.unmount();
        }
        if tab == Tab::YoloPay {
            self.screen = Some((self.factory)()?);
            self.mounts += 1;
        }
        tracing::info!(from = %self.active, to = %tab, "tab switched");
        self.active = tab;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use yolopay_core::card::SyntheticCards;
    use yolopay_core::config::AppConfig;
    use yolopay_core::error::CardError;
    use yolopay_platform::{MemoryClipboard, NoHaptics};

    use super::*;

    fn factory() -> ScreenFactory {
        let mut cards = SyntheticCards::seeded(1);
        Box::new(move || {
            CardScreen::mount(
                &mut cards,
                Box::new(MemoryClipboard::new()),
                Box::new(NoHaptics),
                &AppConfig::default(),
            )
        })
    }

    #[test]
    fn test_starts_on_card_tab() {
        let shell = TabShell::new(factory()).unwrap();
        assert_eq!(shell.active(), Tab::YoloPay);
        assert!(shell.screen().is_some());
        assert_eq!(shell.mounts(), 1);
    }

    #[test]
    fn test_leaving_unmounts_and_returning_remounts() {
        let mut shell = TabShell::new(factory()).unwrap();
        let first = shell.screen().unwrap().card().clone();

        assert!(shell.select(Tab::Home).unwrap());
        assert!(shell.screen().is_none());
        assert!(!shell.select(Tab::Home).unwrap());

        assert!(shell.select(Tab::Ginie).unwrap());
        assert!(shell.screen().is_none());

        assert!(shell.select(Tab::YoloPay).unwrap());
        assert_eq!(shell.mounts(), 2);
        let second = shell.screen().unwrap();
        assert_ne!(second.card(), &first);
        assert!(!second.state().frozen);
    }

    #[test]
    fn test_remount_failure_surfaces() {
        let mut calls = 0;
        let factory: ScreenFactory = Box::new(move || {
            calls += 1;
            if calls > 1 {
                return Err(ScreenError::CardGeneration(CardError::EntropyUnavailable(
                    "gone".into(),
                )));
            }
            CardScreen::mount(
                &mut SyntheticCards::seeded(2),
                Box::new(MemoryClipboard::new()),
                Box::new(NoHaptics),
                &AppConfig::default(),
            )
        });
        let mut shell = TabShell::new(factory).unwrap();
        shell.select(Tab::Home).unwrap();
        match shell.select(Tab::YoloPay) {
            Err(ScreenError::CardGeneration(_)) => {}
            other => panic!("Expected CardGeneration, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholders() {
        let home = Tab::Home.placeholder().unwrap();
        assert_eq!(home.subtitle, "Welcome to YOLO Payment App");
        assert_eq!(Tab::Ginie.placeholder().unwrap().icon, "sports-esports");
        assert!(Tab::YoloPay.placeholder().is_none());
        for tab in [Tab::Home, Tab::YoloPay, Tab::Ginie] {
            assert_eq!(tab.placeholder().is_none(), tab == Tab::YoloPay);
        }
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!("home".parse::<Tab>(), Ok(Tab::Home));
        assert_eq!("Pay".parse::<Tab>(), Ok(Tab::YoloPay));
        assert_eq!("ginie".parse::<Tab>(), Ok(Tab::Ginie));
        assert!("settings".parse::<Tab>().is_err());
    }
}
